//! Sync request builder and response parser for the Todoist API.
//!
//! # Design
//! `TodoistClient` holds only immutable configuration: base URL, API token,
//! user agent, debug flag, transport, logger. Each operation is one
//! synchronous round-trip: `build_sync_request` produces an `HttpRequest`,
//! the transport executes it, `parse_sync_response` consumes the
//! `HttpResponse`. The build and parse halves are public so callers with
//! their own I/O loop can drive them directly.
//!
//! The default-vs-absent policy differs per form field and is deliberate:
//! an empty sync token becomes the wildcard `*`, an empty resource-type list
//! becomes `["all"]`, but an empty command list omits the `commands` field
//! entirely instead of sending `[]`.

use std::sync::Arc;

use serde::Serialize;
use url::Url;

use crate::command::Command;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::logger::{Logger, StderrLogger};
use crate::projects::ProjectService;
use crate::types::SyncResponse;

/// Production sync endpoint base. Must end with a slash so the endpoint path
/// resolves underneath it.
pub const DEFAULT_BASE_URL: &str = "https://api.todoist.com/sync/v9/";

const DEFAULT_USER_AGENT: &str = concat!("todoist-core/", env!("CARGO_PKG_VERSION"));

/// Synchronous client for the Todoist sync API.
pub struct TodoistClient {
    base_url: String,
    api_token: String,
    user_agent: String,
    debug: bool,
    transport: Arc<dyn Transport>,
    logger: Arc<dyn Logger>,
}

impl std::fmt::Debug for TodoistClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoistClient")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token)
            .field("user_agent", &self.user_agent)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl TodoistClient {
    /// New client with the default endpoint, transport, and logger, debug
    /// disabled. Fails with `ConfigurationError` when the token is empty.
    pub fn new(api_token: &str) -> Result<Self, ApiError> {
        if api_token.is_empty() {
            return Err(ApiError::ConfigurationError(
                "API token must not be empty".to_string(),
            ));
        }
        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: api_token.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            debug: false,
            transport: Arc::new(UreqTransport::new()),
            logger: Arc::new(StderrLogger),
        })
    }

    pub fn set_base_url(&mut self, base_url: &str) {
        self.base_url = base_url.to_string();
    }

    /// Set the `User-Agent` value. An empty string means the header is not
    /// sent at all.
    pub fn set_user_agent(&mut self, user_agent: &str) {
        self.user_agent = user_agent.to_string();
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn set_transport(&mut self, transport: Arc<dyn Transport>) {
        self.transport = transport;
    }

    pub fn set_logger(&mut self, logger: Arc<dyn Logger>) {
        self.logger = logger;
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Project operations backed by this client.
    pub fn projects(&self) -> ProjectService<'_> {
        ProjectService::new(self)
    }

    /// Log a plain message. No-op unless debug is enabled.
    pub fn logln(&self, message: &str) {
        if !self.debug {
            return;
        }
        self.logger.log(message);
    }

    /// Log a formatted message. The debug check runs before any formatting,
    /// so a disabled client does no work here.
    pub fn logf(&self, args: std::fmt::Arguments<'_>) {
        if !self.debug {
            return;
        }
        self.logger.log(&args.to_string());
    }

    /// Build the form-encoded POST for one sync exchange.
    ///
    /// Field policy: `token` is always present; an empty `sync_token` becomes
    /// the wildcard `*`; an empty `resource_types` becomes `["all"]`, and the
    /// list is always encoded as a single JSON-array field; an empty
    /// `commands` slice omits the field entirely, a non-empty one is encoded
    /// as a JSON array in order. Any command that fails to encode aborts the
    /// build with `SerializationError` and no request is produced.
    pub fn build_sync_request<A: Serialize>(
        &self,
        sync_token: &str,
        resource_types: &[&str],
        commands: &[Command<A>],
    ) -> Result<HttpRequest, ApiError> {
        let url = Url::parse(&self.base_url)
            .and_then(|base| base.join("sync"))
            .map_err(|e| ApiError::UrlError(e.to_string()))?;

        let sync_token = if sync_token.is_empty() { "*" } else { sync_token };
        let resource_types: Vec<&str> = if resource_types.is_empty() {
            vec!["all"]
        } else {
            resource_types.to_vec()
        };
        let resource_types_json = serde_json::to_string(&resource_types)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;

        let mut form = url::form_urlencoded::Serializer::new(String::new());
        form.append_pair("token", &self.api_token);
        form.append_pair("sync_token", sync_token);
        form.append_pair("resource_types", &resource_types_json);
        if !commands.is_empty() {
            let commands_json = serde_json::to_string(commands)
                .map_err(|e| ApiError::SerializationError(e.to_string()))?;
            form.append_pair("commands", &commands_json);
        }

        let mut headers = vec![(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        )];
        if !self.user_agent.is_empty() {
            headers.push(("User-Agent".to_string(), self.user_agent.clone()));
        }

        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: url.to_string(),
            headers,
            body: Some(form.finish()),
        })
    }

    /// Interpret the status and decode the JSON reply.
    pub fn parse_sync_response(&self, response: HttpResponse) -> Result<SyncResponse, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// One full sync exchange: build, send through the transport, parse.
    pub fn sync<A: Serialize>(
        &self,
        sync_token: &str,
        resource_types: &[&str],
        commands: &[Command<A>],
    ) -> Result<SyncResponse, ApiError> {
        let request = self.build_sync_request(sync_token, resource_types, commands)?;
        self.logf(format_args!("POST {}", request.url));
        let response = self.transport.send(&request)?;
        self.logf(format_args!("sync returned HTTP {}", response.status));
        self.parse_sync_response(response)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
