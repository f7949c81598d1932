//! HTTP transport types and the pluggable transport seam.
//!
//! # Design
//! `HttpRequest` and `HttpResponse` describe the wire exchange as plain data,
//! so the request builder and response parser never touch the network
//! directly. The `Transport` trait is the single I/O boundary: the client
//! issues exactly one `send` per operation and interprets the result itself.
//! Implementations must be safe for concurrent reuse — the client never
//! serializes access to its transport.
//!
//! All fields use owned types (`String`, `Vec`) so requests and responses can
//! be captured, logged, and replayed in tests without lifetime concerns.

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
///
/// Built by `TodoistClient::build_sync_request` and handed to a `Transport`
/// for execution.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Produced by a `Transport`, then passed to
/// `TodoistClient::parse_sync_response` for status interpretation and
/// deserialization.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Executes one HTTP round-trip.
///
/// A transport performs no retries and interprets no status codes; it either
/// returns the server's response as data or fails with
/// `ApiError::TransportError`. Cancellation and timeout policy belong to the
/// implementation — aborting the call surfaces as a transport error.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Default `Transport` backed by a shared [`ureq::Agent`].
///
/// Status-code-as-error handling is disabled so 4xx/5xx responses come back
/// as data and the client decides what they mean.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let result = match (&request.method, &request.body) {
            (HttpMethod::Get, _) => {
                let mut req = self.agent.get(&request.url);
                for (name, value) in &request.headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                req.call()
            }
            (HttpMethod::Post, Some(body)) => {
                let mut req = self.agent.post(&request.url);
                for (name, value) in &request.headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                req.send(body.as_bytes())
            }
            (HttpMethod::Post, None) => {
                let mut req = self.agent.post(&request.url);
                for (name, value) in &request.headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                req.send_empty()
            }
        };

        let mut response = result.map_err(|e| ApiError::TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::TransportError(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
