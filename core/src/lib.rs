//! Synchronous client core for the Todoist sync API.
//!
//! # Overview
//! The client builds the form-encoded sync request (sync token,
//! resource-type filter, optional command batch), sends it through a
//! pluggable transport, and decodes the JSON reply into typed resources plus
//! the temp-id mapping for newly created entities.
//!
//! # Design
//! - `TodoistClient` holds immutable configuration only; every operation is
//!   one synchronous round-trip with no retries.
//! - `build_sync_request` / `parse_sync_response` are public halves around
//!   the `Transport` seam, so the protocol logic stays testable without a
//!   network.
//! - Resource services (`ProjectService`) are thin consumers of the sync
//!   exchange.
//! - Logging is an injected capability and a complete no-op unless the
//!   client's debug flag is set.

pub mod client;
pub mod command;
pub mod error;
pub mod http;
pub mod logger;
pub mod projects;
pub mod types;

pub use client::{TodoistClient, DEFAULT_BASE_URL};
pub use command::Command;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use logger::{Logger, StderrLogger};
pub use projects::{
    AddProject, ArchiveProject, DeleteProject, MoveProject, ProjectService, UpdateProject,
};
pub use types::{Project, SyncResponse};
