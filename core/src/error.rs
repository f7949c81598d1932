//! Error types for the Todoist sync client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." Request-construction failures (`ConfigurationError`,
//! `SerializationError`, `UrlError`) are separate from transport and decode
//! failures so a caller can tell a bad input from a bad network day.

use std::fmt;

/// Errors returned by `TodoistClient` and the resource services.
#[derive(Debug)]
pub enum ApiError {
    /// The client configuration is unusable (empty API token).
    ConfigurationError(String),

    /// A command batch or resource-type filter could not be encoded to JSON.
    SerializationError(String),

    /// The base URL could not be parsed or resolved against the sync endpoint.
    UrlError(String),

    /// The underlying transport failed to complete the round-trip.
    TransportError(String),

    /// The server returned 404, or a lookup scanned every element without a match.
    NotFound,

    /// The server returned a non-2xx status other than 404.
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected shape.
    DeserializationError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ConfigurationError(msg) => {
                write!(f, "invalid configuration: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
            ApiError::UrlError(msg) => {
                write!(f, "invalid URL: {msg}")
            }
            ApiError::TransportError(msg) => {
                write!(f, "transport failed: {msg}")
            }
            ApiError::NotFound => write!(f, "resource not found"),
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
