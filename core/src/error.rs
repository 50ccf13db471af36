//! Error types for the fasting log client.
//!
//! # Design
//! Every non-2xx response lands in `Request` with the server's plain-text
//! message, or a status-derived fallback when the body is empty. The other
//! variants cover local failures around the round-trip. Variants own only
//! `String`s so the error can be cloned into the controller's banner.

use thiserror::Error;

/// Errors returned by `FastLogClient` parse methods and by transports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered outside the 2xx range.
    #[error("{message}")]
    Request { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A 2xx response carried no body where an entry was expected.
    #[error("empty response body (status {0})")]
    EmptyBody(u16),

    /// The request never produced a response (connection refused, timeout).
    #[error("transport failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// Build the error for a non-2xx response.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            format!("HTTP error! status: {status}")
        } else {
            body.to_string()
        };
        ApiError::Request { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } | ApiError::EmptyBody(status) => Some(*status),
            _ => None,
        }
    }
}
