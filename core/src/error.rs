//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because a delete of a todo that is
//! already gone is the most common failure. All other non-2xx responses land
//! in `Http` with the raw status code and body for the log. `Transport`
//! carries failures the host hit before any response existed.

use thiserror::Error;

/// Errors returned by `TodoClient` methods and reported by the host.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response (connection refused, DNS...).
    #[error("transport failed: {0}")]
    Transport(String),
}
