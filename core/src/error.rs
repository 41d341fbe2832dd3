//! Error types for the data client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because a 404 on a PUT or DELETE means
//! the row vanished on the backend, which the todos page reports differently
//! from a generic failure. All other non-2xx responses land in `HttpError`
//! with the raw status code and body. `Transport` is produced by hosts when
//! the request never got a response at all.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The host could not complete the round-trip.
    #[error("transport failed: {0}")]
    Transport(String),
}
