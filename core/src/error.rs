//! Error types for the character client and store.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the character does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `Http` with the raw status
//! code and body for debugging. `Transport` covers everything that failed
//! before a response arrived.

use thiserror::Error;

/// Errors returned by the request builders, parsers and transports.
#[derive(Debug, Error)]
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

    /// The request never produced a response (connection refused, DNS, ...).
    #[error("transport failed: {0}")]
    Transport(String),
}

/// Errors returned by `CharacterStore` operations.
///
/// A failed mutation leaves the snapshot untouched; the error only tells the
/// caller that the write did not take effect.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The initial fetch-all failed, so there is no snapshot to serve.
    #[error("initial character load failed: {0}")]
    InitialLoad(#[source] ApiError),

    /// A remote call behind a store operation failed.
    #[error("remote call failed: {0}")]
    Remote(#[from] ApiError),
}
