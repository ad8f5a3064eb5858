//! Error types for order retrieval.
//!
//! Invoice generation itself has no failure paths: missing or malformed
//! fields degrade to placeholders during normalization. Only the network
//! boundary in `api` can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Backend host could not be reached at all.
    #[error("cannot reach order backend at {0}")]
    Unreachable(String),

    /// Request exceeded the client timeout.
    #[error("request to order backend at {0} timed out")]
    Timeout(String),

    /// Requested order does not exist on the backend.
    #[error("order not found: {0}")]
    NotFound(String),

    /// Non-success HTTP response other than 404.
    #[error("{detail} (HTTP {code})")]
    Status { code: u16, detail: String },

    /// Response body was not valid JSON.
    #[error("invalid JSON from order backend: {0}")]
    InvalidJson(String),

    /// Any other transport-level failure.
    #[error("network error communicating with order backend: {0}")]
    Network(String),
}

pub type ApiResult<T> = Result<T, ApiError>;
