//! Error types for DJEN API operations.

use thiserror::Error;

/// Errors returned by [`DjenClient`](crate::DjenClient) calls.
///
/// Rate limiting gets its own variant so callers can back off and retry the
/// same page instead of treating it as a failure.
#[derive(Debug, Error)]
pub enum DjenError {
    /// The upstream answered 429 Too Many Requests.
    #[error("rate limited by the DJEN API")]
    RateLimited,

    /// Any other non-success HTTP status.
    #[error("DJEN API error {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Transport-level failure (connection, timeout, TLS).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response had a success status but the body was not a valid
    /// communications page.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DjenError>;
