//! Error types for rule and result storage.

use thiserror::Error;

/// Failures reading or writing the JSON-backed stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
