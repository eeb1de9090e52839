//! Errors raised while constructing a client.
//!
//! Failures of individual calls are reported as
//! [`NormalizedError`](globens_core::NormalizedError) instead.

use thiserror::Error;

/// Result type alias for client construction.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error type for client construction.
#[derive(Debug, Error)]
pub enum Error {
    /// The configured base URL cannot be used.
    #[error("invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    /// The HTTP client could not be created.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}
