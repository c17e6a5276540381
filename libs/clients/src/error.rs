//! Error type shared by the API clients.

use thiserror::Error;

/// Errors produced by the platform API clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// Create an API error from response details.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Returns true if the server reported 404 for the resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_)) || matches!(self, Self::Api { status: 404, .. })
    }
}
