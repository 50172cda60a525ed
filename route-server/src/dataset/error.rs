//! Dataset error types.

use crate::snapshot::LoadError;

/// Errors that can occur while fetching or reading the dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Reading the dataset file failed
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check ROUTE_DATA_API_KEY")]
    Unauthorized,

    /// Admin service returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The dataset parsed but cannot be loaded
    #[error("invalid dataset: {0}")]
    Invalid(#[from] LoadError),
}
