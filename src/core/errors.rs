//! Custom error types for model provisioning and translation

use thiserror::Error;

/// Translation service errors
#[derive(Error, Debug)]
pub enum TranslatorError {
    /// A single artifact could not be fetched from the object store
    #[error("object fetch failed for {key}: {message}")]
    ObjectFetch {
        key: String,
        message: String,
    },

    /// A single artifact could not be uploaded to the object store
    #[error("object upload failed for {key}: {message}")]
    ObjectPut {
        key: String,
        message: String,
    },

    /// Local artifacts did not produce a usable model
    #[error("model load failed from {path}: {message}")]
    ModelLoad {
        path: String,
        message: String,
    },

    /// Every provisioning source was exhausted
    #[error("model unavailable: {model}")]
    ModelUnavailable {
        model: String,
    },

    /// The inference engine failed on a segment
    #[error("inference failed: {message}")]
    Inference {
        message: String,
    },

    /// Missing or empty required request field
    #[error("missing required field: {field}")]
    InvalidRequest {
        field: String,
    },

    /// Configuration error
    #[error("configuration error: {message}")]
    Config {
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<anyhow::Error> for TranslatorError {
    fn from(err: anyhow::Error) -> Self {
        TranslatorError::Config {
            message: err.to_string(),
        }
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslatorError>;
