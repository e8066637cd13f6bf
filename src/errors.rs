use crate::models::MemeId;
use thiserror::Error; // Use thiserror for cleaner error definitions

// --- Remote Source Errors ---

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Meme not found with ID: {0}")]
    NotFound(MemeId),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: reqwest::StatusCode },

    #[error("Meme source backend error: {0}")]
    BackendError(#[from] anyhow::Error), // Decode failures carry their context here
}

// --- Binary Error ---

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Initialization error: {0}")]
    InitError(String),
}

impl From<crate::config::ConfigError> for AppError {
    fn from(err: crate::config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}
