use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Incompatible store: {0}")]
    IncompatibleStore(String),

    #[error("Remote fetch failed: {0}")]
    RemoteFetch(String),

    #[error("Item processing failed: {0}")]
    ItemProcessing(String),

    #[error("Store sync failed: {0}")]
    StoreSync(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::ExternalService("Request timeout".to_string())
        } else if err.is_connect() {
            AppError::ExternalService("Failed to connect to remote platform".to_string())
        } else if let Some(status) = err.status() {
            match status.as_u16() {
                429 => AppError::RateLimited("Too many requests".to_string()),
                404 => AppError::NotFound("Remote resource not found".to_string()),
                _ => AppError::RemoteFetch(format!("HTTP {}: {}", status, err)),
            }
        } else {
            AppError::RemoteFetch(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
