use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdoError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{operation} failed: {message}")]
    Remote { operation: String, message: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AdoError {
    pub fn remote(operation: impl Into<String>, message: impl Into<String>) -> Self {
        AdoError::Remote {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdoError>;
