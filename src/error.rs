//! Error types and handling for the explorer engine

use thiserror::Error;

/// Main error type for the explorer
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Transport failures, timeouts and unparseable AI backend responses
    #[error("Backend error: {message}")]
    Backend { message: String },

    /// A response subtree that does not match the expected shape
    #[error("Schema error at '{field}': {message}")]
    Schema { field: String, message: String },

    /// Input or entry validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The engine task is no longer running
    #[error("Engine stopped")]
    EngineStopped,

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl ExplorerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new backend error
    pub fn backend<S: Into<String>>(message: S) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Create a new schema error for the given response field
    pub fn schema<F: Into<String>, S: Into<String>>(field: F, message: S) -> Self {
        Self::Schema {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ExplorerError::Config { .. } => {
                "Configuration error. Please check your config file and API key.".to_string()
            }
            ExplorerError::Backend { .. } | ExplorerError::Schema { .. } => {
                "The AI service is busy right now. Please try again.".to_string()
            }
            ExplorerError::Validation { message } => format!("Invalid input: {message}"),
            ExplorerError::EngineStopped => "The explorer is shutting down.".to_string(),
            ExplorerError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for ExplorerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ExplorerError::backend(format!("request timed out: {err}"))
        } else {
            ExplorerError::backend(format!("request failed: {err}"))
        }
    }
}
