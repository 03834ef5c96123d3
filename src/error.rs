//! Error types and handling for the `RouteWatch` engine

use thiserror::Error;

/// Main error type for the `RouteWatch` engine
#[derive(Error, Debug)]
pub enum RouteWatchError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// External lookup errors (weather, geocoding, POI queries)
    #[error("Lookup error: {message}")]
    Lookup { message: String },

    /// Input validation errors (empty route, empty candidate set)
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl RouteWatchError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new lookup error
    pub fn lookup<S: Into<String>>(message: S) -> Self {
        Self::Lookup {
            message: message.into(),
        }
    }

    /// Create a new input validation error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            RouteWatchError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            RouteWatchError::Lookup { .. } => {
                "Unable to reach external services. Please check your internet connection."
                    .to_string()
            }
            RouteWatchError::InvalidInput { message } => {
                format!("Invalid input: {message}")
            }
            RouteWatchError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            RouteWatchError::General { message } => message.clone(),
        }
    }
}
