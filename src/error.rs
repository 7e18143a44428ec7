//! Error types for parley.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParleyError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Remote call errors
    #[error("Transport failure: {message}")]
    Transport { message: String },

    #[error("Authorization rejected: {message}")]
    Auth { message: String },

    #[error("Malformed remote response: {message}")]
    Parse { message: String },

    // Recognition stream errors
    #[error("Recognition stream error: {message}")]
    Stream { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

impl ParleyError {
    /// Short stable code for reporting an error through the observer.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigFileNotFound { .. } | Self::ConfigInvalidValue { .. } | Self::Config(_) => {
                "config"
            }
            Self::Transport { .. } => "transport",
            Self::Auth { .. } => "auth",
            Self::Parse { .. } => "parse",
            Self::Stream { .. } => "stream",
            Self::Io(_) => "io",
            Self::Other(_) => "other",
        }
    }
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, ParleyError>;
