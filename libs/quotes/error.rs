use feedsocket::FeedSocketError;
use thiserror::Error;

/// Main error type for the quotes library
#[derive(Error, Debug)]
pub enum QuotesError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error (config file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error (config file contents)
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON error (wire envelopes)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Feed client error
    #[error(transparent)]
    Feed(#[from] FeedSocketError),
}

/// Result type for quotes operations
pub type Result<T> = std::result::Result<T, QuotesError>;
