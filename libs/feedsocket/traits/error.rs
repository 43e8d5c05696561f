use thiserror::Error;

/// Main error type for feedsocket
#[derive(Error, Debug)]
pub enum FeedSocketError {
    /// WebSocket connection error
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Connection closed unexpectedly
    #[error("Connection closed: {0}")]
    ConnectionClosed(String),

    /// Message parsing error
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Channel send error
    #[error("Channel send error: {0}")]
    ChannelSend(String),

    /// Channel receive error
    #[error("Channel receive error: {0}")]
    ChannelReceive(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic error
    #[error("Error: {0}")]
    Other(String),
}

/// Result type for feedsocket operations
pub type Result<T> = std::result::Result<T, FeedSocketError>;
