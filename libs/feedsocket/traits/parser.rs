use crate::error::Result;
use async_trait::async_trait;

/// Type alias for WebSocket messages
/// Can be Text or Binary data
#[derive(Debug, Clone)]
pub enum WsMessage {
    Text(String),
    Binary(Vec<u8>),
}

impl WsMessage {
    /// Get the message as text, if it is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            WsMessage::Text(s) => Some(s),
            WsMessage::Binary(_) => None,
        }
    }

    /// Get the message as binary, if it is binary
    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            WsMessage::Text(_) => None,
            WsMessage::Binary(b) => Some(b),
        }
    }

    /// Check if message is text
    pub fn is_text(&self) -> bool {
        matches!(self, WsMessage::Text(_))
    }
}

/// Trait for parsing raw feed frames into typed events
///
/// Implement this trait to define how raw WebSocket messages map to
/// your application's event type. The client calls `parse` inline in
/// its read loop, so events are delivered in arrival order.
///
/// A parse failure means the frame did not match the expected envelope.
/// The client drops such frames silently (debug trace only); they must
/// never tear down the connection.
#[async_trait]
pub trait FeedParser: Send + Sync + 'static {
    /// The typed event produced from a raw frame
    type Event: Send + std::fmt::Debug + 'static;

    /// Parse a received WebSocket message into an event
    ///
    /// # Returns
    /// * `Ok(event)` - Frame matched the envelope
    /// * `Err(FeedSocketError)` - Frame is malformed or unrecognized
    async fn parse(&self, message: WsMessage) -> Result<Self::Event>;
}

/// A parser that passes raw frames through unchanged
/// Useful for testing or when you only need the raw feed
pub struct RawParser;

#[async_trait]
impl FeedParser for RawParser {
    type Event = WsMessage;

    async fn parse(&self, message: WsMessage) -> Result<WsMessage> {
        Ok(message)
    }
}
