//! # Feedsocket Traits
//!
//! Core traits and types for the feedsocket client library:
//!
//! - **FeedParser**: Parse incoming WebSocket frames into typed events
//! - **ReconnectionStrategy**: Control reconnection behavior

pub mod error;
pub mod parser;
pub mod reconnect;

// Re-export commonly used types
pub use error::{FeedSocketError, Result};
pub use parser::{FeedParser, RawParser, WsMessage};
pub use reconnect::{FixedDelay, NeverReconnect, ReconnectionStrategy};
