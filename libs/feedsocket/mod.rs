//! # Feedsocket
//!
//! A reconnecting WebSocket client for always-on data feeds.
//!
//! ## Features
//!
//! - **One logical connection**: a single background task owns the
//!   socket, so at most one connection attempt is ever outstanding
//! - **Queued commands**: outbound messages are only physically written
//!   while the connection is open; anything issued earlier is queued
//!   (FIFO) and flushed on the next open
//! - **Subscription replay**: tracked subscriptions are re-sent in
//!   original order after every reconnect
//! - **Pluggable reconnection**: fixed-delay with no retry ceiling by
//!   default, so an always-on dashboard feed never gives up
//! - **Typed events**: frames are parsed inline into a closed event set
//!   and delivered over a channel; malformed frames are dropped silently

pub mod core;
pub mod traits;

// Re-export all traits
pub use traits::*;

// Re-export core client functionality
pub use crate::core::{
    builder, client, config, connection_state, heartbeat,
    builder::{states, FeedClientBuilder, DEFAULT_RECONNECT_DELAY},
    client::{ClientEvent, FeedClient, Metrics},
    config::ClientConfig,
    connection_state::{AtomicConnectionState, AtomicMetrics, ConnectionState},
};

// Convenience function
pub use crate::core::builder as client_builder;
