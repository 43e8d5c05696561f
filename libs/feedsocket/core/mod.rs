//! Core client functionality: builder, client task, config, state,
//! heartbeat.

pub mod builder;
pub mod client;
pub mod config;
pub mod connection_state;
pub mod heartbeat;

// Re-export main types
pub use builder::{states, FeedClientBuilder, DEFAULT_RECONNECT_DELAY};
pub use client::{ClientEvent, FeedClient, Metrics};
pub use config::ClientConfig;
pub use connection_state::{AtomicConnectionState, AtomicMetrics, ConnectionState};

// Re-export traits for convenience
pub use crate::traits::*;

/// Create a new feed client builder
///
/// This is a convenience function for starting the builder pattern.
///
/// # Example
/// ```ignore
/// let client = feedsocket::builder()
///     .url("ws://localhost:8000/ws")
///     .parser(MyParser)
///     .open_probe(WsMessage::Text("ping".into()))
///     .reconnect_strategy(FixedDelay::new(Duration::from_secs(2), None))
///     .build()
///     .await?;
/// ```
pub fn builder() -> FeedClientBuilder<builder::states::NoUrl, builder::states::NoParser, ()> {
    FeedClientBuilder::new()
}
