use crate::traits::*;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for a FeedClient
///
/// Built via the type-state builder; holds everything the client task
/// needs to run one logical feed connection.
pub struct ClientConfig<P>
where
    P: FeedParser,
{
    /// WebSocket URL (wss:// or ws://)
    pub(crate) url: String,

    /// Parser turning raw frames into typed events
    pub(crate) parser: Arc<P>,

    /// Message sent immediately on every transition to Open
    /// (liveness probe; sent before queued commands are flushed)
    pub(crate) open_probe: Option<WsMessage>,

    /// Optional heartbeat configuration (interval, payload);
    /// the heartbeat only runs while a connection is open
    pub(crate) heartbeat: Option<(Duration, WsMessage)>,

    /// Reconnection strategy
    pub(crate) reconnect_strategy: Box<dyn ReconnectionStrategy>,

    /// Shutdown flag - true means keep running; lowering it is the only
    /// way to stop the reconnect cycle
    pub(crate) shutdown_flag: Arc<AtomicBool>,
}

impl<P> ClientConfig<P>
where
    P: FeedParser,
{
    /// Get a reference to the URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Check if an open probe is configured
    pub fn has_open_probe(&self) -> bool {
        self.open_probe.is_some()
    }

    /// Check if heartbeat is configured
    pub fn has_heartbeat(&self) -> bool {
        self.heartbeat.is_some()
    }
}
