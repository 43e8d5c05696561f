use crate::config::ClientConfig;
use crate::connection_state::{AtomicConnectionState, AtomicMetrics, ConnectionState};
use crate::traits::*;
use crossbeam_channel::{unbounded, Receiver, Sender};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Internal command messages for client control
#[derive(Debug)]
enum ClientCommand {
    /// Send a message to the feed
    Send(WsMessage),
    /// Send a subscription command and track it for replay on reconnect
    Subscribe { key: String, message: WsMessage },
    /// Send an unsubscription command and drop its key from tracking
    Unsubscribe { key: String, message: WsMessage },
    /// Shutdown the client
    Shutdown,
}

/// Events emitted by the client
///
/// This is the closed set of things that can happen on the feed side;
/// consumers drain them from the event channel and run each to
/// completion before the next, so no state is mutated concurrently.
#[derive(Debug, Clone)]
pub enum ClientEvent<E> {
    /// Connection transitioned to Open
    Opened,
    /// Connection transitioned to Closed
    Closed,
    /// Reconnecting (attempt number)
    Reconnecting(usize),
    /// Transport error; the client keeps its reconnect cycle going
    Error(String),
    /// A parsed feed event
    Event(E),
}

/// Client metrics snapshot
#[derive(Debug, Clone)]
pub struct Metrics {
    pub messages_sent: u64,
    pub messages_received: u64,
    pub reconnect_count: u64,
    pub connection_state: ConnectionState,
}

/// Reconnecting WebSocket feed client
///
/// Manages one logical connection to a feed endpoint:
/// - connect loop with a pluggable reconnection strategy
/// - commands are queued (unbounded, FIFO) and only physically written
///   while the connection is Open; queued commands flush on the next
///   transition to Open
/// - active subscriptions are replayed, in original subscription order,
///   on every reconnect
/// - inbound frames are parsed inline (arrival order preserved) and
///   emitted on the event channel; unparseable frames are dropped
///
/// The single background task owns the socket, so at most one
/// connection attempt is ever outstanding.
pub struct FeedClient<P>
where
    P: FeedParser,
{
    /// Client configuration (kept for API access)
    #[allow(dead_code)]
    config: Arc<ClientConfig<P>>,
    /// Atomic connection state
    state: Arc<AtomicConnectionState>,
    /// Atomic metrics
    metrics: Arc<AtomicMetrics>,
    /// Command channel sender
    command_tx: Sender<ClientCommand>,
    /// Event channel receiver
    event_rx: Receiver<ClientEvent<P::Event>>,
    /// Main task handle
    task_handle: Option<tokio::task::JoinHandle<()>>,
    /// Shutdown flag reference (true = keep running)
    shutdown_flag: Arc<AtomicBool>,
}

impl<P> FeedClient<P>
where
    P: FeedParser,
{
    /// Create a new feed client from configuration
    ///
    /// This is called by the builder's `build()` method and spawns the
    /// connection task immediately. Use `feedsocket::builder()` to
    /// create a client.
    pub(crate) async fn new(config: ClientConfig<P>) -> Result<Self> {
        let config = Arc::new(config);
        let state = Arc::new(AtomicConnectionState::new(ConnectionState::Closed));
        let metrics = Arc::new(AtomicMetrics::new());
        let shutdown_flag = Arc::clone(&config.shutdown_flag);

        let (command_tx, command_rx) = unbounded();
        let (event_tx, event_rx) = unbounded();

        let task_handle = {
            let config = Arc::clone(&config);
            let state = Arc::clone(&state);
            let metrics = Arc::clone(&metrics);

            tokio::spawn(async move {
                run_client(config, state, metrics, command_rx, event_tx).await;
            })
        };

        Ok(Self {
            config,
            state,
            metrics,
            command_tx,
            event_rx,
            task_handle: Some(task_handle),
            shutdown_flag,
        })
    }

    /// Send a message through the feed connection
    ///
    /// Queued (FIFO) while the connection is not Open; nothing is ever
    /// physically written on a closed socket.
    pub fn send(&self, message: WsMessage) -> Result<()> {
        self.command_tx
            .send(ClientCommand::Send(message))
            .map_err(|e| FeedSocketError::ChannelSend(e.to_string()))
    }

    /// Send a subscription command and track it under `key`
    ///
    /// Tracked subscriptions are replayed in original subscription
    /// order on every reconnect.
    pub fn subscribe(&self, key: impl Into<String>, message: WsMessage) -> Result<()> {
        self.command_tx
            .send(ClientCommand::Subscribe {
                key: key.into(),
                message,
            })
            .map_err(|e| FeedSocketError::ChannelSend(e.to_string()))
    }

    /// Send an unsubscription command and stop tracking `key`
    pub fn unsubscribe(&self, key: impl Into<String>, message: WsMessage) -> Result<()> {
        self.command_tx
            .send(ClientCommand::Unsubscribe {
                key: key.into(),
                message,
            })
            .map_err(|e| FeedSocketError::ChannelSend(e.to_string()))
    }

    /// Get current connection state
    #[inline]
    pub fn connection_state(&self) -> ConnectionState {
        self.state.get()
    }

    /// Check if the connection is open
    #[inline]
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Get current metrics
    pub fn metrics(&self) -> Metrics {
        Metrics {
            messages_sent: self.metrics.messages_sent(),
            messages_received: self.metrics.messages_received(),
            reconnect_count: self.metrics.reconnect_count(),
            connection_state: self.state.get(),
        }
    }

    /// Try to receive an event (non-blocking)
    pub fn try_recv_event(&self) -> Option<ClientEvent<P::Event>> {
        self.event_rx.try_recv().ok()
    }

    /// Receive an event (blocking)
    ///
    /// Returns an error once the client task has exited and the channel
    /// drained.
    pub fn recv_event(&self) -> Result<ClientEvent<P::Event>> {
        self.event_rx
            .recv()
            .map_err(|e| FeedSocketError::ChannelReceive(e.to_string()))
    }

    /// Receive an event, waiting at most `timeout`
    pub fn recv_event_timeout(&self, timeout: Duration) -> Option<ClientEvent<P::Event>> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Get a reference to the shutdown flag
    ///
    /// External code can trigger teardown by storing `false`; the flag
    /// is checked before each reconnection attempt and during delay
    /// sleeps.
    pub fn shutdown_flag(&self) -> &Arc<AtomicBool> {
        &self.shutdown_flag
    }

    /// Shutdown the client
    pub async fn shutdown(mut self) -> Result<()> {
        info!("Shutting down feed client");

        // Prevent any further reconnection attempt
        self.shutdown_flag.store(false, Ordering::Release);

        // Wake the message loop if a connection is currently open
        let _ = self.command_tx.send(ClientCommand::Shutdown);

        if let Some(handle) = self.task_handle.take() {
            let _ = handle.await;
        }

        info!("Feed client shut down");
        Ok(())
    }
}

/// Main client task loop
///
/// Cycles `Closed -> Connecting -> Open -> Closed -> ...` until the
/// shutdown flag is lowered or the strategy gives up.
async fn run_client<P>(
    config: Arc<ClientConfig<P>>,
    state: Arc<AtomicConnectionState>,
    metrics: Arc<AtomicMetrics>,
    command_rx: Receiver<ClientCommand>,
    event_tx: Sender<ClientEvent<P::Event>>,
) where
    P: FeedParser,
{
    let mut reconnect_attempt = 0;
    // Active subscriptions in original subscription order; replayed on
    // every reconnect so the feed's server-side state is restored.
    let mut subscriptions: Vec<(String, WsMessage)> = Vec::new();
    let shutdown_flag = &config.shutdown_flag;

    loop {
        if !shutdown_flag.load(Ordering::Acquire) {
            debug!("Shutdown flag lowered, exiting main loop");
            break;
        }

        state.set(ConnectionState::Connecting);
        if reconnect_attempt > 0 {
            let _ = event_tx.send(ClientEvent::Reconnecting(reconnect_attempt));
        }

        match connect_async(&config.url).await {
            Ok((ws_stream, _)) => {
                info!("Connected to {}", config.url);
                state.set(ConnectionState::Open);
                let _ = event_tx.send(ClientEvent::Opened);

                reconnect_attempt = 0;

                if let Err(e) = handle_connection(
                    ws_stream,
                    &config,
                    &metrics,
                    &command_rx,
                    &event_tx,
                    &mut subscriptions,
                )
                .await
                {
                    error!("Connection error: {}", e);
                    let _ = event_tx.send(ClientEvent::Error(e.to_string()));
                }

                state.set(ConnectionState::Closed);
                let _ = event_tx.send(ClientEvent::Closed);
            }
            Err(e) => {
                warn!("Failed to connect: {}", e);
                let _ = event_tx.send(ClientEvent::Error(e.to_string()));
                state.set(ConnectionState::Closed);
            }
        }

        if !shutdown_flag.load(Ordering::Acquire) {
            debug!("Shutdown flag lowered after connection, stopping");
            break;
        }

        match config.reconnect_strategy.next_delay(reconnect_attempt) {
            Some(delay) => {
                info!(
                    "Reconnecting in {:?} (attempt {})",
                    delay,
                    reconnect_attempt + 1
                );
                if !sleep_checking_shutdown(delay, shutdown_flag).await {
                    break;
                }
                reconnect_attempt += 1;
                metrics.increment_reconnects();
            }
            None => {
                warn!("Reconnection strategy exhausted, stopping");
                break;
            }
        }
    }

    state.set(ConnectionState::Closed);
    info!("Client task exiting");
}

/// Sleep in slices, checking the shutdown flag between them
///
/// Returns false if shutdown was requested during the sleep.
async fn sleep_checking_shutdown(duration: Duration, shutdown_flag: &Arc<AtomicBool>) -> bool {
    let check_interval = Duration::from_millis(100);
    let mut elapsed = Duration::ZERO;

    while elapsed < duration {
        if !shutdown_flag.load(Ordering::Acquire) {
            debug!("Shutdown flag lowered during reconnect delay");
            return false;
        }

        let sleep_time = std::cmp::min(check_interval, duration - elapsed);
        tokio::time::sleep(sleep_time).await;
        elapsed += sleep_time;
    }

    true
}

/// Handle an active connection: probe, replay, heartbeat, message loop
async fn handle_connection<P>(
    ws_stream: WsStream,
    config: &Arc<ClientConfig<P>>,
    metrics: &Arc<AtomicMetrics>,
    command_rx: &Receiver<ClientCommand>,
    event_tx: &Sender<ClientEvent<P::Event>>,
    subscriptions: &mut Vec<(String, WsMessage)>,
) -> Result<()>
where
    P: FeedParser,
{
    let (mut write, mut read) = ws_stream.split();

    // Liveness probe goes out first on every transition to Open
    if let Some(ref probe) = config.open_probe {
        write
            .send(ws_message_to_tungstenite(probe))
            .await
            .map_err(|e| FeedSocketError::WebSocket(format!("Failed to send probe: {}", e)))?;
        metrics.increment_sent();
        debug!("Sent open probe");
    }

    // Replay active subscriptions in original subscription order
    for (key, message) in subscriptions.iter() {
        write
            .send(ws_message_to_tungstenite(message))
            .await
            .map_err(|e| {
                FeedSocketError::WebSocket(format!("Failed to replay subscription: {}", e))
            })?;
        metrics.increment_sent();
        debug!("Replayed subscription for {}", key);
    }

    // Spawn heartbeat task if configured
    let heartbeat_handle = if let Some((interval, payload)) = &config.heartbeat {
        let (handle, shutdown_tx, heartbeat_rx) =
            crate::heartbeat::spawn_heartbeat(*interval, payload.clone());
        Some((handle, shutdown_tx, heartbeat_rx))
    } else {
        None
    };

    let result = message_loop(
        &mut write,
        &mut read,
        config,
        metrics,
        command_rx,
        event_tx,
        heartbeat_handle.as_ref().map(|(_, _, rx)| rx),
        subscriptions,
    )
    .await;

    // Stop the heartbeat task; it exits cleanly via its signal check
    if let Some((_handle, shutdown_tx, _)) = heartbeat_handle {
        let _ = shutdown_tx.send(());
    }

    result
}

/// Main message processing loop for one open connection
#[allow(clippy::too_many_arguments)]
async fn message_loop<P>(
    write: &mut SplitSink<WsStream, Message>,
    read: &mut SplitStream<WsStream>,
    config: &Arc<ClientConfig<P>>,
    metrics: &Arc<AtomicMetrics>,
    command_rx: &Receiver<ClientCommand>,
    event_tx: &Sender<ClientEvent<P::Event>>,
    heartbeat_rx: Option<&Receiver<WsMessage>>,
    subscriptions: &mut Vec<(String, WsMessage)>,
) -> Result<()>
where
    P: FeedParser,
{
    let shutdown_flag = &config.shutdown_flag;

    loop {
        if !shutdown_flag.load(Ordering::Acquire) {
            debug!("Shutdown flag detected in message loop, closing connection");
            let _ = write.close().await;
            return Ok(());
        }

        tokio::select! {
            // Incoming frames
            msg = read.next() => {
                match msg {
                    Some(Ok(msg)) => {
                        metrics.increment_received();

                        match msg {
                            Message::Text(text) => {
                                dispatch_frame(config, event_tx, WsMessage::Text(text)).await;
                            }
                            Message::Binary(data) => {
                                dispatch_frame(config, event_tx, WsMessage::Binary(data)).await;
                            }
                            Message::Ping(data) => {
                                let _ = write.send(Message::Pong(data)).await;
                            }
                            Message::Close(_) => {
                                debug!("Server closed the connection");
                                return Ok(());
                            }
                            _ => {} // Pong, raw frames - ignore
                        }
                    }
                    Some(Err(e)) => {
                        error!("WebSocket error: {}", e);
                        return Err(FeedSocketError::WebSocket(e.to_string()));
                    }
                    None => {
                        warn!("WebSocket stream closed");
                        return Err(FeedSocketError::ConnectionClosed("Stream ended".into()));
                    }
                }
            }

            // Commands (blocking receiver polled off the async thread)
            cmd = async {
                let rx = command_rx.clone();
                tokio::task::spawn_blocking(move || {
                    rx.recv_timeout(Duration::from_millis(100))
                }).await.ok()
            } => {
                match cmd {
                    Some(Ok(ClientCommand::Send(message))) => {
                        write.send(ws_message_to_tungstenite(&message)).await.map_err(|e| {
                            FeedSocketError::WebSocket(e.to_string())
                        })?;
                        metrics.increment_sent();
                    }
                    Some(Ok(ClientCommand::Subscribe { key, message })) => {
                        if !subscriptions.iter().any(|(k, _)| k == &key) {
                            subscriptions.push((key, message.clone()));
                        }
                        write.send(ws_message_to_tungstenite(&message)).await.map_err(|e| {
                            FeedSocketError::WebSocket(e.to_string())
                        })?;
                        metrics.increment_sent();
                    }
                    Some(Ok(ClientCommand::Unsubscribe { key, message })) => {
                        subscriptions.retain(|(k, _)| k != &key);
                        write.send(ws_message_to_tungstenite(&message)).await.map_err(|e| {
                            FeedSocketError::WebSocket(e.to_string())
                        })?;
                        metrics.increment_sent();
                    }
                    Some(Ok(ClientCommand::Shutdown)) => {
                        info!("Received shutdown command");
                        let _ = write.close().await;
                        return Ok(());
                    }
                    Some(Err(crossbeam_channel::RecvTimeoutError::Timeout)) => {
                        // Timeout is normal, continue the loop
                    }
                    Some(Err(crossbeam_channel::RecvTimeoutError::Disconnected)) | None => {
                        debug!("Command channel closed");
                        let _ = write.close().await;
                        return Ok(());
                    }
                }
            }

            // Heartbeat payloads from the dedicated heartbeat task
            hb = async {
                if let Some(rx) = heartbeat_rx {
                    let rx = rx.clone();
                    tokio::task::spawn_blocking(move || {
                        rx.recv_timeout(Duration::from_millis(100))
                    }).await.ok().and_then(|r| r.ok())
                } else {
                    std::future::pending().await
                }
            } => {
                if let Some(message) = hb {
                    debug!("Heartbeat tick - sending payload");
                    write.send(ws_message_to_tungstenite(&message)).await.map_err(|e| {
                        FeedSocketError::WebSocket(format!("Failed to send heartbeat: {}", e))
                    })?;
                    metrics.increment_sent();
                }
            }
        }
    }
}

/// Parse one frame and emit it; unparseable frames are dropped silently
async fn dispatch_frame<P>(
    config: &Arc<ClientConfig<P>>,
    event_tx: &Sender<ClientEvent<P::Event>>,
    message: WsMessage,
) where
    P: FeedParser,
{
    match config.parser.parse(message).await {
        Ok(event) => {
            let _ = event_tx.send(ClientEvent::Event(event));
        }
        Err(e) => {
            // Malformed frames never tear down the client
            debug!("Dropping unparseable frame: {}", e);
        }
    }
}

/// Convert WsMessage to tungstenite Message
fn ws_message_to_tungstenite(message: &WsMessage) -> Message {
    match message {
        WsMessage::Text(text) => Message::Text(text.clone()),
        WsMessage::Binary(data) => Message::Binary(data.clone()),
    }
}
