//! Common test utilities for feedsocket integration tests
//!
//! Provides a mock WebSocket server that records every text frame it
//! receives, per connection, and can drop its connections on demand to
//! exercise the reconnect path.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::Notify;

/// A mock WebSocket server for testing
///
/// Every accepted connection gets its own frame log; `received()`
/// returns a snapshot of all logs in connection order.
pub struct MockWsServer {
    pub addr: SocketAddr,
    shutdown: Arc<Notify>,
    drop_conns: Arc<Notify>,
    received: Arc<Mutex<Vec<Vec<String>>>>,
    connections: Arc<AtomicUsize>,
}

impl MockWsServer {
    /// Create and start a new mock WebSocket server
    pub async fn start() -> Self {
        Self::start_with_greeting(None).await
    }

    /// Start a server that sends `greeting` as a text frame on accept
    pub async fn start_with_greeting(greeting: Option<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(Notify::new());
        let drop_conns = Arc::new(Notify::new());
        let received: Arc<Mutex<Vec<Vec<String>>>> = Arc::new(Mutex::new(Vec::new()));
        let connections = Arc::new(AtomicUsize::new(0));

        let shutdown_accept = shutdown.clone();
        let drop_accept = drop_conns.clone();
        let received_accept = received.clone();
        let connections_accept = connections.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    result = listener.accept() => {
                        match result {
                            Ok((stream, _)) => {
                                let index = {
                                    let mut logs = received_accept.lock().unwrap();
                                    logs.push(Vec::new());
                                    logs.len() - 1
                                };
                                connections_accept.fetch_add(1, Ordering::SeqCst);

                                let drop_conns = drop_accept.clone();
                                let received = received_accept.clone();
                                let greeting = greeting.clone();
                                tokio::spawn(async move {
                                    Self::handle_connection(stream, drop_conns, received, index, greeting).await;
                                });
                            }
                            Err(e) => {
                                eprintln!("Accept error: {}", e);
                                break;
                            }
                        }
                    }
                    _ = shutdown_accept.notified() => {
                        break;
                    }
                }
            }
        });

        Self {
            addr,
            shutdown,
            drop_conns,
            received,
            connections,
        }
    }

    async fn handle_connection(
        stream: tokio::net::TcpStream,
        drop_conns: Arc<Notify>,
        received: Arc<Mutex<Vec<Vec<String>>>>,
        index: usize,
        greeting: Option<String>,
    ) {
        use futures::{SinkExt, StreamExt};
        use tokio_tungstenite::accept_async;
        use tokio_tungstenite::tungstenite::Message;

        let ws_stream = match accept_async(stream).await {
            Ok(ws) => ws,
            Err(e) => {
                eprintln!("WebSocket handshake failed: {}", e);
                return;
            }
        };

        let (mut write, mut read) = ws_stream.split();

        if let Some(text) = greeting {
            if write.send(Message::Text(text)).await.is_err() {
                return;
            }
        }

        loop {
            tokio::select! {
                msg = read.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            received.lock().unwrap()[index].push(text);
                        }
                        Some(Ok(Message::Ping(data))) => {
                            if write.send(Message::Pong(data)).await.is_err() {
                                break;
                            }
                        }
                        Some(Ok(Message::Close(_))) => break,
                        Some(Ok(_)) => {}
                        Some(Err(_)) | None => break,
                    }
                }
                _ = drop_conns.notified() => {
                    // Hard drop, no close handshake
                    break;
                }
            }
        }
    }

    /// Get the WebSocket URL for this server
    pub fn ws_url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Snapshot of recorded text frames, one log per accepted connection
    pub fn received(&self) -> Vec<Vec<String>> {
        self.received.lock().unwrap().clone()
    }

    /// Number of connections accepted so far
    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    /// Drop all live connections (the listener keeps accepting)
    pub fn drop_connections(&self) {
        self.drop_conns.notify_waiters();
    }

    /// Shutdown the server
    pub fn shutdown(&self) {
        self.shutdown.notify_waiters();
        self.drop_conns.notify_waiters();
    }
}

impl Drop for MockWsServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
