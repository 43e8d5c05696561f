//! Heartbeat mechanism for feed connections
//!
//! A dedicated Tokio task ticks on the configured interval and pushes
//! the heartbeat payload through an unbounded crossbeam channel; the
//! main message loop picks it up and writes it to the socket. The task
//! is spawned when a connection opens and torn down when it closes, so
//! heartbeats are never queued while disconnected.

use crate::traits::WsMessage;
use crossbeam_channel::{Receiver, Sender};
use std::time::Duration;
use tracing::debug;

/// Heartbeat task that sends periodic messages
///
/// The task will:
/// 1. Wait for the first interval (skips the immediate first tick)
/// 2. On each tick, send the payload through the channel
/// 3. Continue until shutdown signal received or channel closed
pub async fn heartbeat_task(
    interval: Duration,
    payload: WsMessage,
    heartbeat_tx: Sender<WsMessage>,
    shutdown_rx: Receiver<()>,
) {
    let mut ticker = tokio::time::interval(interval);
    // Skip the first immediate tick - wait for the first interval
    ticker.tick().await;
    // If we miss ticks due to slow processing, skip them rather than bursting
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    debug!("Heartbeat task started with interval: {:?}", interval);

    loop {
        match shutdown_rx.try_recv() {
            Ok(_) => {
                debug!("Heartbeat task received shutdown signal");
                break;
            }
            Err(crossbeam_channel::TryRecvError::Disconnected) => {
                debug!("Heartbeat shutdown channel disconnected");
                break;
            }
            Err(crossbeam_channel::TryRecvError::Empty) => {
                // No shutdown signal, continue
            }
        }

        ticker.tick().await;

        if heartbeat_tx.send(payload.clone()).is_err() {
            debug!("Heartbeat channel closed, shutting down heartbeat task");
            break;
        }
    }

    debug!("Heartbeat task exiting");
}

/// Spawn a heartbeat task
///
/// Returns channels for receiving heartbeat messages and shutting down the task
pub fn spawn_heartbeat(
    interval: Duration,
    payload: WsMessage,
) -> (tokio::task::JoinHandle<()>, Sender<()>, Receiver<WsMessage>) {
    let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded(1);
    let (heartbeat_tx, heartbeat_rx) = crossbeam_channel::unbounded();

    let handle = tokio::spawn(async move {
        heartbeat_task(interval, payload, heartbeat_tx, shutdown_rx).await;
    });

    (handle, shutdown_tx, heartbeat_rx)
}
