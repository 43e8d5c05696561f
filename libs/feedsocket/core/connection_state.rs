//! Atomic connection state and counters
//!
//! The connection state cell is written by the client task and read by
//! whatever thread renders it, so both live behind atomics rather than
//! locks.

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};

/// Connection lifecycle state
///
/// The client cycles `Closed -> Connecting -> Open -> Closed -> ...`
/// for the lifetime of the process; there is no terminal state unless
/// the shutdown flag is lowered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No connection and no attempt in flight
    Closed,
    /// Connection attempt in flight
    Connecting,
    /// Connected; outbound frames are physically written
    Open,
}

impl ConnectionState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => ConnectionState::Connecting,
            2 => ConnectionState::Open,
            _ => ConnectionState::Closed,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            ConnectionState::Closed => 0,
            ConnectionState::Connecting => 1,
            ConnectionState::Open => 2,
        }
    }
}

/// Lock-free connection state cell
pub struct AtomicConnectionState {
    state: AtomicU8,
}

impl AtomicConnectionState {
    pub fn new(initial: ConnectionState) -> Self {
        Self {
            state: AtomicU8::new(initial.as_u8()),
        }
    }

    #[inline]
    pub fn get(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    #[inline]
    pub fn set(&self, state: ConnectionState) {
        self.state.store(state.as_u8(), Ordering::Release);
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.get() == ConnectionState::Open
    }
}

/// Lock-free client counters
#[derive(Default)]
pub struct AtomicMetrics {
    messages_sent: AtomicU64,
    messages_received: AtomicU64,
    reconnect_count: AtomicU64,
}

impl AtomicMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn increment_sent(&self) {
        self.messages_sent.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn increment_received(&self) {
        self.messages_received.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn increment_reconnects(&self) {
        self.reconnect_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn messages_sent(&self) -> u64 {
        self.messages_sent.load(Ordering::Relaxed)
    }

    pub fn messages_received(&self) -> u64 {
        self.messages_received.load(Ordering::Relaxed)
    }

    pub fn reconnect_count(&self) -> u64 {
        self.reconnect_count.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_round_trips_through_atomic_cell() {
        let cell = AtomicConnectionState::new(ConnectionState::Closed);
        assert_eq!(cell.get(), ConnectionState::Closed);
        assert!(!cell.is_open());

        cell.set(ConnectionState::Connecting);
        assert_eq!(cell.get(), ConnectionState::Connecting);

        cell.set(ConnectionState::Open);
        assert!(cell.is_open());

        cell.set(ConnectionState::Closed);
        assert_eq!(cell.get(), ConnectionState::Closed);
    }

    #[test]
    fn metrics_count_independently() {
        let metrics = AtomicMetrics::new();
        metrics.increment_sent();
        metrics.increment_sent();
        metrics.increment_received();
        metrics.increment_reconnects();

        assert_eq!(metrics.messages_sent(), 2);
        assert_eq!(metrics.messages_received(), 1);
        assert_eq!(metrics.reconnect_count(), 1);
    }
}
