//! Subscription registry
//!
//! Owns the live state for every subscribed symbol. One entry per
//! symbol; entries are created exactly on subscribe and destroyed
//! exactly on unsubscribe. The registry itself sends nothing - its
//! outcome values tell the caller which feed command to issue, which
//! keeps it testable without a connection.

use crate::window::{SlidingWindow, DEFAULT_WINDOW_CAPACITY};
use std::collections::HashMap;
use tracing::debug;

/// Live state for one subscribed symbol
#[derive(Debug, Clone)]
pub struct QuoteState {
    symbol: String,
    last: Option<f64>,
    prev: Option<f64>,
    window: SlidingWindow,
}

impl QuoteState {
    fn new(symbol: String, window_capacity: usize) -> Self {
        Self {
            symbol,
            last: None,
            prev: None,
            window: SlidingWindow::new(window_capacity),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Most recent trade price, if any trade arrived yet
    pub fn last_price(&self) -> Option<f64> {
        self.last
    }

    /// Baseline for the displayed delta
    ///
    /// Equals the incoming price on the very first trade, so the
    /// initial delta is zero.
    pub fn baseline(&self) -> Option<f64> {
        self.prev
    }

    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }

    fn apply(&mut self, price: f64) {
        self.prev = Some(self.last.unwrap_or(price));
        self.last = Some(price);
        self.window.push(price);
    }
}

/// Result of a subscribe call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscribeOutcome {
    /// New entry created; the caller should send one subscribe command
    Added,
    /// Entry already existed; nothing to send (idempotent)
    AlreadySubscribed,
    /// Input did not normalize to a usable symbol; nothing happened
    Rejected,
}

/// Result of an unsubscribe call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsubscribeOutcome {
    /// Entry removed; the caller should send the unsubscribe command
    Removed {
        /// True when this was the last entry (empty placeholder time)
        now_empty: bool,
    },
    /// Symbol was never subscribed; nothing happened
    NotSubscribed,
}

/// Mapping from symbol to its live quote state
///
/// Card order is newest subscription first.
#[derive(Debug)]
pub struct QuoteRegistry {
    quotes: HashMap<String, QuoteState>,
    order: Vec<String>,
    window_capacity: usize,
}

impl QuoteRegistry {
    pub fn new() -> Self {
        Self::with_window_capacity(DEFAULT_WINDOW_CAPACITY)
    }

    pub fn with_window_capacity(window_capacity: usize) -> Self {
        Self {
            quotes: HashMap::new(),
            order: Vec::new(),
            window_capacity,
        }
    }

    /// Canonical form of a symbol: trimmed, uppercase
    pub fn normalize(symbol: &str) -> String {
        symbol.trim().to_uppercase()
    }

    /// Subscribe a symbol, creating its quote state
    ///
    /// Idempotent: a second subscribe for the same symbol is a no-op
    /// and reports `AlreadySubscribed` so no duplicate command is sent.
    pub fn subscribe(&mut self, symbol: &str) -> SubscribeOutcome {
        let key = Self::normalize(symbol);
        if key.is_empty() {
            return SubscribeOutcome::Rejected;
        }
        if self.quotes.contains_key(&key) {
            return SubscribeOutcome::AlreadySubscribed;
        }

        debug!(symbol = %key, "Subscribing");
        self.quotes
            .insert(key.clone(), QuoteState::new(key.clone(), self.window_capacity));
        self.order.insert(0, key);
        SubscribeOutcome::Added
    }

    /// Unsubscribe a symbol, destroying its quote state
    pub fn unsubscribe(&mut self, symbol: &str) -> UnsubscribeOutcome {
        let key = Self::normalize(symbol);
        if self.quotes.remove(&key).is_none() {
            return UnsubscribeOutcome::NotSubscribed;
        }

        debug!(symbol = %key, "Unsubscribing");
        self.order.retain(|s| s != &key);
        UnsubscribeOutcome::Removed {
            now_empty: self.quotes.is_empty(),
        }
    }

    /// Apply a trade to a subscribed symbol
    ///
    /// Returns false without touching anything when the symbol is not
    /// subscribed - late events after an unsubscribe are dropped and
    /// never resurrect state.
    pub fn apply_trade(&mut self, symbol: &str, price: f64) -> bool {
        let key = Self::normalize(symbol);
        match self.quotes.get_mut(&key) {
            Some(state) => {
                state.apply(price);
                true
            }
            None => {
                debug!(symbol = %key, "Dropping trade for unsubscribed symbol");
                false
            }
        }
    }

    pub fn get(&self, symbol: &str) -> Option<&QuoteState> {
        self.quotes.get(&Self::normalize(symbol))
    }

    /// Subscribed symbols, newest subscription first
    pub fn symbols(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl Default for QuoteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_is_idempotent() {
        let mut registry = QuoteRegistry::new();

        assert_eq!(registry.subscribe("AAPL"), SubscribeOutcome::Added);
        assert_eq!(registry.subscribe("AAPL"), SubscribeOutcome::AlreadySubscribed);
        // Same symbol through normalization
        assert_eq!(registry.subscribe(" aapl "), SubscribeOutcome::AlreadySubscribed);

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn blank_input_is_rejected() {
        let mut registry = QuoteRegistry::new();

        assert_eq!(registry.subscribe(""), SubscribeOutcome::Rejected);
        assert_eq!(registry.subscribe("   "), SubscribeOutcome::Rejected);
        assert!(registry.is_empty());
    }

    #[test]
    fn newest_subscription_comes_first() {
        let mut registry = QuoteRegistry::new();
        registry.subscribe("AAPL");
        registry.subscribe("MSFT");
        registry.subscribe("TSLA");

        assert_eq!(registry.symbols(), &["TSLA", "MSFT", "AAPL"]);
    }

    #[test]
    fn first_trade_has_zero_delta_baseline() {
        let mut registry = QuoteRegistry::new();
        registry.subscribe("AAPL");

        assert!(registry.apply_trade("AAPL", 100.0));
        let state = registry.get("AAPL").unwrap();
        assert_eq!(state.last_price(), Some(100.0));
        assert_eq!(state.baseline(), Some(100.0));

        registry.apply_trade("AAPL", 105.0);
        let state = registry.get("AAPL").unwrap();
        assert_eq!(state.last_price(), Some(105.0));
        assert_eq!(state.baseline(), Some(100.0));
    }

    #[test]
    fn trade_for_unsubscribed_symbol_is_a_noop() {
        let mut registry = QuoteRegistry::new();
        registry.subscribe("AAPL");
        registry.apply_trade("AAPL", 100.0);

        assert!(!registry.apply_trade("MSFT", 50.0));

        assert_eq!(registry.len(), 1);
        let state = registry.get("AAPL").unwrap();
        assert_eq!(state.last_price(), Some(100.0));
        assert_eq!(state.window().len(), 1);
    }

    #[test]
    fn late_trade_after_unsubscribe_does_not_resurrect() {
        let mut registry = QuoteRegistry::new();
        registry.subscribe("AAPL");
        registry.unsubscribe("AAPL");

        assert!(!registry.apply_trade("AAPL", 100.0));
        assert!(registry.is_empty());
    }

    #[test]
    fn window_stays_bounded_under_many_trades() {
        let mut registry = QuoteRegistry::with_window_capacity(30);
        registry.subscribe("AAPL");

        for i in 0..100 {
            registry.apply_trade("AAPL", i as f64);
        }

        let window = registry.get("AAPL").unwrap().window();
        assert_eq!(window.len(), 30);
        // Oldest evicted first
        assert_eq!(window.iter().next(), Some(70.0));
        assert_eq!(window.iter().last(), Some(99.0));
    }

    #[test]
    fn unsubscribing_last_symbol_reports_empty() {
        let mut registry = QuoteRegistry::new();
        registry.subscribe("AAPL");
        registry.subscribe("MSFT");

        assert_eq!(
            registry.unsubscribe("AAPL"),
            UnsubscribeOutcome::Removed { now_empty: false }
        );
        assert_eq!(
            registry.unsubscribe("MSFT"),
            UnsubscribeOutcome::Removed { now_empty: true }
        );
        assert_eq!(
            registry.unsubscribe("MSFT"),
            UnsubscribeOutcome::NotSubscribed
        );
    }

    #[test]
    fn resubscribing_starts_from_a_clean_state() {
        let mut registry = QuoteRegistry::new();
        registry.subscribe("AAPL");
        registry.apply_trade("AAPL", 100.0);
        registry.unsubscribe("AAPL");

        assert_eq!(registry.subscribe("AAPL"), SubscribeOutcome::Added);
        let state = registry.get("AAPL").unwrap();
        assert_eq!(state.last_price(), None);
        assert!(state.window().is_empty());
    }
}
