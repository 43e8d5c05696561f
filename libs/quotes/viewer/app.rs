//! Application state and logic for the quote viewer
//!
//! The `App` binds registry state and stream events to the card grid.
//! It owns view concerns only (cursors, input buffer, status line);
//! quote data lives in the registry, and every feed command goes
//! through the `FeedLink` seam so the whole thing is testable without
//! a connection.

use tracing::debug;

use crate::config::ViewerConfig;
use crate::feed::{FeedEvent, FeedLink};
use crate::presets::PRESETS;
use crate::registry::{QuoteRegistry, SubscribeOutcome, UnsubscribeOutcome};
use feedsocket::ClientEvent;

/// Main application state
pub struct App<L: FeedLink> {
    /// Stream client seam
    link: L,
    /// Subscription registry (symbol -> quote state)
    pub registry: QuoteRegistry,
    /// Feed-side connectivity, as reported by status events
    pub feed_connected: bool,
    /// Symbol input buffer
    pub input: String,
    /// Cursor into the preset sidebar
    pub preset_index: usize,
    /// Cursor into the card grid
    pub selected_card: usize,
    /// Whether to quit
    pub should_quit: bool,
    /// Transient note for the footer
    pub status_message: Option<String>,
}

impl<L: FeedLink> App<L> {
    pub fn new(link: L, config: &ViewerConfig) -> Self {
        Self {
            link,
            registry: QuoteRegistry::with_window_capacity(config.window_capacity),
            feed_connected: false,
            input: String::new(),
            preset_index: 0,
            selected_card: 0,
            should_quit: false,
            status_message: None,
        }
    }

    /// Give the link back for teardown
    pub fn into_link(self) -> L {
        self.link
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    /// Apply all pending client events
    ///
    /// Called once per frame before drawing; each event runs to
    /// completion, so nothing mutates the registry concurrently.
    pub fn drain_events(&mut self) {
        while let Some(event) = self.link.poll_event() {
            self.handle_client_event(event);
        }
    }

    fn handle_client_event(&mut self, event: ClientEvent<FeedEvent>) {
        match event {
            ClientEvent::Opened => {
                self.status_message = None;
            }
            ClientEvent::Closed => {
                // The feed indicator is meaningless without a socket
                self.feed_connected = false;
            }
            ClientEvent::Reconnecting(attempt) => {
                debug!(attempt, "Reconnecting");
            }
            ClientEvent::Error(error) => {
                debug!(error = %error, "Transport error");
            }
            ClientEvent::Event(FeedEvent::Status { connected }) => {
                self.feed_connected = connected;
            }
            ClientEvent::Event(FeedEvent::Trade { symbol, data }) => {
                if let Some(price) = data.value() {
                    self.registry.apply_trade(&symbol, price);
                }
            }
            ClientEvent::Event(FeedEvent::Pong) => {
                debug!("Feed pong");
            }
            ClientEvent::Event(FeedEvent::Subscribed { symbol }) => {
                debug!(symbol = ?symbol, "Feed acknowledged subscribe");
            }
            ClientEvent::Event(FeedEvent::Unsubscribed { symbol }) => {
                debug!(symbol = ?symbol, "Feed acknowledged unsubscribe");
            }
            ClientEvent::Event(FeedEvent::Error { message }) => {
                self.status_message =
                    Some(format!("feed: {}", message.unwrap_or_else(|| "error".into())));
            }
        }
    }

    /// Subscribe a symbol; sends exactly one subscribe command when the
    /// registry actually added it
    pub fn subscribe_symbol(&mut self, raw: &str) {
        let symbol = QuoteRegistry::normalize(raw);
        match self.registry.subscribe(&symbol) {
            SubscribeOutcome::Added => {
                if let Err(e) = self.link.send_subscribe(&symbol) {
                    debug!(symbol = %symbol, error = %e, "Subscribe command failed");
                }
                // New card is prepended
                self.selected_card = 0;
            }
            SubscribeOutcome::AlreadySubscribed => {
                debug!(symbol = %symbol, "Already subscribed");
            }
            SubscribeOutcome::Rejected => {
                // Invalid input just does not take effect
            }
        }
    }

    /// Enter: typed symbol wins, otherwise the selected preset
    pub fn submit(&mut self) {
        if self.input.trim().is_empty() {
            if let Some(preset) = PRESETS.get(self.preset_index) {
                let symbol = preset.symbol.to_string();
                self.subscribe_symbol(&symbol);
            }
        } else {
            let raw = std::mem::take(&mut self.input);
            self.subscribe_symbol(&raw);
        }
    }

    /// Remove the selected card and unsubscribe its symbol
    pub fn remove_selected(&mut self) {
        let Some(symbol) = self.registry.symbols().get(self.selected_card).cloned() else {
            return;
        };

        if let UnsubscribeOutcome::Removed { .. } = self.registry.unsubscribe(&symbol) {
            if let Err(e) = self.link.send_unsubscribe(&symbol) {
                debug!(symbol = %symbol, error = %e, "Unsubscribe command failed");
            }
        }

        let len = self.registry.len();
        if len == 0 {
            self.selected_card = 0;
        } else if self.selected_card >= len {
            self.selected_card = len - 1;
        }
    }

    pub fn push_input_char(&mut self, c: char) {
        if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
            self.input.push(c.to_ascii_uppercase());
        }
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Esc: clear the input, or quit when there is nothing to clear
    pub fn escape(&mut self) {
        if self.input.is_empty() {
            self.should_quit = true;
        } else {
            self.input.clear();
        }
    }

    pub fn next_preset(&mut self) {
        self.preset_index = (self.preset_index + 1) % PRESETS.len();
    }

    pub fn prev_preset(&mut self) {
        self.preset_index = if self.preset_index == 0 {
            PRESETS.len() - 1
        } else {
            self.preset_index - 1
        };
    }

    pub fn next_card(&mut self) {
        let len = self.registry.len();
        if len > 0 && self.selected_card + 1 < len {
            self.selected_card += 1;
        }
    }

    pub fn prev_card(&mut self) {
        if self.selected_card > 0 {
            self.selected_card -= 1;
        }
    }
}
