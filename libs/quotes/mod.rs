//! # Quotes
//!
//! Market-quote domain for the quotedeck viewer:
//!
//! - **window**: bounded per-symbol price history (FIFO, 30 entries)
//! - **registry**: symbol -> live quote state, idempotent subscribe
//! - **spark**: pure sparkline geometry and price/delta formatting
//! - **feed**: wire envelopes and the feed parser for the stream client
//! - **presets**: built-in quick-subscribe shortcuts
//! - **config**: viewer configuration (YAML + env override)
//! - **viewer**: ratatui application binding it all to quote cards

pub mod config;
pub mod error;
pub mod feed;
pub mod presets;
pub mod registry;
pub mod spark;
pub mod viewer;
pub mod window;

pub use config::ViewerConfig;
pub use error::{QuotesError, Result};
pub use feed::{build_feed_client, Command, FeedEvent, FeedLink, QuoteParser, TradePayload};
pub use presets::{Preset, PRESETS};
pub use registry::{QuoteRegistry, QuoteState, SubscribeOutcome, UnsubscribeOutcome};
pub use spark::{format_delta, format_price, is_gain, sparkline_points};
pub use viewer::App;
pub use window::{SlidingWindow, DEFAULT_WINDOW_CAPACITY};
