//! Quotedeck - Live Market Quote Viewer
//!
//! Terminal dashboard for a real-time trade feed: subscribe to ticker
//! symbols, watch live prices, signed deltas, and trend sparklines.
//!
//! ## Architecture
//!
//! - **bin_common**: shared utilities for the binaries (config paths,
//!   runner scaffolding)
//! - **quotes**: quote domain and viewer (re-exported from workspace)
//! - **feedsocket**: reconnecting WebSocket client (re-exported from
//!   workspace)

// Re-export workspace libraries for convenience
pub use feedsocket;
pub use quotes;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod cli;
    pub mod runner;

    pub use cli::{load_config_from_env, parse_args, ConfigType};
    pub use runner::{BinaryRunner, RunConfig};
}
