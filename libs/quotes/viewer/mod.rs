//! Quote viewer
//!
//! Terminal UI binding registry state and stream events to a grid of
//! quote cards.

pub mod app;
pub mod ui;

pub use app::App;
