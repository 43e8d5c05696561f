//! Quick-subscribe presets
//!
//! Static configuration data for the sidebar; never fetched.

/// A quick-subscribe shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub symbol: &'static str,
}

/// Built-in shortcuts shown in the sidebar
pub const PRESETS: [Preset; 10] = [
    Preset { name: "Apple Inc.", symbol: "AAPL" },
    Preset { name: "Microsoft", symbol: "MSFT" },
    Preset { name: "Amazon", symbol: "AMZN" },
    Preset { name: "Alphabet", symbol: "GOOGL" },
    Preset { name: "Meta", symbol: "META" },
    Preset { name: "Tesla", symbol: "TSLA" },
    Preset { name: "NVIDIA", symbol: "NVDA" },
    Preset { name: "Netflix", symbol: "NFLX" },
    Preset { name: "Intel", symbol: "INTC" },
    Preset { name: "IBM", symbol: "IBM" },
];
