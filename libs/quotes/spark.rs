//! Pure render math: sparkline geometry and price/delta formatting
//!
//! Nothing here touches a drawing surface; the view layer decides how
//! the polyline and strings end up on screen.

/// Compute the sparkline polyline for a price window
///
/// Maps `prices` (arrival order) onto a `width` x `height` surface:
/// x spreads points evenly left to right, y normalizes into the
/// window's `[min, max]` with higher prices closer to y = 0.
///
/// A single point lands at x = 0; a flat series falls back to a range
/// of 1 so nothing divides by zero. Empty input produces no points.
pub fn sparkline_points(prices: &[f64], width: f64, height: f64) -> Vec<(f64, f64)> {
    if prices.is_empty() {
        return Vec::new();
    }

    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = if max - min == 0.0 { 1.0 } else { max - min };
    let denominator = if prices.len() > 1 {
        (prices.len() - 1) as f64
    } else {
        1.0
    };

    prices
        .iter()
        .enumerate()
        .map(|(i, price)| {
            let x = i as f64 / denominator * width;
            let y = height - (price - min) / range * height;
            (x, y)
        })
        .collect()
}

/// Format a price for the card header
pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// Format the signed delta and percentage against the baseline
///
/// `format_delta(100.0, 105.0)` -> `"+5.00 (5.00%)"`
/// `format_delta(100.0, 95.0)`  -> `"-5.00 (-5.00%)"`
pub fn format_delta(baseline: f64, price: f64) -> String {
    let diff = price - baseline;
    let pct = if baseline == 0.0 {
        0.0
    } else {
        diff / baseline * 100.0
    };
    let sign = if diff >= 0.0 { "+" } else { "" };
    format!("{}{:.2} ({:.2}%)", sign, diff, pct)
}

/// Whether the move against the baseline counts as a gain (colors the
/// delta; a flat move shows as a gain, matching the "+" sign)
pub fn is_gain(baseline: f64, price: f64) -> bool {
    price - baseline >= 0.0
}
