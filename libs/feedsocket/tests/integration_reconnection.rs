//! Integration tests for reconnection strategies
//!
//! These verify the delay schedules used by the reconnect cycle.

use feedsocket::traits::reconnect::{FixedDelay, NeverReconnect, ReconnectionStrategy};
use feedsocket::DEFAULT_RECONNECT_DELAY;
use std::time::Duration;

#[test]
fn fixed_delay_is_constant() {
    let strategy = FixedDelay::new(Duration::from_millis(750), None);

    for attempt in 0..100 {
        let delay = strategy.next_delay(attempt).unwrap();
        assert_eq!(
            delay,
            Duration::from_millis(750),
            "fixed delay should be constant"
        );
    }
}

#[test]
fn fixed_delay_unlimited_by_default_never_stops() {
    let strategy = FixedDelay::new(Duration::from_secs(2), None);

    // The always-on dashboard case: no retry ceiling
    for attempt in [0, 1, 10, 1_000, 1_000_000] {
        assert!(strategy.should_reconnect(attempt));
        assert!(strategy.next_delay(attempt).is_some());
    }
}

#[test]
fn fixed_delay_with_max_attempts() {
    let strategy = FixedDelay::new(Duration::from_millis(500), Some(3));

    assert!(strategy.next_delay(0).is_some());
    assert!(strategy.next_delay(1).is_some());
    assert!(strategy.next_delay(2).is_some());
    assert!(strategy.next_delay(3).is_none()); // 4th attempt (0-indexed)
}

#[test]
fn never_reconnect_always_fails() {
    let strategy = NeverReconnect;

    for attempt in 0..10 {
        assert!(
            strategy.next_delay(attempt).is_none(),
            "NeverReconnect should always return None"
        );
        assert!(
            !strategy.should_reconnect(attempt),
            "NeverReconnect should never allow reconnection"
        );
    }
}

#[test]
fn default_delay_is_two_seconds() {
    assert_eq!(DEFAULT_RECONNECT_DELAY, Duration::from_secs(2));
}

#[test]
fn reset_keeps_schedules_stable() {
    let mut fixed = FixedDelay::new(Duration::from_millis(500), None);
    let mut never = NeverReconnect;

    let before = fixed.next_delay(5);
    fixed.reset();
    never.reset();

    assert_eq!(fixed.next_delay(5), before);
    assert!(never.next_delay(0).is_none());
}
