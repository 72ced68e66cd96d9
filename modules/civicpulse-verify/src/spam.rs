//! Per-reporter submission rate limiting.
//!
//! Sliding one-hour window, re-derived from stored submission timestamps
//! at every check — no counter or bucket persists between calls.

use chrono::{DateTime, Duration, Utc};

/// Trailing window over which submissions are counted.
pub fn spam_window() -> Duration {
    Duration::hours(1)
}

/// Start of the window as of `now`.
pub fn window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - spam_window()
}

/// A reporter at or over the threshold within the window is blocked.
pub fn is_spamming(recent_count: u32, threshold: u32) -> bool {
    recent_count >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_one_hour_before_now() {
        let now = Utc::now();
        assert_eq!(now - window_start(now), Duration::hours(1));
    }

    #[test]
    fn at_threshold_blocked() {
        assert!(is_spamming(5, 5));
    }

    #[test]
    fn below_threshold_allowed() {
        assert!(!is_spamming(4, 5));
    }

    #[test]
    fn above_threshold_blocked() {
        assert!(is_spamming(9, 5));
    }
}
