//! Same-key debouncing.

use std::time::{Duration, Instant};

use crate::key::Key;

/// Presses of the same key closer together than this are dropped.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Drops rapid repeats of the same key.
///
/// Only accepted presses are recorded, so a held key produces at most one
/// press per window.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    last: Option<(Key, Instant)>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    #[inline]
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whether a press of `key` at `now` should be processed.
    ///
    /// Records the press when accepted.
    pub fn accept(&mut self, key: Key, now: Instant) -> bool {
        if let Some((last_key, last_at)) = self.last
            && last_key == key
            && now.saturating_duration_since(last_at) < self.window
        {
            return false;
        }
        self.last = Some((key, now));
        true
    }

    /// Forget the last accepted press.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Key = Key::Character('a');
    const B: Key = Key::Character('b');

    #[test]
    fn test_same_key_within_window_is_dropped() {
        let mut debouncer = Debouncer::default();
        let start = Instant::now();
        assert!(debouncer.accept(A, start));
        assert!(!debouncer.accept(A, start + Duration::from_millis(99)));
    }

    #[test]
    fn test_same_key_after_window_is_accepted() {
        let mut debouncer = Debouncer::default();
        let start = Instant::now();
        assert!(debouncer.accept(A, start));
        assert!(debouncer.accept(A, start + Duration::from_millis(100)));
    }

    #[test]
    fn test_different_key_is_accepted() {
        let mut debouncer = Debouncer::default();
        let start = Instant::now();
        assert!(debouncer.accept(A, start));
        assert!(debouncer.accept(B, start + Duration::from_millis(1)));
        assert!(debouncer.accept(A, start + Duration::from_millis(2)));
    }

    #[test]
    fn test_dropped_press_does_not_extend_window() {
        let mut debouncer = Debouncer::default();
        let start = Instant::now();
        assert!(debouncer.accept(A, start));
        assert!(!debouncer.accept(A, start + Duration::from_millis(60)));
        assert!(debouncer.accept(A, start + Duration::from_millis(110)));
    }

    #[test]
    fn test_reset() {
        let mut debouncer = Debouncer::new(Duration::from_secs(1));
        let start = Instant::now();
        assert!(debouncer.accept(A, start));
        debouncer.reset();
        assert!(debouncer.accept(A, start));
        assert_eq!(debouncer.window(), Duration::from_secs(1));
    }
}
