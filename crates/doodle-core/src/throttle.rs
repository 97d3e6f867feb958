//! Pointer-move rate limiting.

use std::time::Duration;

/// Drops events that arrive sooner than `interval` after the last accepted one.
///
/// Times are supplied by the caller (a monotonic timestamp from the input source),
/// so the limiter itself never reads a clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    interval: Duration,
    last: Option<Duration>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last: None }
    }

    /// Returns `true` and records `now` if the event should be processed.
    pub fn allow(&mut self, now: Duration) -> bool {
        match self.last {
            Some(last) if now.saturating_sub(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forget the last accepted time; the next event always passes.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
