//! Leading-edge throttle for high-frequency host signals.

use std::time::{Duration, Instant};

/// Lets at most one signal through per window.
///
/// The first signal passes immediately; later ones are dropped until the
/// window since the last accepted signal has elapsed.
#[derive(Debug, Clone)]
pub struct Throttle {
    window: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Whether a signal arriving at `now` should be acted on.
    pub fn accept(&mut self, now: Instant) -> bool {
        let open = match self.last {
            Some(last) => now.saturating_duration_since(last) >= self.window,
            None => true,
        };
        if open {
            self.last = Some(now);
        }
        open
    }

    /// Forget the last accepted signal.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
