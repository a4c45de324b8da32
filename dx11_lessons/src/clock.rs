/// FrameClock - per-frame delta and accumulated run time

use std::time::{Duration, Instant};

/// Monotonic frame clock
///
/// `tick` once per frame; the delta is the time since the previous tick (or
/// since creation/reset for the first one).
#[derive(Debug, Clone)]
pub struct FrameClock {
    previous: Instant,
    delta: Duration,
    total: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            previous: Instant::now(),
            delta: Duration::ZERO,
            total: Duration::ZERO,
        }
    }

    /// Advance to now
    pub fn tick(&mut self) {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.previous);
        self.previous = now;
        self.advance(elapsed);
    }

    /// Advance by a fixed step (replays, tests)
    pub fn tick_with(&mut self, delta: Duration) {
        self.previous = Instant::now();
        self.advance(delta);
    }

    fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.total += delta;
    }

    /// Zero delta and total, restart from now
    pub fn reset(&mut self) {
        self.previous = Instant::now();
        self.delta = Duration::ZERO;
        self.total = Duration::ZERO;
    }

    pub fn delta(&self) -> Duration {
        self.delta
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn delta_seconds(&self) -> f64 {
        self.delta.as_secs_f64()
    }

    pub fn delta_milliseconds(&self) -> f64 {
        self.delta.as_secs_f64() * 1_000.0
    }

    pub fn total_seconds(&self) -> f64 {
        self.total.as_secs_f64()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
