use std::time::{Duration, Instant};

/// Time since the previous frame and the instantaneous rate derived from it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTiming {
    pub elapsed_ms: u64,
    pub fps: f64,
}

impl FrameTiming {
    /// Whole milliseconds are used for both values, so sub-millisecond
    /// frames report 0 FPS rather than infinity.
    pub fn from_elapsed(elapsed: Duration) -> Self {
        let elapsed_ms = elapsed.as_millis() as u64;
        let fps = if elapsed_ms == 0 {
            0.0
        } else {
            1000.0 / elapsed_ms as f64
        };
        Self { elapsed_ms, fps }
    }
}

/// Measures the interval between consecutive [`tick`](FrameTimer::tick)s.
pub struct FrameTimer {
    last: Instant,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self { last: start }
    }

    pub fn tick(&mut self) -> FrameTiming {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> FrameTiming {
        let timing = FrameTiming::from_elapsed(now.saturating_duration_since(self.last));
        self.last = now;
        timing
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
