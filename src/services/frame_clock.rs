use std::time::{Duration, Instant};

/// Paces the live frame loop.
///
/// Each tick reports the wall time since the previous one, clamped to
/// `max_delta` so a stalled loop does not make sources jump. Suspending
/// drops the reference point: the first tick after [`resume`](Self::resume)
/// reports zero.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    max_delta: Duration,
    last: Option<Instant>,
    suspended: bool,
    frames: u64,
}

impl FrameClock {
    pub fn new(interval: Duration, max_delta: Duration) -> Self {
        Self {
            interval,
            max_delta,
            last: None,
            suspended: false,
            frames: 0,
        }
    }

    /// Nominal time between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Ticks delivered since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Register a tick at `now`. Returns `None` while suspended.
    pub fn tick(&mut self, now: Instant) -> Option<Duration> {
        if self.suspended {
            return None;
        }
        let delta = match self.last {
            Some(last) => now.saturating_duration_since(last).min(self.max_delta),
            None => Duration::ZERO,
        };
        self.last = Some(now);
        self.frames += 1;
        Some(delta)
    }

    pub fn suspend(&mut self) {
        self.suspended = true;
        self.last = None;
    }

    pub fn resume(&mut self) {
        self.suspended = false;
        self.last = None;
    }
}
