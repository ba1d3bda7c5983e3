use std::time::{Duration, Instant};

/// Fixed-interval tick timer for the game loop.
///
/// `restart` drops whatever tick was pending, so a new session never inherits
/// the previous session's timing.
#[derive(Debug, Clone)]
pub struct TickSchedule {
    interval: Duration,
    next_due: Instant,
}

impl TickSchedule {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
        }
    }

    pub fn from_millis(tick_ms: u32, now: Instant) -> Self {
        Self::new(Duration::from_millis(tick_ms.max(1) as u64), now)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Cancel the pending tick and schedule the next one a full interval out.
    pub fn restart(&mut self, now: Instant) {
        self.next_due = now + self.interval;
    }

    /// Consume the pending tick if it is due.
    ///
    /// At most one tick fires per call; a stalled loop does not replay the
    /// ticks it missed.
    pub fn due(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due = now + self.interval;
        true
    }

    /// How long the loop may wait for input before the next tick.
    pub fn time_until(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}
