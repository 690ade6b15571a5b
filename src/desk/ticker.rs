use std::time::{Duration, Instant};

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// A one-second tick schedule for a single clock.
///
/// Arming starts the schedule one interval from `now`; disarming drops it
/// immediately, so a cancelled clock never sees a late tick.
#[derive(Debug, Clone, Default)]
pub struct Ticker {
    next: Option<Instant>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.next.is_some()
    }

    pub fn arm(&mut self, now: Instant) {
        if self.next.is_none() {
            self.next = Some(now + TICK_INTERVAL);
        }
    }

    pub fn disarm(&mut self) {
        self.next = None;
    }

    /// Consumes one due tick, if any. Call repeatedly to catch up after a stall.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.next {
            Some(at) if at <= now => {
                self.next = Some(at + TICK_INTERVAL);
                true
            }
            _ => false,
        }
    }

    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next.map(|at| at.saturating_duration_since(now))
    }
}
