use std::f64::consts::PI;

pub const MIN_MINUTES: u32 = 1;
pub const MAX_MINUTES: u32 = 999;
pub const DEFAULT_MINUTES: u32 = 25;

/// Radius of the progress ring; the ring's circumference is fixed by it.
const RING_RADIUS: f64 = 140.0;

/// What a single tick did to the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// Not running; nothing happened.
    Idle,
    /// One second was taken off.
    Counted,
    /// The countdown just hit zero and stopped.
    Completed,
}

/// Countdown timer state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownTimer {
    remaining_secs: u32,
    total_secs: u32,
    running: bool,
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::with_minutes(DEFAULT_MINUTES)
    }
}

impl CountdownTimer {
    /// Builds an idle timer. Out-of-range minutes fall back to the default.
    pub fn with_minutes(minutes: u32) -> Self {
        let minutes = if valid_minutes(minutes) {
            minutes
        } else {
            DEFAULT_MINUTES
        };
        Self {
            remaining_secs: minutes * 60,
            total_secs: minutes * 60,
            running: false,
        }
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_secs == 0
    }

    /// Returns true when the timer actually started.
    pub fn start(&mut self) -> bool {
        if self.running || self.remaining_secs == 0 {
            return false;
        }
        self.running = true;
        true
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_secs = self.total_secs;
    }

    /// Sets a new duration in minutes (1..=999). Anything else is ignored.
    pub fn set_duration(&mut self, minutes: u32) -> bool {
        if !valid_minutes(minutes) {
            return false;
        }
        self.running = false;
        self.total_secs = minutes * 60;
        self.remaining_secs = self.total_secs;
        true
    }

    pub fn tick(&mut self) -> TimerTick {
        if !self.running {
            return TimerTick::Idle;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.running = false;
            TimerTick::Completed
        } else {
            TimerTick::Counted
        }
    }

    /// Fraction of the duration still left, in 0.0..=1.0.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        (self.remaining_secs as f64 / self.total_secs as f64).clamp(0.0, 1.0)
    }

    /// Dash offset of the progress ring: 0 when full, the whole circumference when empty.
    pub fn ring_offset(&self) -> f64 {
        let circumference = ring_circumference();
        circumference - self.progress() * circumference
    }

    pub fn display(&self) -> String {
        format_mm_ss(self.remaining_secs)
    }
}

pub fn valid_minutes(minutes: u32) -> bool {
    (MIN_MINUTES..=MAX_MINUTES).contains(&minutes)
}

/// Parses a custom duration typed by the user. Returns `None` for anything
/// that is not a whole number of minutes in range.
pub fn parse_minutes(input: &str) -> Option<u32> {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|m| valid_minutes(*m))
}

pub fn ring_circumference() -> f64 {
    2.0 * PI * RING_RADIUS
}

/// Formats seconds as `MM:SS`. Minutes keep growing past 99.
pub fn format_mm_ss(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
