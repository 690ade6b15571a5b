/// A recorded lap: its sequence number and the elapsed time when it was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lap {
    pub index: u32,
    pub elapsed_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stopwatch {
    elapsed_secs: u64,
    running: bool,
    // Most recent lap first.
    laps: Vec<Lap>,
    lap_counter: u32,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    /// Returns true when the stopwatch actually started.
    pub fn start(&mut self) -> bool {
        if self.running {
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
        self.elapsed_secs = 0;
        self.laps.clear();
        self.lap_counter = 0;
    }

    /// Records a lap. Ignored unless running.
    pub fn lap(&mut self) -> Option<Lap> {
        if !self.running {
            return None;
        }
        self.lap_counter += 1;
        let lap = Lap {
            index: self.lap_counter,
            elapsed_secs: self.elapsed_secs,
        };
        self.laps.insert(0, lap);
        Some(lap)
    }

    pub fn tick(&mut self) {
        if self.running {
            self.elapsed_secs += 1;
        }
    }

    pub fn display(&self) -> String {
        format_hh_mm_ss(self.elapsed_secs)
    }
}

/// Formats seconds as `HH:MM:SS`.
pub fn format_hh_mm_ss(seconds: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
