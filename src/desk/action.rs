use crate::desk::models::{App, InputMode};
use crate::desk::tasks::Filter;
use crate::desk::timer::{self, TimerTick};
use log::{debug, info};
use std::time::{Duration, Instant};

/// Everything a user (or the clock) can ask the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextTab,
    PrevTab,
    ToggleTheme,

    AddTask(String),
    ToggleTask(u64),
    DeleteTask(u64),
    SetFilter(Filter),

    TimerStart,
    TimerPause,
    TimerReset,
    /// Select a preset duration, in minutes.
    TimerPreset(u32),
    /// Raw text typed into the custom duration field.
    TimerCustom(String),
    TimerTick,

    StopwatchStart,
    StopwatchPause,
    StopwatchReset,
    StopwatchLap,
    StopwatchTick,
}

impl App {
    pub fn dispatch(&mut self, action: Action) {
        self.dispatch_at(action, Instant::now());
    }

    /// Applies one action and re-syncs the tick schedules against `now`.
    pub fn dispatch_at(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::NextTab => self.tab = self.tab.next(),
            Action::PrevTab => self.tab = self.tab.prev(),
            Action::ToggleTheme => {
                self.theme = self.theme.toggled();
                self.persist_theme();
            }

            Action::AddTask(text) => {
                // Blank input is ignored and the input field stays open
                if let Some(id) = self.tasks.add(&text) {
                    debug!("added task {}", id);
                    self.persist_tasks();
                    self.input_mode = InputMode::Normal;
                    self.input_text.clear();
                    // Point the cursor at the new task if it is visible
                    if let Some(pos) = self.tasks.visible().iter().position(|t| t.id == id) {
                        self.selected_task = Some(pos);
                    }
                    self.clamp_selection();
                }
            }
            Action::ToggleTask(id) => {
                if self.tasks.toggle(id) {
                    self.persist_tasks();
                    self.clamp_selection();
                }
            }
            Action::DeleteTask(id) => {
                if self.tasks.delete(id) {
                    debug!("deleted task {}", id);
                    self.persist_tasks();
                    self.clamp_selection();
                }
            }
            Action::SetFilter(filter) => {
                self.tasks.set_filter(filter);
                self.selected_task = None;
                self.clamp_selection();
            }

            Action::TimerStart => {
                if self.timer.start() {
                    self.status = None;
                }
            }
            Action::TimerPause => self.timer.pause(),
            Action::TimerReset => {
                self.timer.reset();
                self.status = None;
            }
            Action::TimerPreset(minutes) => {
                if self.timer.set_duration(minutes) {
                    self.active_preset = Some(minutes);
                    self.status = None;
                }
            }
            Action::TimerCustom(text) => {
                if let Some(minutes) = timer::parse_minutes(&text) {
                    self.timer.set_duration(minutes);
                    self.active_preset = None;
                    self.status = None;
                    self.input_mode = InputMode::Normal;
                    self.input_text.clear();
                }
            }
            Action::TimerTick => {
                if self.timer.tick() == TimerTick::Completed {
                    info!("countdown of {}s completed", self.timer.total_secs());
                    self.status = Some("Timer complete!".to_string());
                    self.signal.timer_finished();
                }
            }

            Action::StopwatchStart => {
                self.stopwatch.start();
            }
            Action::StopwatchPause => self.stopwatch.pause(),
            Action::StopwatchReset => self.stopwatch.reset(),
            Action::StopwatchLap => {
                self.stopwatch.lap();
            }
            Action::StopwatchTick => self.stopwatch.tick(),
        }

        self.sync_tickers(now);
    }

    /// Arms a clock's ticker while it runs and drops it the moment it stops.
    fn sync_tickers(&mut self, now: Instant) {
        if self.timer.is_running() {
            self.timer_ticker.arm(now);
        } else {
            self.timer_ticker.disarm();
        }

        if self.stopwatch.is_running() {
            self.stopwatch_ticker.arm(now);
        } else {
            self.stopwatch_ticker.disarm();
        }
    }

    /// Delivers every tick that has come due, in order.
    pub fn run_due_ticks(&mut self, now: Instant) {
        while self.timer_ticker.take_due(now) {
            self.dispatch_at(Action::TimerTick, now);
        }
        while self.stopwatch_ticker.take_due(now) {
            self.dispatch_at(Action::StopwatchTick, now);
        }
    }

    /// How long the event loop may block before the next tick is due.
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        match (
            self.timer_ticker.time_until_next(now),
            self.stopwatch_ticker.time_until_next(now),
        ) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}
