use crate::config::Config;
use crate::desk::signal::CompletionSignal;
use crate::desk::stopwatch::Stopwatch;
use crate::desk::storage;
use crate::desk::tasks::TaskList;
use crate::desk::theme::Theme;
use crate::desk::ticker::Ticker;
use crate::desk::timer::CountdownTimer;
use crate::ops::store::Store;
use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Tasks,
    Timer,
    Stopwatch,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Tasks, Tab::Timer, Tab::Stopwatch];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Tasks => "Tasks",
            Tab::Timer => "Timer",
            Tab::Stopwatch => "Stopwatch",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Tasks => 0,
            Tab::Timer => 1,
            Tab::Stopwatch => 2,
        }
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

// Define input modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    AddingTask,
    CustomDuration,
}

/// The application controller. Each feature keeps its own state; the app
/// only routes actions to them and owns the shared store and theme.
pub struct App {
    pub title: String,
    pub tab: Tab,
    pub theme: Theme,
    pub tasks: TaskList,
    pub selected_task: Option<usize>,
    pub timer: CountdownTimer,
    pub presets: Vec<u32>,
    pub active_preset: Option<u32>,
    pub stopwatch: Stopwatch,
    pub input_mode: InputMode,
    pub input_text: String,
    pub status: Option<String>,
    pub should_quit: bool,
    pub(crate) store: Box<dyn Store>,
    pub(crate) signal: Box<dyn CompletionSignal>,
    pub(crate) timer_ticker: Ticker,
    pub(crate) stopwatch_ticker: Ticker,
}

impl App {
    pub fn new(
        title: &str,
        config: &Config,
        store: Box<dyn Store>,
        signal: Box<dyn CompletionSignal>,
    ) -> App {
        let (tasks, reassigned) = TaskList::load(storage::load_tasks(store.as_ref()));
        let theme = storage::load_theme(store.as_ref());
        let default_minutes = config.default_minutes();
        let presets = config.presets();
        let active_preset = presets.contains(&default_minutes).then_some(default_minutes);

        let mut app = App {
            title: title.to_string(),
            tab: Tab::Tasks,
            theme,
            tasks,
            selected_task: None,
            timer: CountdownTimer::with_minutes(default_minutes),
            presets,
            active_preset,
            stopwatch: Stopwatch::new(),
            input_mode: InputMode::Normal,
            input_text: String::new(),
            status: None,
            should_quit: false,
            store,
            signal,
            timer_ticker: Ticker::new(),
            stopwatch_ticker: Ticker::new(),
        };
        if reassigned > 0 {
            warn!("replaced {} repeated task id(s) from storage", reassigned);
            app.persist_tasks();
        }
        app.clamp_selection();
        app
    }

    /// Id of the selected task in the current filtered view.
    pub fn selected_task_id(&self) -> Option<u64> {
        let visible = self.tasks.visible();
        self.selected_task
            .and_then(|idx| visible.get(idx))
            .map(|task| task.id)
    }

    pub fn select_prev_task(&mut self) {
        let len = self.tasks.visible().len();
        if len == 0 {
            self.selected_task = None;
            return;
        }

        match self.selected_task {
            Some(current) if current > 0 => self.selected_task = Some(current - 1),
            // If nothing is selected, start from the bottom
            None => self.selected_task = Some(len - 1),
            _ => {}
        }
    }

    pub fn select_next_task(&mut self) {
        let len = self.tasks.visible().len();
        if len == 0 {
            self.selected_task = None;
            return;
        }

        match self.selected_task {
            Some(current) if current < len - 1 => self.selected_task = Some(current + 1),
            None => self.selected_task = Some(0),
            _ => {}
        }
    }

    /// Keeps the selection inside the filtered view after it changed.
    pub fn clamp_selection(&mut self) {
        let len = self.tasks.visible().len();
        self.selected_task = match (len, self.selected_task) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(idx)) if idx >= len => Some(len - 1),
            (_, selected) => selected,
        };
    }

    pub fn begin_input(&mut self, mode: InputMode) {
        self.input_mode = mode;
        self.input_text.clear();
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_text.clear();
    }
}
