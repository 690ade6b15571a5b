use crate::desk::action::Action;
use crate::desk::models::{App, InputMode, Tab};
use ratatui::{
    Terminal,
    backend::Backend,
    crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use std::io;
use std::time::{Duration, Instant};

/// Upper bound on how long the loop blocks when no clock is running.
const IDLE_POLL: Duration = Duration::from_secs(1);

/// Runs the main event loop for the application.
pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> io::Result<()> {
    loop {
        terminal.draw(|f| crate::desk::ui::render::draw_ui(f, &app))?;

        let timeout = app
            .time_until_next_tick(Instant::now())
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(&mut app, key);
                }
            }
        }

        app.run_due_ticks(Instant::now());

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Applies a key press: editing keys and cursor movement act on the app
/// directly, everything else goes through `key_to_action`.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.dispatch(Action::Quit);
        return;
    }

    match app.input_mode {
        InputMode::AddingTask | InputMode::CustomDuration => match key.code {
            KeyCode::Enter => {
                let text = app.input_text.clone();
                let action = if app.input_mode == InputMode::AddingTask {
                    Action::AddTask(text)
                } else {
                    Action::TimerCustom(text)
                };
                app.dispatch(action);
            }
            KeyCode::Esc => app.cancel_input(),
            // Chords such as Ctrl-W or Alt-B are not text
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                app.input_text.push(c)
            }
            KeyCode::Backspace => {
                app.input_text.pop();
            }
            _ => {}
        },
        InputMode::Normal => match (app.tab, key.code) {
            (Tab::Tasks, KeyCode::Char('a') | KeyCode::Char('i')) => {
                app.begin_input(InputMode::AddingTask)
            }
            (Tab::Tasks, KeyCode::Char('j') | KeyCode::Down) => app.select_next_task(),
            (Tab::Tasks, KeyCode::Char('k') | KeyCode::Up) => app.select_prev_task(),
            (Tab::Timer, KeyCode::Char('c')) => app.begin_input(InputMode::CustomDuration),
            _ => {
                if let Some(action) = key_to_action(app, key) {
                    app.dispatch(action);
                }
            }
        },
    }
}

/// Maps a key in normal mode to the action it asks for.
pub fn key_to_action(app: &App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Tab => return Some(Action::NextTab),
        KeyCode::BackTab => return Some(Action::PrevTab),
        KeyCode::Char('T') => return Some(Action::ToggleTheme),
        _ => {}
    }

    match app.tab {
        Tab::Tasks => match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => app.selected_task_id().map(Action::ToggleTask),
            KeyCode::Char('x') | KeyCode::Delete => app.selected_task_id().map(Action::DeleteTask),
            KeyCode::Char('f') => Some(Action::SetFilter(app.tasks.filter().next())),
            _ => None,
        },
        Tab::Timer => match key.code {
            KeyCode::Char('s') => Some(Action::TimerStart),
            KeyCode::Char('p') => Some(Action::TimerPause),
            KeyCode::Char('r') => Some(Action::TimerReset),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c.to_digit(10)? as usize - 1;
                app.presets.get(index).copied().map(Action::TimerPreset)
            }
            _ => None,
        },
        Tab::Stopwatch => match key.code {
            KeyCode::Char('s') => Some(Action::StopwatchStart),
            KeyCode::Char('p') => Some(Action::StopwatchPause),
            KeyCode::Char('r') => Some(Action::StopwatchReset),
            KeyCode::Char('l') => Some(Action::StopwatchLap),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::desk::signal::SilentSignal;
    use crate::desk::tasks::Filter;
    use crate::ops::store::MemoryStore;

    fn test_app() -> App {
        App::new(
            "test",
            &Config::default(),
            Box::new(MemoryStore::new()),
            Box::new(SilentSignal),
        )
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_key(app, press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_add_task_through_keys() {
        let mut app = test_app();
        handle_key(&mut app, press(KeyCode::Char('a')));
        assert_eq!(app.input_mode, InputMode::AddingTask);

        type_text(&mut app, "read book");
        handle_key(&mut app, press(KeyCode::Backspace));
        handle_key(&mut app, press(KeyCode::Enter));

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.tasks.tasks()[0].text, "read boo");
    }

    #[test]
    fn test_blank_task_keeps_input_open() {
        let mut app = test_app();
        handle_key(&mut app, press(KeyCode::Char('a')));
        type_text(&mut app, "   ");
        handle_key(&mut app, press(KeyCode::Enter));

        assert!(app.tasks.is_empty());
        assert_eq!(app.input_mode, InputMode::AddingTask);

        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.input_text.is_empty());
    }

    #[test]
    fn test_toggle_and_delete_selected() {
        let mut app = test_app();
        app.dispatch(Action::AddTask("one".to_string()));
        app.dispatch(Action::AddTask("two".to_string()));
        handle_key(&mut app, press(KeyCode::Char('k')));
        assert_eq!(app.selected_task, Some(0));

        handle_key(&mut app, press(KeyCode::Char(' ')));
        assert!(app.tasks.tasks()[0].completed);

        handle_key(&mut app, press(KeyCode::Char('x')));
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.tasks.tasks()[0].text, "two");
    }

    #[test]
    fn test_keys_on_empty_list_do_nothing() {
        let app = test_app();
        assert_eq!(key_to_action(&app, press(KeyCode::Char(' '))), None);
        assert_eq!(key_to_action(&app, press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_filter_key_cycles() {
        let app = test_app();
        assert_eq!(
            key_to_action(&app, press(KeyCode::Char('f'))),
            Some(Action::SetFilter(Filter::Active))
        );
    }

    #[test]
    fn test_timer_keys() {
        let mut app = test_app();
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.tab, Tab::Timer);

        handle_key(&mut app, press(KeyCode::Char('2')));
        assert_eq!(app.timer.total_secs(), 10 * 60);
        assert_eq!(app.active_preset, Some(10));

        // No ninth preset configured.
        assert_eq!(key_to_action(&app, press(KeyCode::Char('9'))), None);

        handle_key(&mut app, press(KeyCode::Char('s')));
        assert!(app.timer.is_running());
        handle_key(&mut app, press(KeyCode::Char('p')));
        assert!(!app.timer.is_running());

        handle_key(&mut app, press(KeyCode::Char('c')));
        assert_eq!(app.input_mode, InputMode::CustomDuration);
        type_text(&mut app, "90");
        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.timer.total_secs(), 90 * 60);
        assert_eq!(app.active_preset, None);
    }

    #[test]
    fn test_stopwatch_keys() {
        let mut app = test_app();
        handle_key(&mut app, press(KeyCode::BackTab));
        assert_eq!(app.tab, Tab::Stopwatch);

        handle_key(&mut app, press(KeyCode::Char('l')));
        assert!(app.stopwatch.laps().is_empty());

        handle_key(&mut app, press(KeyCode::Char('s')));
        handle_key(&mut app, press(KeyCode::Char('l')));
        assert_eq!(app.stopwatch.laps().len(), 1);

        handle_key(&mut app, press(KeyCode::Char('r')));
        assert!(app.stopwatch.laps().is_empty());
    }

    #[test]
    fn test_global_keys() {
        let mut app = test_app();
        handle_key(&mut app, press(KeyCode::Char('T')));
        assert_eq!(app.theme, crate::desk::theme::Theme::Dark);

        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);

        let mut app = test_app();
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_q_while_typing_is_text() {
        let mut app = test_app();
        handle_key(&mut app, press(KeyCode::Char('a')));
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.should_quit);
        assert_eq!(app.input_text, "q");
    }

    #[test]
    fn test_modified_chars_are_not_typed() {
        let mut app = test_app();
        handle_key(&mut app, press(KeyCode::Char('a')));
        type_text(&mut app, "ab");
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL));
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('b'), KeyModifiers::ALT));
        assert_eq!(app.input_text, "ab");

        // Shifted letters are ordinary text.
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('C'), KeyModifiers::SHIFT));
        assert_eq!(app.input_text, "abC");
        assert_eq!(app.input_mode, InputMode::AddingTask);
    }
}
