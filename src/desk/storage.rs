use crate::desk::models::App;
use crate::desk::tasks::Task;
use crate::desk::theme::Theme;
use crate::ops::store::{Store, StoreError};
use log::warn;

pub const TASKS_KEY: &str = "tasks";
pub const THEME_KEY: &str = "theme";

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to encode tasks: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Loads the saved task list. Missing or malformed data yields an empty list.
pub fn load_tasks(store: &dyn Store) -> Vec<Task> {
    let raw = match store.get(TASKS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("could not read saved tasks, starting empty: {}", e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Task>>(&raw) {
        Ok(tasks) => tasks,
        Err(e) => {
            warn!("saved tasks are malformed, starting empty: {}", e);
            Vec::new()
        }
    }
}

/// Writes the whole task list under the `tasks` key.
pub fn save_tasks(store: &mut dyn Store, tasks: &[Task]) -> Result<(), PersistError> {
    let json = serde_json::to_string(tasks)?;
    store.set(TASKS_KEY, &json)?;
    Ok(())
}

/// Loads the saved theme, falling back to light.
pub fn load_theme(store: &dyn Store) -> Theme {
    match store.get(THEME_KEY) {
        Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_else(|| {
            warn!("unknown saved theme '{}', using light", raw.trim());
            Theme::Light
        }),
        Ok(None) => Theme::Light,
        Err(e) => {
            warn!("could not read saved theme: {}", e);
            Theme::Light
        }
    }
}

pub fn save_theme(store: &mut dyn Store, theme: Theme) -> Result<(), PersistError> {
    store.set(THEME_KEY, theme.as_str())?;
    Ok(())
}

impl App {
    /// Mirrors the in-memory task list to storage. Failures are logged; the
    /// in-memory list stays authoritative for the session.
    pub fn persist_tasks(&mut self) {
        if let Err(e) = save_tasks(self.store.as_mut(), self.tasks.tasks()) {
            warn!("failed to save tasks: {}", e);
        }
    }

    pub fn persist_theme(&mut self) {
        if let Err(e) = save_theme(self.store.as_mut(), self.theme) {
            warn!("failed to save theme: {}", e);
        }
    }
}
