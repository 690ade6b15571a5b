pub mod action;
pub mod models;
pub mod signal;
pub mod stopwatch;
pub mod storage;
pub mod tasks;
pub mod theme;
pub mod ticker;
pub mod timer;
pub mod ui;

// Re-export commonly used items for convenience
pub use action::Action;
pub use models::App;
pub use ui::run_app;
