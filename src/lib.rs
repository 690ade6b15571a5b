//! focusdesk: a terminal productivity desk with a task list, a countdown
//! timer and a stopwatch.
//!
//! Feature state lives in [`desk::tasks`], [`desk::timer`] and
//! [`desk::stopwatch`]; [`desk::App`] routes [`desk::Action`]s to them and
//! mirrors the task list and theme into an [`ops::store::Store`].

pub mod config;
pub mod desk;
pub mod logging;
pub mod ops;
