//! Embassy async tasks
//!
//! Each task runs independently and communicates via signals.

pub mod prefs;
pub mod ui;

pub use prefs::prefs_task;
pub use ui::{ui_task, UiResources};
