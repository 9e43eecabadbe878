//! UI events
//!
//! The event sink replaces per-widget callbacks with one method per
//! event category. The input path only needs [`ActivitySink`].

pub mod input;
pub mod sink;

pub use input::GestureTracker;
pub use sink::{ActivitySink, EventSink, SettingChange};
