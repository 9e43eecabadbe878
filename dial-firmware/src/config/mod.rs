//! Configuration and preferences persistence
//!
//! Loads the board configuration from a flash override or the embedded
//! `watch.toml`, and the user preferences from flash.

pub mod loader;
pub mod prefs;

pub use loader::{ConfigError, ConfigPersistence};
pub use prefs::{load_preferences, save_preferences};
