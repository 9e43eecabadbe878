//! Display timeout
//!
//! Dims the backlight and returns to the home view after a period
//! without touch input.

pub mod controller;
pub mod policy;

pub use controller::{Action, DisplayTimeout};
pub use policy::{TimeoutLevel, TimeoutPolicy, ALWAYS_ON, DEFAULT_TIMEOUT_MS};
