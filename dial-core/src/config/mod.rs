//! Configuration types
//!
//! Defines the board description (panel bus, panel, backlight, touch)
//! and the UI tunables, plus a parser for the `watch.toml` subset.

pub mod hardware;
pub mod parse;
pub mod types;

pub use hardware::{
    BusConfig, DisplayHwConfig, LightConfig, PanelConfig, PinConfig, TouchConfig,
};
pub use parse::{parse_config, ParseError};
pub use types::{ClockConfig, TimeoutConfig, UiConfig, WatchConfig, CONFIG_VERSION};
