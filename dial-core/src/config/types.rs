//! Watch configuration types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::hardware::DisplayHwConfig;
use crate::prefs::Preferences;
use crate::timeout::TimeoutLevel;

/// Configuration layout version
pub const CONFIG_VERSION: u8 = 1;

/// UI behaviour settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UiConfig {
    /// Pause between control loop iterations in ms
    pub loop_delay_ms: u16,
    /// Brightness change per tap on the settings screen
    pub brightness_step: u8,
    /// Backlight level while the splash is shown
    pub splash_brightness: u8,
    /// How long the splash stays up in ms
    pub splash_ms: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            loop_delay_ms: 5,
            brightness_step: 25,
            splash_brightness: 200,
            splash_ms: 2000,
        }
    }
}

/// Wall clock settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockConfig {
    /// Unix time at boot (no battery-backed RTC on board)
    pub start_unix: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            start_unix: 1_700_000_000,
        }
    }
}

/// Screen timeout settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeoutConfig {
    /// Level used when no preference is stored
    pub level: TimeoutLevel,
}

/// Complete watch configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WatchConfig {
    /// Config version for compatibility
    pub version: u8,
    pub display: DisplayHwConfig,
    pub ui: UiConfig,
    pub clock: ClockConfig,
    pub timeout: TimeoutConfig,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl WatchConfig {
    /// Create the built-in board configuration
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            display: DisplayHwConfig::default(),
            ui: UiConfig::default(),
            clock: ClockConfig::default(),
            timeout: TimeoutConfig::default(),
        }
    }

    /// Preferences to start from when none are stored
    pub fn default_preferences(&self) -> Preferences {
        Preferences {
            timeout_level: self.timeout.level,
            brightness: self.display.light.brightness,
            ..Preferences::new()
        }
    }
}
