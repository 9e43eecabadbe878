//! User preferences
//!
//! Settings chosen on the watch that survive a restart. Stored in flash
//! as postcard bytes with a leading version number.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::timeout::TimeoutLevel;

/// Current preferences layout version
pub const PREFS_VERSION: u8 = 1;

/// Upper bound of the encoded size
pub const MAX_PREFS_SIZE: usize = 16;

/// Backlight level used until the user picks one
pub const DEFAULT_BRIGHTNESS: u8 = 200;

/// Number of display rotations (quarter turns)
pub const ROTATION_COUNT: u8 = 4;

/// Preferences encoding errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PrefsError {
    /// Buffer too small to encode into
    Encode,
    /// Stored bytes are not a valid record
    Decode,
    /// Stored record has a different layout version
    VersionMismatch,
}

/// Persisted user settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Preferences {
    /// Layout version
    pub version: u8,
    /// Screen timeout selector
    pub timeout_level: TimeoutLevel,
    /// Backlight level (0-255)
    pub brightness: u8,
    /// Display rotation in quarter turns (0-3)
    pub rotation: u8,
}

impl Default for Preferences {
    fn default() -> Self {
        Self::new()
    }
}

impl Preferences {
    /// Create the factory defaults
    pub const fn new() -> Self {
        Self {
            version: PREFS_VERSION,
            timeout_level: TimeoutLevel::FiveSeconds,
            brightness: DEFAULT_BRIGHTNESS,
            rotation: 0,
        }
    }

    /// Rotation reduced to the valid range
    pub fn rotation(&self) -> u8 {
        self.rotation % ROTATION_COUNT
    }

    /// Encode into `buf`, returning the used prefix
    #[cfg(feature = "serde")]
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], PrefsError> {
        postcard::to_slice(self, buf).map_err(|_| PrefsError::Encode)
    }

    /// Decode a stored record
    ///
    /// Records written by another layout version are rejected.
    #[cfg(feature = "serde")]
    pub fn decode(bytes: &[u8]) -> Result<Self, PrefsError> {
        let prefs: Self = postcard::from_bytes(bytes).map_err(|_| PrefsError::Decode)?;
        if prefs.version != PREFS_VERSION {
            return Err(PrefsError::VersionMismatch);
        }
        Ok(prefs)
    }
}
