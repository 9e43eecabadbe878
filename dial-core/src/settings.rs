//! Settings screen interaction
//!
//! The settings screen shows one row per adjustable preference. A tap
//! on a row adjusts that preference; on the brightness row the half of
//! the screen that was tapped picks the direction.

use crate::events::SettingChange;
use crate::prefs::{Preferences, ROTATION_COUNT};
use crate::screen::line_at;
use crate::traits::TouchPoint;

/// Lowest level reachable from the settings screen
pub const MIN_BRIGHTNESS: u8 = 5;

/// Rows of the settings screen, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsRow {
    Timeout,
    Brightness,
    Rotation,
}

impl SettingsRow {
    pub const ALL: [SettingsRow; 3] = [
        SettingsRow::Timeout,
        SettingsRow::Brightness,
        SettingsRow::Rotation,
    ];

    /// Row shown on text line `line`
    pub fn from_line(line: usize) -> Option<Self> {
        Self::ALL.get(line).copied()
    }

    /// Row under screen coordinate `y`
    pub fn at(y: u16) -> Option<Self> {
        line_at(y).and_then(Self::from_line)
    }
}

/// Result of a tap on the settings screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsEdit {
    /// A selector changed
    Setting(SettingChange),
    /// Brightness moved to a new level
    Brightness(u8),
}

/// Move brightness one step towards the tapped side
///
/// # Arguments
/// * `current` - Current level
/// * `x` - Tap position
/// * `width` - Screen width
/// * `step` - Change per tap
pub fn step_brightness(current: u8, x: u16, width: u16, step: u8) -> u8 {
    if x < width / 2 {
        current.saturating_sub(step).max(MIN_BRIGHTNESS)
    } else {
        current.saturating_add(step)
    }
}

/// Next rotation in quarter turns
pub fn next_rotation(rotation: u8) -> u8 {
    (rotation + 1) % ROTATION_COUNT
}

/// Work out what a tap changes
///
/// Returns `None` for taps outside the rows or ones that leave the value
/// unchanged (brightness already at its limit).
pub fn tap(prefs: &Preferences, point: TouchPoint, width: u16, step: u8) -> Option<SettingsEdit> {
    match SettingsRow::at(point.y)? {
        SettingsRow::Timeout => {
            let level = prefs.timeout_level.next();
            Some(SettingsEdit::Setting(SettingChange::Timeout(
                i32::from(level.index()),
            )))
        }
        SettingsRow::Brightness => {
            let level = step_brightness(prefs.brightness, point.x, width, step);
            (level != prefs.brightness).then_some(SettingsEdit::Brightness(level))
        }
        SettingsRow::Rotation => Some(SettingsEdit::Setting(SettingChange::Rotation(
            next_rotation(prefs.rotation()),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::{LINE_HEIGHT, TITLE_HEIGHT};
    use crate::timeout::TimeoutLevel;

    fn row_y(line: u16) -> u16 {
        TITLE_HEIGHT + line * LINE_HEIGHT + LINE_HEIGHT / 2
    }

    #[test]
    fn test_row_hit_test() {
        assert_eq!(SettingsRow::at(row_y(0)), Some(SettingsRow::Timeout));
        assert_eq!(SettingsRow::at(row_y(1)), Some(SettingsRow::Brightness));
        assert_eq!(SettingsRow::at(row_y(2)), Some(SettingsRow::Rotation));
        assert_eq!(SettingsRow::at(row_y(3)), None);
        assert_eq!(SettingsRow::at(5), None);
    }

    #[test]
    fn test_step_brightness() {
        assert_eq!(step_brightness(200, 10, 240, 25), 175);
        assert_eq!(step_brightness(200, 200, 240, 25), 225);
        assert_eq!(step_brightness(240, 200, 240, 25), 255);
        assert_eq!(step_brightness(20, 0, 240, 25), MIN_BRIGHTNESS);
    }

    #[test]
    fn test_rotation_cycles() {
        assert_eq!(next_rotation(0), 1);
        assert_eq!(next_rotation(3), 0);
    }

    #[test]
    fn test_tap_timeout_row() {
        let prefs = Preferences {
            timeout_level: TimeoutLevel::AlwaysOn,
            ..Preferences::new()
        };
        let edit = tap(&prefs, TouchPoint::new(120, row_y(0)), 240, 25);
        assert_eq!(
            edit,
            Some(SettingsEdit::Setting(SettingChange::Timeout(0)))
        );
    }

    #[test]
    fn test_tap_brightness_at_limit() {
        let prefs = Preferences {
            brightness: 255,
            ..Preferences::new()
        };
        assert_eq!(tap(&prefs, TouchPoint::new(230, row_y(1)), 240, 25), None);
        assert_eq!(
            tap(&prefs, TouchPoint::new(10, row_y(1)), 240, 25),
            Some(SettingsEdit::Brightness(230))
        );
    }

    #[test]
    fn test_tap_rotation_row() {
        let prefs = Preferences {
            rotation: 3,
            ..Preferences::new()
        };
        assert_eq!(
            tap(&prefs, TouchPoint::new(120, row_y(2)), 240, 25),
            Some(SettingsEdit::Setting(SettingChange::Rotation(0)))
        );
    }
}
