//! Display timeout controller
//!
//! Decides once per control-loop iteration whether the display stays lit
//! or is dimmed and sent back to the home view. The controller does no
//! I/O; the caller acts on the returned [`Action`].

use super::policy::{TimeoutLevel, TimeoutPolicy};
use crate::events::ActivitySink;

/// What the caller must do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Nothing to do
    None,
    /// Re-apply the configured brightness level
    KeepAlive(u8),
    /// Set brightness to 0 and load the idle view
    ExpireAndDim,
}

/// Inactivity-driven backlight timeout
#[derive(Debug, Clone)]
pub struct DisplayTimeout {
    policy: TimeoutPolicy,
    /// Brightness carried by `KeepAlive`
    brightness: u8,
}

impl DisplayTimeout {
    /// Create a running controller with the default 5 second timeout
    ///
    /// # Arguments
    /// - `now_ms`: Current monotonic time, taken as the last activity
    /// - `brightness`: Configured backlight level (0-255)
    pub fn new(now_ms: u32, brightness: u8) -> Self {
        Self {
            policy: TimeoutPolicy::new(now_ms),
            brightness,
        }
    }

    /// Apply a selector level by index
    ///
    /// Indices outside 0-4 leave the policy untouched. Returns whether the
    /// index was accepted.
    pub fn configure(&mut self, level_index: i32) -> bool {
        match TimeoutLevel::from_index(level_index) {
            Some(level) => {
                self.configure_level(level);
                true
            }
            None => false,
        }
    }

    /// Apply a selector level
    pub fn configure_level(&mut self, level: TimeoutLevel) {
        self.policy.duration_ms = level.duration_ms();
        if level.restarts_countdown() {
            self.policy.active = true;
        }
    }

    /// Refresh the deadline after user input
    pub fn record_activity(&mut self, now_ms: u32) {
        self.policy.last_activity_ms = now_ms;
        self.policy.active = true;
    }

    /// Explicit timer reset
    pub fn restart(&mut self, now_ms: u32) {
        self.record_activity(now_ms);
    }

    /// Run the expiry check
    ///
    /// Expiry is reported once; afterwards ticks return `Action::None`
    /// until activity or a restart re-arms the countdown.
    pub fn tick(&mut self, now_ms: u32) -> Action {
        if !self.policy.active || self.policy.is_always_on() {
            return Action::None;
        }

        if self.policy.is_expired_at(now_ms) {
            self.policy.active = false;
            return Action::ExpireAndDim;
        }

        Action::KeepAlive(self.brightness)
    }

    /// Set the brightness that `KeepAlive` reports
    pub fn set_brightness(&mut self, level: u8) {
        self.brightness = level;
    }

    /// Get the configured brightness
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Check if the countdown is running
    pub fn is_active(&self) -> bool {
        self.policy.active
    }

    /// Get the current countdown duration in ms
    pub fn duration_ms(&self) -> i32 {
        self.policy.duration_ms
    }

    /// Get the selector level matching the current duration
    pub fn level(&self) -> TimeoutLevel {
        self.policy.level().unwrap_or_default()
    }

    /// Get the raw policy state
    pub fn policy(&self) -> &TimeoutPolicy {
        &self.policy
    }
}

impl ActivitySink for DisplayTimeout {
    fn record_activity(&mut self, now_ms: u32) {
        DisplayTimeout::record_activity(self, now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenario() {
        let mut timeout = DisplayTimeout::new(0, 200);
        assert_eq!(timeout.tick(4999), Action::KeepAlive(200));
        assert_eq!(timeout.tick(5001), Action::ExpireAndDim);
        assert_eq!(timeout.tick(6000), Action::None);
    }

    #[test]
    fn test_expiry_reported_once() {
        let mut timeout = DisplayTimeout::new(0, 100);
        timeout.configure(1);
        timeout.record_activity(1000);
        assert_eq!(timeout.tick(10_999), Action::KeepAlive(100));
        assert_eq!(timeout.tick(11_001), Action::ExpireAndDim);
        assert!(!timeout.is_active());
        assert_eq!(timeout.tick(11_001), Action::None);
    }

    #[test]
    fn test_activity_pushes_deadline() {
        let mut timeout = DisplayTimeout::new(0, 100);
        timeout.record_activity(4999);
        assert_eq!(timeout.tick(5001), Action::KeepAlive(100));
        assert_eq!(timeout.tick(9999), Action::KeepAlive(100));
        assert_eq!(timeout.tick(10_000), Action::ExpireAndDim);
    }

    #[test]
    fn test_activity_rearms_after_expiry() {
        let mut timeout = DisplayTimeout::new(0, 80);
        assert_eq!(timeout.tick(6000), Action::ExpireAndDim);
        timeout.record_activity(7000);
        assert!(timeout.is_active());
        assert_eq!(timeout.tick(7001), Action::KeepAlive(80));
    }

    #[test]
    fn test_level_mapping() {
        let mut timeout = DisplayTimeout::new(0, 0);
        for (index, expected) in [(0, 5000), (1, 10_000), (2, 20_000), (3, 30_000)] {
            assert!(timeout.configure(index));
            assert_eq!(timeout.duration_ms(), expected);
        }
        assert!(timeout.configure(4));
        assert!(timeout.duration_ms() < 0);
        assert_eq!(timeout.level(), TimeoutLevel::AlwaysOn);
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut timeout = DisplayTimeout::new(0, 0);
        timeout.configure(2);
        let before = *timeout.policy();

        assert!(!timeout.configure(5));
        assert!(!timeout.configure(-1));
        assert!(!timeout.configure(100));
        assert_eq!(*timeout.policy(), before);
    }

    #[test]
    fn test_always_on_never_expires() {
        let mut timeout = DisplayTimeout::new(0, 150);
        timeout.configure(4);
        for now in [1, 5001, 60_000, u32::MAX] {
            assert_eq!(timeout.tick(now), Action::None);
        }
        // Countdown stays nominally running
        assert!(timeout.is_active());
    }

    #[test]
    fn test_always_on_keeps_expired_state() {
        let mut timeout = DisplayTimeout::new(0, 150);
        assert_eq!(timeout.tick(5001), Action::ExpireAndDim);
        timeout.configure(4);
        assert!(!timeout.is_active());
    }

    #[test]
    fn test_short_levels_rearm() {
        let mut timeout = DisplayTimeout::new(0, 150);
        assert_eq!(timeout.tick(5001), Action::ExpireAndDim);
        timeout.configure(3);
        assert!(timeout.is_active());
    }

    #[test]
    fn test_configure_keeps_brightness_and_timestamp() {
        let mut timeout = DisplayTimeout::new(1234, 42);
        timeout.configure(2);
        assert_eq!(timeout.brightness(), 42);
        assert_eq!(timeout.policy().last_activity_ms, 1234);
    }

    #[test]
    fn test_keep_alive_follows_brightness() {
        let mut timeout = DisplayTimeout::new(0, 10);
        timeout.set_brightness(250);
        assert_eq!(timeout.tick(1), Action::KeepAlive(250));
    }

    #[test]
    fn test_wraparound_keep_alive() {
        let mut timeout = DisplayTimeout::new(0, 90);
        timeout.record_activity(u32::MAX - 100);
        assert_eq!(timeout.tick(50), Action::KeepAlive(90));
    }
}
