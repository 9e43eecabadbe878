//! Event sink traits

/// A settings change coming from the settings screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingChange {
    /// Timeout selector moved to a level index
    Timeout(i32),
    /// Display rotation selector moved (0-3, quarter turns)
    Rotation(u8),
}

/// Receiver of user-activity notifications
pub trait ActivitySink {
    /// Record that the user touched the screen at `now_ms`
    fn record_activity(&mut self, now_ms: u32);
}

/// Receiver of all UI event categories
pub trait EventSink: ActivitySink {
    /// Touch activity
    fn on_activity(&mut self, now_ms: u32) {
        self.record_activity(now_ms);
    }

    /// Brightness slider moved
    fn on_brightness_change(&mut self, level: u8);

    /// A selector on the settings screen changed
    fn on_setting_change(&mut self, change: SettingChange);
}
