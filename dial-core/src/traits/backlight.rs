//! Backlight brightness sink

/// Trait for backlight control
///
/// Implementations drive the panel backlight through PWM or a dimming
/// register. Setting a level is assumed to always succeed.
pub trait Backlight {
    /// Set the brightness level (0 = off, 255 = full)
    fn set_brightness(&mut self, level: u8);

    /// Switch the backlight fully off
    fn off(&mut self) {
        self.set_brightness(0);
    }
}
