//! Backlight wrapper for the UI loop

use defmt::*;
use embassy_rp::pwm::PwmOutput;

use dial_core::traits::Backlight;
use dial_drivers::backlight::PwmBacklight;

/// Backlight on PWM slice 4, channel B
///
/// A rejected duty leaves the previous level lit and is logged.
pub struct WatchBacklight(PwmBacklight<PwmOutput<'static>>);

impl WatchBacklight {
    pub fn new(inner: PwmBacklight<PwmOutput<'static>>) -> Self {
        Self(inner)
    }
}

impl Backlight for WatchBacklight {
    fn set_brightness(&mut self, level: u8) {
        if let Err(e) = self.0.try_set_brightness(level) {
            warn!(
                "Backlight rejected level {} (keeping {}): {:?}",
                level,
                self.0.level(),
                Debug2Format(&e)
            );
        }
    }
}
