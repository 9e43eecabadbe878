//! PWM backlight
//!
//! Maps the 0-255 brightness level onto the duty cycle of a PWM channel.
//! Some boards drive the LED through an inverting transistor, in which
//! case full duty means dark.
//!
//! [`Backlight`] is only implemented for channels that cannot fail. Other
//! channels go through [`PwmBacklight::try_set_brightness`] so the caller
//! decides what a rejected duty means.

use core::convert::Infallible;

use dial_core::traits::Backlight;
use embedded_hal::pwm::SetDutyCycle;

/// Backlight driven by one PWM channel
pub struct PwmBacklight<P> {
    pwm: P,
    /// If true, level 255 = duty 0
    inverted: bool,
    level: u8,
}

impl<P: SetDutyCycle> PwmBacklight<P> {
    /// Create a new backlight and switch it off
    ///
    /// # Arguments
    /// - `pwm`: The PWM channel driving the LED
    /// - `inverted`: If true, the LED is lit while the output is low
    pub fn new(pwm: P, inverted: bool) -> Result<Self, P::Error> {
        let mut backlight = Self {
            pwm,
            inverted,
            level: 0,
        };
        backlight.try_set_brightness(0)?;
        Ok(backlight)
    }

    /// Get the last level the channel accepted
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Write the duty cycle for `level`
    ///
    /// On error the previous level is kept.
    pub fn try_set_brightness(&mut self, level: u8) -> Result<(), P::Error> {
        let duty = self.duty_for(level);
        self.pwm
            .set_duty_cycle_fraction(u16::from(duty), u16::from(u8::MAX))?;
        self.level = level;
        Ok(())
    }

    /// Duty numerator (out of 255) for a brightness level
    fn duty_for(&self, level: u8) -> u8 {
        if self.inverted {
            u8::MAX - level
        } else {
            level
        }
    }
}

impl<P: SetDutyCycle<Error = Infallible>> Backlight for PwmBacklight<P> {
    fn set_brightness(&mut self, level: u8) {
        match self.try_set_brightness(level) {
            Ok(()) => {}
            Err(e) => match e {},
        }
    }
}
