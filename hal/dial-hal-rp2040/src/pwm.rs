//! Backlight PWM slice configuration

use dial_hal::PwmTiming;
use embassy_rp::pwm;
use fixed::types::U12F4;

/// PWM configuration driving channel B at `freq_hz`
///
/// The duty cycle starts at zero; the backlight driver sets it.
pub fn backlight_config(sys_hz: u32, freq_hz: u32) -> pwm::Config {
    let timing = PwmTiming::for_frequency(sys_hz, freq_hz);

    let mut config = pwm::Config::default();
    config.divider = U12F4::from_bits(timing.divider_x16);
    config.top = timing.top;
    config.compare_a = 0;
    config.compare_b = 0;
    config
}
