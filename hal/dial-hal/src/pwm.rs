//! PWM timing
//!
//! Works out the counter wrap value and clock divider needed for a
//! requested PWM frequency. The divider is fixed-point with four
//! fractional bits, as on the RP2040 PWM slices.

/// Largest counter wrap value
pub const MAX_TOP: u16 = u16::MAX;

/// Divider 1.0 in 1/16 units
pub const DIVIDER_ONE: u16 = 16;

/// Largest divider (255 + 15/16) in 1/16 units
pub const DIVIDER_MAX: u16 = 0x0FFF;

/// Counter settings for one PWM slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmTiming {
    /// Clock divider in 1/16 units
    pub divider_x16: u16,
    /// Counter wrap value (period = top + 1 ticks)
    pub top: u16,
}

impl PwmTiming {
    /// Pick the finest resolution that reaches `freq_hz`
    ///
    /// # Arguments
    /// * `sys_hz` - PWM source clock
    /// * `freq_hz` - Wanted output frequency
    pub fn for_frequency(sys_hz: u32, freq_hz: u32) -> Self {
        let period_x16 = u64::from(sys_hz / freq_hz.max(1)) * 16;
        let divider_x16 = period_x16
            .div_ceil(u64::from(MAX_TOP) + 1)
            .clamp(u64::from(DIVIDER_ONE), u64::from(DIVIDER_MAX));
        let top = (period_x16 / divider_x16).saturating_sub(1).min(u64::from(MAX_TOP));

        Self {
            divider_x16: divider_x16 as u16,
            top: top as u16,
        }
    }

    /// Output frequency these settings produce
    pub fn frequency(&self, sys_hz: u32) -> u32 {
        let ticks_x16 = u64::from(self.divider_x16) * (u64::from(self.top) + 1);
        (u64::from(sys_hz) * 16 / ticks_x16.max(1)) as u32
    }
}
