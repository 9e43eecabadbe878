//! Time sources
//!
//! The monotonic millisecond clock for the timeout controller and the
//! wall clock shown on the watch face. There is no RTC on the board; wall
//! time starts at the configured instant and advances with uptime.

use dial_core::face::DateTime;
use dial_core::traits::Clock;
use embassy_time::Instant;

/// Monotonic clock backed by the embassy time driver
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        // Consumers compare by wrapping subtraction
        Instant::now().as_millis() as u32
    }
}

/// Wall clock derived from a boot-time Unix timestamp
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    start_unix: u32,
}

impl WallClock {
    pub fn new(start_unix: u32) -> Self {
        Self { start_unix }
    }

    /// Seconds since 1970-01-01 UTC
    pub fn unix_now(&self) -> u32 {
        let uptime = Instant::now().as_secs() as u32;
        self.start_unix.wrapping_add(uptime)
    }

    /// Current calendar time
    pub fn now(&self) -> DateTime {
        DateTime::from_unix(self.unix_now())
    }
}
