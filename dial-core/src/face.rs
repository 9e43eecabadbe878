//! Clock face formatting
//!
//! Converts wall-clock seconds into the labels drawn on the home screen.

use core::fmt::Write;

use heapless::String;

/// Weekday names, Sunday first
pub const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Month abbreviations, January first
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Broken-down UTC date and time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    /// Full year, e.g. 2024
    pub year: u16,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    /// 0-23
    pub hour: u8,
    /// 0-59
    pub minute: u8,
    /// 0-59
    pub second: u8,
    /// 0 = Sunday
    pub weekday: u8,
}

impl DateTime {
    /// Convert seconds since 1970-01-01 to a calendar date
    pub fn from_unix(secs: u32) -> Self {
        let days = secs / 86_400;
        let rem = secs % 86_400;
        let hour = (rem / 3600) as u8;
        let minute = (rem % 3600 / 60) as u8;
        let second = (rem % 60) as u8;

        // 1970-01-01 was a Thursday
        let weekday = ((days + 4) % 7) as u8;

        // Civil-from-days over 400-year eras, counting from 0000-03-01
        let z = days as i64 + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
        let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
        let year = (yoe + era * 400 + i64::from(month <= 2)) as u16;

        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            weekday,
        }
    }

    /// Weekday name
    pub fn weekday_name(&self) -> &'static str {
        WEEKDAYS[self.weekday as usize % WEEKDAYS.len()]
    }

    /// Month abbreviation
    pub fn month_name(&self) -> &'static str {
        MONTHS[(self.month as usize).saturating_sub(1) % MONTHS.len()]
    }

    /// Check if the time is before noon
    pub fn is_am(&self) -> bool {
        self.hour < 12
    }
}

/// Labels for the home clock face
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockFace {
    /// Two-digit hour
    pub hour: String<2>,
    /// Two-digit minute
    pub minute: String<2>,
    /// Full weekday name
    pub day: &'static str,
    /// Day of month and month name on two lines ("07\nMar")
    pub date: String<8>,
    /// Empty in 24-hour mode
    pub am_pm: &'static str,
}

impl ClockFace {
    /// Format the labels for a date and time
    pub fn from_datetime(dt: &DateTime) -> Self {
        let mut hour = String::new();
        let mut minute = String::new();
        let mut date = String::new();
        // Capacities fit every value the fields can hold
        let _ = write!(hour, "{:02}", dt.hour);
        let _ = write!(minute, "{:02}", dt.minute);
        let _ = write!(date, "{:02}\n{}", dt.day, dt.month_name());

        Self {
            hour,
            minute,
            day: dt.weekday_name(),
            date,
            am_pm: "",
        }
    }
}
