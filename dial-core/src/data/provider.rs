//! Data provider trait

use super::types::{Contact, FaceStats, FileEntry, HourlyForecast, Notification, Weather};

/// Number of hourly entries shown on the weather screen
pub const HOURLY_PREVIEW_LEN: usize = 4;

/// Source of the records shown on the demo screens
///
/// The firmware ships [`SampleData`](super::SampleData); a paired phone
/// or local storage can stand in later without touching the screens.
pub trait DataProvider {
    /// All notifications, newest first
    fn notifications(&self) -> &[Notification];

    /// Daily weather, today first
    fn weather(&self) -> &[Weather];

    /// Hourly forecast for today
    fn hourly(&self) -> &[HourlyForecast];

    /// Weather location name
    fn city(&self) -> &str;

    /// Time of the last weather update ("HH:MM")
    fn weather_updated(&self) -> &str;

    fn contacts(&self) -> &[Contact];

    fn files(&self) -> &[FileEntry];

    /// Current watch face complication values
    fn face_stats(&self) -> FaceStats;

    /// Bluetooth address shown on the about screen
    fn device_address(&self) -> &str;

    /// Look up a notification by list index
    ///
    /// The index wraps around the list so any row index selects an entry.
    fn notification(&self, index: usize) -> Option<&Notification> {
        let all = self.notifications();
        if all.is_empty() {
            return None;
        }
        all.get(index % all.len())
    }

    /// Today's weather
    fn current_weather(&self) -> Option<&Weather> {
        self.weather().first()
    }

    /// The first few hourly entries
    fn hourly_preview(&self) -> &[HourlyForecast] {
        let hourly = self.hourly();
        &hourly[..hourly.len().min(HOURLY_PREVIEW_LEN)]
    }
}
