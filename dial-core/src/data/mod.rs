//! Watch data
//!
//! Records shown by the demo screens, the provider trait the screens
//! read them through, and the built-in sample data set.

pub mod provider;
pub mod sample;
pub mod types;

pub use provider::{DataProvider, HOURLY_PREVIEW_LEN};
pub use sample::SampleData;
pub use types::{
    Contact, FaceStats, FileEntry, FileKind, HourlyForecast, Notification, Weather, WeatherIcon,
};
