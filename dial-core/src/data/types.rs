//! Data record types

/// Weather condition icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum WeatherIcon {
    SunCloud = 0,
    Sun = 1,
    Snow = 2,
    Rain = 3,
    Clouds = 4,
    Tornado = 5,
    Wind = 6,
    SunHaze = 7,
}

impl WeatherIcon {
    /// Create an icon from its wire code (0-7)
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(WeatherIcon::SunCloud),
            1 => Some(WeatherIcon::Sun),
            2 => Some(WeatherIcon::Snow),
            3 => Some(WeatherIcon::Rain),
            4 => Some(WeatherIcon::Clouds),
            5 => Some(WeatherIcon::Tornado),
            6 => Some(WeatherIcon::Wind),
            7 => Some(WeatherIcon::SunHaze),
            _ => None,
        }
    }

    /// Short description for text screens
    pub fn label(self) -> &'static str {
        match self {
            WeatherIcon::SunCloud => "Partly cloudy",
            WeatherIcon::Sun => "Sunny",
            WeatherIcon::Snow => "Snow",
            WeatherIcon::Rain => "Rain",
            WeatherIcon::Clouds => "Cloudy",
            WeatherIcon::Tornado => "Tornado",
            WeatherIcon::Wind => "Windy",
            WeatherIcon::SunHaze => "Haze",
        }
    }
}

/// A phone notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    /// App icon code
    pub icon: u8,
    /// Source app name
    pub app: &'static str,
    /// Arrival time ("HH:MM")
    pub time: &'static str,
    /// Message body
    pub message: &'static str,
}

/// Daily weather summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Weather {
    pub icon: WeatherIcon,
    /// Day of week (0 = Sunday)
    pub day: u8,
    /// Current temperature in °C
    pub temp: i8,
    pub high: i8,
    pub low: i8,
}

/// One hour of forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HourlyForecast {
    /// Day of the forecast
    pub day: u8,
    /// Hour of day (0-23)
    pub hour: u8,
    pub icon: WeatherIcon,
    /// Temperature in °C
    pub temp: i8,
    /// UV index
    pub uv: u8,
    /// Relative humidity in %
    pub humidity: u8,
    /// Wind speed in km/h
    pub wind: u8,
}

/// Address book entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub name: &'static str,
    pub number: &'static str,
    pub favourite: bool,
}

/// File manager entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FileKind {
    /// Directory
    Dir,
    /// Regular file with its size in bytes
    File(u32),
}

/// File manager entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileEntry {
    pub name: &'static str,
    pub kind: FileKind,
}

impl FileEntry {
    /// Create a directory entry
    pub const fn dir(name: &'static str) -> Self {
        Self {
            name,
            kind: FileKind::Dir,
        }
    }

    /// Create a file entry
    pub const fn file(name: &'static str, size: u32) -> Self {
        Self {
            name,
            kind: FileKind::File(size),
        }
    }
}

/// Values shown on the watch face complications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceStats {
    /// Outside temperature in °C
    pub temp: i8,
    pub icon: WeatherIcon,
    /// Battery charge in %
    pub battery: u8,
    /// Phone link state
    pub connected: bool,
    pub steps: u32,
    /// Distance walked in km
    pub distance: u16,
    pub kcal: u16,
    /// Heart rate in beats per minute
    pub bpm: u8,
    /// Blood oxygen in %
    pub oxygen: u8,
}
