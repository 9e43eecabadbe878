//! Built-in sample data
//!
//! Fixed records used until a phone is paired.

use super::provider::DataProvider;
use super::types::{
    Contact, FaceStats, FileEntry, HourlyForecast, Notification, Weather, WeatherIcon,
};

const NOTIFICATIONS: [Notification; 10] = [
    Notification {
        icon: 0xC0,
        app: "Chronos",
        time: "10:27",
        message: "Chronos v3.7.5 is live! Enjoy enhanced notifications for finding your watch and viewing activity status, plus more. Upgrade now for an improved experience",
    },
    Notification {
        icon: 0x08,
        app: "Skype",
        time: "09:30",
        message: "Hey there! Just reminding you about our meeting at 10:00 AM. Please make sure to prepare the presentation slides and gather all necessary documents beforehand. Looking forward to a productive discussion!",
    },
    Notification {
        icon: 0x10,
        app: "Facebook",
        time: "14:20",
        message: "You've got 3 new friend requests. Check them out now! Don't forget to catch up with your old friends and see what they've been up to lately. It's always nice to reconnect and expand your social circle.",
    },
    Notification {
        icon: 0x18,
        app: "Telegram",
        time: "16:45",
        message: "New message from John: 'Hey, have you seen the latest news?' Let's catch up later today and discuss the latest updates together. It's always interesting to exchange ideas and opinions on current events.",
    },
    Notification {
        icon: 0x11,
        app: "Messenger",
        time: "19:10",
        message: "Sarah sent you a photo. Tap to view it! Sarah has always been good at capturing moments. Let's see what memorable snapshot she has shared this time. It might bring back some fond memories or inspire us for our next adventure.",
    },
    Notification {
        icon: 0x12,
        app: "Instagram",
        time: "11:55",
        message: "Your post got 50 likes! Keep up the good work. Your creativity and unique perspective are truly appreciated by your followers. Let's continue to share meaningful content and inspire others along the way.",
    },
    Notification {
        icon: 0x13,
        app: "Weibo",
        time: "07:30",
        message: "Trending topic: #TravelTuesday. Share your latest adventures! Whether it's a breathtaking landscape, a delicious local dish, or an unforgettable cultural experience, your travel stories never fail to captivate your audience. Let's share another exciting chapter of your journey!",
    },
    Notification {
        icon: 0x09,
        app: "Wechat",
        time: "22:15",
        message: "New message from Mom: 'Don't forget to buy milk on your way home!' Mom always has our best interests at heart. Let's make sure to pick up the milk and any other groceries she needs. It's a small gesture of appreciation for all her love and care.",
    },
    Notification {
        icon: 0x0F,
        app: "Twitter",
        time: "18:00",
        message: "Breaking news: SpaceX launches its latest satellite into orbit. The advancements in space exploration never cease to amaze us. Let's stay updated on the latest developments and continue to support the incredible work being done in the field of aerospace engineering.",
    },
    Notification {
        icon: 0x07,
        app: "Tencent",
        time: "13:40",
        message: "Your gaming buddy is online. Ready for a match? It's time to put our skills to the test and embark on another thrilling gaming adventure together. Let's strategize, communicate, and emerge victorious as a team!",
    },
];

const fn day(icon: WeatherIcon, day: u8, temp: i8, high: i8, low: i8) -> Weather {
    Weather {
        icon,
        day,
        temp,
        high,
        low,
    }
}

const WEATHER: [Weather; 7] = [
    day(WeatherIcon::SunCloud, 0, 21, 22, 18),
    day(WeatherIcon::Clouds, 1, 25, 26, 24),
    day(WeatherIcon::Tornado, 2, 23, 24, 17),
    day(WeatherIcon::Snow, 3, 20, 23, 12),
    day(WeatherIcon::SunCloud, 4, 27, 27, 23),
    day(WeatherIcon::Rain, 5, 22, 25, 18),
    day(WeatherIcon::Snow, 6, 24, 26, 19),
];

const fn hour(
    hour: u8,
    icon: WeatherIcon,
    temp: i8,
    uv: u8,
    humidity: u8,
    wind: u8,
) -> HourlyForecast {
    HourlyForecast {
        day: 1,
        hour,
        icon,
        temp,
        uv,
        humidity,
        wind,
    }
}

const HOURLY: [HourlyForecast; 24] = [
    hour(0, WeatherIcon::SunCloud, 25, 5, 70, 15),
    hour(1, WeatherIcon::Sun, 23, 4, 65, 10),
    hour(2, WeatherIcon::Rain, 20, 2, 85, 12),
    hour(3, WeatherIcon::SunCloud, 21, 1, 75, 14),
    hour(4, WeatherIcon::Clouds, 19, 0, 90, 8),
    hour(5, WeatherIcon::Sun, 22, 3, 60, 20),
    hour(6, WeatherIcon::SunCloud, 26, 6, 50, 18),
    hour(7, WeatherIcon::Sun, 28, 7, 45, 22),
    hour(8, WeatherIcon::Snow, 16, 1, 85, 5),
    hour(9, WeatherIcon::Wind, 30, 8, 35, 25),
    hour(10, WeatherIcon::SunCloud, 32, 9, 40, 30),
    hour(11, WeatherIcon::Tornado, 27, 4, 65, 18),
    hour(12, WeatherIcon::SunHaze, 35, 10, 20, 12),
    hour(13, WeatherIcon::Sun, 34, 9, 25, 28),
    hour(14, WeatherIcon::Clouds, 29, 8, 50, 24),
    hour(15, WeatherIcon::Rain, 22, 6, 85, 14),
    hour(16, WeatherIcon::SunCloud, 25, 5, 70, 19),
    hour(17, WeatherIcon::Sun, 26, 5, 65, 20),
    hour(18, WeatherIcon::Wind, 30, 7, 45, 17),
    hour(19, WeatherIcon::SunCloud, 24, 4, 75, 22),
    hour(20, WeatherIcon::SunHaze, 28, 3, 80, 10),
    hour(21, WeatherIcon::Clouds, 22, 1, 85, 12),
    hour(22, WeatherIcon::Rain, 20, 2, 90, 16),
    hour(23, WeatherIcon::SunCloud, 18, 0, 95, 8),
];

const fn contact(favourite: bool) -> Contact {
    Contact {
        name: "fbiego Chronos",
        number: "1234567890",
        favourite,
    }
}

const CONTACTS: [Contact; 8] = [
    contact(false),
    contact(false),
    contact(true),
    contact(false),
    contact(false),
    contact(false),
    contact(false),
    contact(false),
];

const FILES: [FileEntry; 6] = [
    FileEntry::dir("watchface"),
    FileEntry::dir("extracted"),
    FileEntry::dir("bluetooth"),
    FileEntry::file("kenya.bin", 152_453),
    FileEntry::file("kenya.wf", 453),
    FileEntry::file("list.txt", 2453),
];

const FACE_STATS: FaceStats = FaceStats {
    temp: 22,
    icon: WeatherIcon::Sun,
    battery: 75,
    connected: true,
    steps: 2735,
    distance: 17,
    kcal: 348,
    bpm: 76,
    oxygen: 97,
};

/// Static demo data set
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleData;

impl SampleData {
    /// Create the sample data provider
    pub const fn new() -> Self {
        Self
    }
}

impl DataProvider for SampleData {
    fn notifications(&self) -> &[Notification] {
        &NOTIFICATIONS
    }

    fn weather(&self) -> &[Weather] {
        &WEATHER
    }

    fn hourly(&self) -> &[HourlyForecast] {
        &HOURLY
    }

    fn city(&self) -> &str {
        "Nairobi"
    }

    fn weather_updated(&self) -> &str {
        "10:47"
    }

    fn contacts(&self) -> &[Contact] {
        &CONTACTS
    }

    fn files(&self) -> &[FileEntry] {
        &FILES
    }

    fn face_stats(&self) -> FaceStats {
        FACE_STATS
    }

    fn device_address(&self) -> &str {
        "A1:B2:C3:D4:E5:F6"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{FileKind, HOURLY_PREVIEW_LEN};

    #[test]
    fn test_notification_index_wraps() {
        let data = SampleData::new();
        assert_eq!(data.notification(0).unwrap().app, "Chronos");
        assert_eq!(data.notification(9).unwrap().app, "Tencent");
        assert_eq!(data.notification(10).unwrap().app, "Chronos");
        assert_eq!(data.notification(13).unwrap().app, "Telegram");
    }

    #[test]
    fn test_hourly_preview() {
        let data = SampleData::new();
        let preview = data.hourly_preview();
        assert_eq!(preview.len(), HOURLY_PREVIEW_LEN);
        assert_eq!(preview[2].icon, WeatherIcon::Rain);
        assert_eq!(data.hourly().len(), 24);
        assert!(data.hourly().iter().enumerate().all(|(i, h)| h.hour as usize == i));
    }

    #[test]
    fn test_weather_today() {
        let data = SampleData::new();
        let today = data.current_weather().unwrap();
        assert_eq!(today.temp, 21);
        assert_eq!(today.icon, WeatherIcon::SunCloud);
        assert!(data.weather().iter().all(|w| w.low <= w.high));
    }

    #[test]
    fn test_single_favourite_contact() {
        let data = SampleData::new();
        let favourites: usize = data.contacts().iter().filter(|c| c.favourite).count();
        assert_eq!(favourites, 1);
        assert!(data.contacts()[2].favourite);
    }

    #[test]
    fn test_files_dirs_first() {
        let data = SampleData::new();
        let files = data.files();
        assert_eq!(files[0].kind, FileKind::Dir);
        assert_eq!(files[3].kind, FileKind::File(152_453));
    }

    #[test]
    fn test_icon_codes() {
        for code in 0..8 {
            assert_eq!(WeatherIcon::from_code(code).unwrap() as u8, code);
        }
        assert_eq!(WeatherIcon::from_code(8), None);
    }
}
