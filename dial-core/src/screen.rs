//! Screen composition
//!
//! Builds a text description of each view: an optional large headline,
//! a title and up to eight lines. The firmware renderer draws it; host
//! tests inspect it directly.

use core::fmt::Write;

use heapless::String;

use crate::data::{DataProvider, FileKind};
use crate::face::{ClockFace, DateTime, WEEKDAYS};
use crate::prefs::Preferences;
use crate::view::{View, VISIBLE_ROWS};

/// Maximum bytes per line
pub const LINE_LEN: usize = 24;

/// Characters per line when wrapping message text
pub const WRAP_COLS: usize = 20;

/// Height of the title band in pixels
pub const TITLE_HEIGHT: u16 = 40;

/// Height of one text line in pixels
pub const LINE_HEIGHT: u16 = 22;

/// Shown on the about screen above the board name
pub const ABOUT_TEXT: &str = "Dial watch";

/// Board name shown on the about screen
pub const BOARD_NAME: &str = "Pico RP2040";

/// Lines above the wrapped body of an open message (time and app)
pub const MESSAGE_HEADER_ROWS: usize = 2;

/// Text line under screen coordinate `y`
pub fn line_at(y: u16) -> Option<usize> {
    let line = usize::from(y.checked_sub(TITLE_HEIGHT)? / LINE_HEIGHT);
    (line < VISIBLE_ROWS).then_some(line)
}

/// Composed content of one view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    /// Large centred text (clock time, current temperature)
    headline: String<LINE_LEN>,
    title: String<LINE_LEN>,
    lines: [String<LINE_LEN>; VISIBLE_ROWS],
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen
    pub fn new() -> Self {
        Self {
            headline: String::new(),
            title: String::new(),
            lines: core::array::from_fn(|_| String::new()),
        }
    }

    /// Clear the entire screen
    pub fn clear(&mut self) {
        self.headline.clear();
        self.title.clear();
        for line in &mut self.lines {
            line.clear();
        }
    }

    pub fn headline(&self) -> &str {
        &self.headline
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Set the content of a specific row, truncating long text
    pub fn set_line(&mut self, row: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(row) {
            set_truncated(line, text);
        }
    }

    /// Set consecutive rows from newline-separated text
    ///
    /// Returns the row after the last one written.
    pub fn set_lines(&mut self, row: usize, text: &str) -> usize {
        let mut row = row;
        for part in text.split('\n') {
            self.set_line(row, part);
            row += 1;
        }
        row
    }

    /// Build the content of `view`
    ///
    /// # Arguments
    /// * `view` - View to show
    /// * `scroll` - First visible entry on list views, or first visible
    ///   line of an open message
    /// * `prefs` - Current settings
    /// * `data` - Source of notifications, weather and the rest
    /// * `now` - Wall-clock time
    pub fn compose(
        &mut self,
        view: View,
        scroll: usize,
        prefs: &Preferences,
        data: &impl DataProvider,
        now: &DateTime,
    ) {
        self.clear();
        set_truncated(&mut self.title, view.title());

        match view {
            View::Clock => self.compose_clock(data, now),
            View::Weather => self.compose_weather(data),
            View::Forecast => {
                for (row, day) in data.weather().iter().take(VISIBLE_ROWS).enumerate() {
                    let name = WEEKDAYS[usize::from(day.day) % WEEKDAYS.len()];
                    self.format_line(
                        row,
                        format_args!(
                            "{} {}/{} {}",
                            short(name),
                            day.high,
                            day.low,
                            day.icon.label()
                        ),
                    );
                }
            }
            View::Notifications => {
                let visible = data.notifications().iter().skip(scroll).take(VISIBLE_ROWS);
                for (row, note) in visible.enumerate() {
                    self.format_line(row, format_args!("{}  {}", note.app, note.time));
                }
            }
            View::Message(index) => {
                if let Some(note) = data.notification(usize::from(index)) {
                    let header = [note.time, note.app].into_iter().map(truncated);
                    let visible = header
                        .chain(wrap(note.message))
                        .skip(scroll)
                        .take(VISIBLE_ROWS);
                    for (row, line) in visible.enumerate() {
                        self.set_line(row, &line);
                    }
                }
            }
            View::Contacts => {
                let visible = data.contacts().iter().skip(scroll).take(VISIBLE_ROWS);
                for (row, contact) in visible.enumerate() {
                    let marker = if contact.favourite { "*" } else { "" };
                    self.format_line(row, format_args!("{}{}", marker, contact.name));
                }
            }
            View::Files => {
                let dirs = data
                    .files()
                    .iter()
                    .filter(|f| matches!(f.kind, FileKind::Dir));
                let files = data
                    .files()
                    .iter()
                    .filter(|f| matches!(f.kind, FileKind::File(_)));
                let visible = dirs.chain(files).skip(scroll).take(VISIBLE_ROWS);
                for (row, entry) in visible.enumerate() {
                    match entry.kind {
                        FileKind::Dir => self.format_line(row, format_args!("{}/", entry.name)),
                        FileKind::File(size) => {
                            self.format_line(row, format_args!("{} {}", entry.name, size))
                        }
                    }
                }
            }
            View::Settings => {
                self.format_line(0, format_args!("Timeout: {}", prefs.timeout_level.label()));
                self.format_line(1, format_args!("Brightness: {}", prefs.brightness));
                self.format_line(2, format_args!("Rotation: {}", prefs.rotation()));
            }
            View::About => {
                let row = self.set_lines(0, ABOUT_TEXT);
                self.set_line(row, BOARD_NAME);
                self.set_line(row + 1, data.device_address());
            }
        }
    }

    fn compose_clock(&mut self, data: &impl DataProvider, now: &DateTime) {
        let face = ClockFace::from_datetime(now);
        let stats = data.face_stats();

        self.headline.clear();
        let _ = write_to_string(&mut self.headline, format_args!("{}:{}", face.hour, face.minute));
        set_truncated(&mut self.title, face.day);

        let row = self.set_lines(0, &face.date);
        let row = self.set_lines(row, face.am_pm);
        self.format_line(row, format_args!("Battery {}%", stats.battery));
        self.format_line(row + 1, format_args!("Steps {}", stats.steps));
        self.format_line(
            row + 2,
            format_args!("{}°C {}", stats.temp, stats.icon.label()),
        );
    }

    fn compose_weather(&mut self, data: &impl DataProvider) {
        set_truncated(&mut self.title, data.city());

        let row = self.set_lines(0, "Updated at");
        let mut row = self.set_lines(row, data.weather_updated());
        if let Some(current) = data.current_weather() {
            self.headline.clear();
            let _ = write_to_string(&mut self.headline, format_args!("{}°C", current.temp));
            self.set_line(row, current.icon.label());
            row += 1;
        }
        for hour in data.hourly_preview() {
            self.format_line(
                row,
                format_args!("{:02}:00 {}°C", hour.hour, hour.temp),
            );
            row += 1;
        }
    }

    fn format_line(&mut self, row: usize, args: core::fmt::Arguments<'_>) {
        if let Some(line) = self.lines.get_mut(row) {
            line.clear();
            let _ = write_to_string(line, args);
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[{}", self.title.as_str());
        for line in self.lines.iter().filter(|l| !l.is_empty()) {
            defmt::write!(f, ", {}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}

/// First three letters of a day name
fn short(name: &str) -> &str {
    name.get(..3).unwrap_or(name)
}

/// Writer that drops whatever does not fit
struct Truncating<'a>(&'a mut String<LINE_LEN>);

impl Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        push_truncated(self.0, s);
        Ok(())
    }
}

/// Helper to write formatted output to a heapless String
fn write_to_string(s: &mut String<LINE_LEN>, args: core::fmt::Arguments<'_>) -> core::fmt::Result {
    Truncating(s).write_fmt(args)
}

/// Split `text` into lines of at most [`WRAP_COLS`] characters
///
/// Breaks only between words. A single word wider than a line gets a line
/// of its own and is cut at [`LINE_LEN`] bytes.
pub fn wrap(text: &str) -> impl Iterator<Item = String<LINE_LEN>> + '_ {
    let mut words = text.split_whitespace().peekable();
    core::iter::from_fn(move || {
        let mut line: String<LINE_LEN> = String::new();
        let mut cols = 0;
        while let Some(word) = words.peek() {
            let len = word.chars().count();
            if cols > 0 && cols + 1 + len > WRAP_COLS {
                break;
            }
            if cols > 0 {
                let _ = line.push(' ');
                cols += 1;
            }
            push_truncated(&mut line, word);
            cols += len;
            words.next();
        }
        (cols > 0).then_some(line)
    })
}

/// Rows an open message occupies before windowing
pub fn message_rows(message: &str) -> usize {
    MESSAGE_HEADER_ROWS + wrap(message).count()
}

fn truncated(text: &str) -> String<LINE_LEN> {
    let mut line = String::new();
    push_truncated(&mut line, text);
    line
}

fn set_truncated(line: &mut String<LINE_LEN>, text: &str) {
    line.clear();
    push_truncated(line, text);
}

/// Append as many whole characters of `text` as fit
fn push_truncated(line: &mut String<LINE_LEN>, text: &str) {
    for c in text.chars() {
        if line.push(c).is_err() {
            break;
        }
    }
}
