//! Minimal TOML reader for `watch.toml`
//!
//! Handles only the subset the watch needs:
//! - `key = value` pairs (string, integer, boolean)
//! - `[section]` headers
//! - Comments (`# ...`), including trailing ones
//!
//! Unknown keys are skipped; unknown sections are an error. Keys that are
//! not present keep their built-in default.

use super::hardware::PinConfig;
use super::types::WatchConfig;
use crate::timeout::TimeoutLevel;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Bus,
    Panel,
    Light,
    Touch,
    Ui,
    Clock,
    Timeout,
}

/// Parse `watch.toml` text on top of the built-in defaults
pub fn parse_config(input: &str) -> Result<WatchConfig, ParseError> {
    let mut config = WatchConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let header = strip_comment(line);
            if !header.ends_with(']') {
                return Err(ParseError::InvalidSection);
            }
            section = parse_section_header(&header[1..header.len() - 1])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "bus" => Ok(Section::Bus),
        "panel" => Ok(Section::Panel),
        "light" => Ok(Section::Light),
        "touch" => Ok(Section::Touch),
        "ui" => Ok(Section::Ui),
        "clock" => Ok(Section::Clock),
        "timeout" => Ok(Section::Timeout),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut WatchConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => {
            if key == "version" {
                config.version = parse_int(value)?;
            }
        }
        Section::Bus => {
            let bus = &mut config.display.bus;
            match key {
                "spi_mode" => {
                    let mode: u8 = parse_int(value)?;
                    if mode > 3 {
                        return Err(ParseError::InvalidValue);
                    }
                    bus.spi_mode = mode;
                }
                "freq_write" => bus.freq_write = parse_int(value)?,
                "freq_read" => bus.freq_read = parse_int(value)?,
                "sclk_pin" => bus.sclk = parse_pin(value)?,
                "mosi_pin" => bus.mosi = parse_pin(value)?,
                "miso_pin" => bus.miso = parse_optional_pin(value)?,
                "dc_pin" => bus.dc = parse_pin(value)?,
                _ => {} // Ignore unknown keys
            }
        }
        Section::Panel => {
            let panel = &mut config.display.panel;
            match key {
                "cs_pin" => panel.cs = parse_pin(value)?,
                "rst_pin" => panel.rst = parse_pin(value)?,
                "width" => panel.width = parse_int(value)?,
                "height" => panel.height = parse_int(value)?,
                "offset_x" => panel.offset_x = parse_int(value)?,
                "offset_y" => panel.offset_y = parse_int(value)?,
                "offset_rotation" => panel.offset_rotation = parse_rotation(value)?,
                "invert" => panel.invert = parse_bool(value)?,
                "bgr" => panel.bgr = parse_bool(value)?,
                "readable" => panel.readable = parse_bool(value)?,
                _ => {}
            }
        }
        Section::Light => {
            let light = &mut config.display.light;
            match key {
                "pin" => light.pin = parse_pin(value)?,
                "invert" => light.invert = parse_bool(value)?,
                "freq" => light.freq = parse_int(value)?,
                "brightness" => light.brightness = parse_int(value)?,
                _ => {}
            }
        }
        Section::Touch => {
            let touch = &mut config.display.touch;
            match key {
                "i2c_port" => {
                    let port: u8 = parse_int(value)?;
                    if port > 1 {
                        return Err(ParseError::InvalidValue);
                    }
                    touch.i2c_port = port;
                }
                "address" => touch.address = parse_int(value)?,
                "freq" => touch.freq = parse_int(value)?,
                "sda_pin" => touch.sda = parse_pin(value)?,
                "scl_pin" => touch.scl = parse_pin(value)?,
                "int_pin" => touch.int = parse_pin(value)?,
                "rst_pin" => touch.rst = parse_pin(value)?,
                "x_min" => touch.x_min = parse_int(value)?,
                "x_max" => touch.x_max = parse_int(value)?,
                "y_min" => touch.y_min = parse_int(value)?,
                "y_max" => touch.y_max = parse_int(value)?,
                "offset_rotation" => touch.offset_rotation = parse_rotation(value)?,
                _ => {}
            }
        }
        Section::Ui => match key {
            "loop_delay_ms" => config.ui.loop_delay_ms = parse_int(value)?,
            "brightness_step" => config.ui.brightness_step = parse_int(value)?,
            "splash_brightness" => config.ui.splash_brightness = parse_int(value)?,
            "splash_ms" => config.ui.splash_ms = parse_int(value)?,
            _ => {}
        },
        Section::Clock => {
            if key == "start_unix" {
                config.clock.start_unix = parse_int(value)?;
            }
        }
        Section::Timeout => {
            if key == "level" {
                let index: i32 = parse_int(value)?;
                config.timeout.level =
                    TimeoutLevel::from_index(index).ok_or(ParseError::InvalidValue)?;
            }
        }
    }
    Ok(())
}

/// Drop a trailing comment that is not inside a string
fn strip_comment(value: &str) -> &str {
    match value.find('#') {
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Parse a TOML integer
///
/// Accepts an optional sign on decimal values, `0x`/`0o`/`0b` prefixes and
/// `_` between digits. The value must fit a signed 64-bit integer before
/// narrowing to `T`.
fn parse_int<T: TryFrom<i64>>(value: &str) -> Result<T, ParseError> {
    let (negative, body) = match value.as_bytes().first().copied() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let (radix, digits) = match body.get(..2) {
        Some("0x") => (16, &body[2..]),
        Some("0o") => (8, &body[2..]),
        Some("0b") => (2, &body[2..]),
        _ => (10, body),
    };
    if radix != 10 && body.len() != value.len() {
        return Err(ParseError::InvalidValue);
    }

    let mut raw: u64 = 0;
    let mut after_digit = false;
    for c in digits.chars() {
        if c == '_' {
            if !after_digit {
                return Err(ParseError::InvalidValue);
            }
            after_digit = false;
            continue;
        }
        let digit = c.to_digit(radix).ok_or(ParseError::InvalidValue)?;
        raw = raw
            .checked_mul(u64::from(radix))
            .and_then(|r| r.checked_add(u64::from(digit)))
            .ok_or(ParseError::InvalidValue)?;
        after_digit = true;
    }
    // Empty, or a trailing separator
    if !after_digit {
        return Err(ParseError::InvalidValue);
    }

    let magnitude = i64::try_from(raw).map_err(|_| ParseError::InvalidValue)?;
    let signed = if negative { -magnitude } else { magnitude };
    T::try_from(signed).map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a quarter-turn count (0-3)
fn parse_rotation(value: &str) -> Result<u8, ParseError> {
    let rotation: u8 = parse_int(value)?;
    if rotation > 3 {
        return Err(ParseError::InvalidValue);
    }
    Ok(rotation)
}

/// Parse a pin string like "gpio11", "!gpio12", "^gpio4"
fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let mut s = parse_string(value);
    let mut inverted = false;
    let mut pull_up = false;

    loop {
        if let Some(rest) = s.strip_prefix('!') {
            inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let pin = s
        .strip_prefix("gpio")
        .ok_or(ParseError::InvalidPin)?
        .parse()
        .map_err(|_| ParseError::InvalidPin)?;

    Ok(PinConfig {
        pin,
        inverted,
        pull_up,
    })
}

/// Parse a pin that may be absent ("none")
fn parse_optional_pin(value: &str) -> Result<Option<PinConfig>, ParseError> {
    match parse_string(value) {
        "none" | "" => Ok(None),
        _ => parse_pin(value).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNDERSCORED: &str = r#"
# Digit separators
version = 1

[light]
freq = 1_000

[bus]
spi_mode = 3
freq_write = 62_500_000
"#;

    const FULL: &str = r#"
version = 1

[bus]
spi_mode = 0
freq_write = 40000000
freq_read = 16000000
sclk_pin = "gpio10"
mosi_pin = "gpio11"
miso_pin = "none"
dc_pin = "gpio8"

[panel]
cs_pin = "gpio9"
rst_pin = "gpio13"
width = 240
height = 240
offset_rotation = 2
invert = true
bgr = false

[light]
pin = "gpio25"
invert = true   # active-low driver
brightness = 120

[touch]
i2c_port = 1
address = 0x15
sda_pin = "gpio6"
scl_pin = "gpio7"
int_pin = "!gpio21"
rst_pin = "gpio22"
offset_rotation = 1

[ui]
loop_delay_ms = 10
brightness_step = 50

[clock]
start_unix = 1709208000

[timeout]
level = 3
"#;

    #[test]
    fn test_parse_pin() {
        let pin = parse_pin("gpio11").unwrap();
        assert_eq!(pin.pin, 11);
        assert!(!pin.inverted);
        assert!(!pin.pull_up);

        let pin = parse_pin("!gpio12").unwrap();
        assert_eq!(pin.pin, 12);
        assert!(pin.inverted);

        let pin = parse_pin("\"^!gpio5\"").unwrap();
        assert_eq!(pin.pin, 5);
        assert!(pin.inverted);
        assert!(pin.pull_up);

        assert_eq!(parse_pin("pin5"), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin("gpiox"), Err(ParseError::InvalidPin));
    }

    #[test]
    fn test_parse_optional_pin() {
        assert_eq!(parse_optional_pin("\"none\"").unwrap(), None);
        assert_eq!(
            parse_optional_pin("gpio12").unwrap(),
            Some(PinConfig::new(12))
        );
    }

    #[test]
    fn test_parse_int_forms() {
        assert_eq!(parse_int::<u8>("0x15").unwrap(), 0x15);
        assert_eq!(parse_int::<u32>("44100").unwrap(), 44_100);
        assert_eq!(parse_int::<u8>("0x1FF"), Err(ParseError::InvalidValue));
        assert_eq!(parse_int::<u8>("-1"), Err(ParseError::InvalidValue));
        assert_eq!(parse_int::<i32>("-1").unwrap(), -1);
        assert_eq!(parse_int::<i16>("+35").unwrap(), 35);
        assert_eq!(parse_int::<u8>("0b1010").unwrap(), 10);
        assert_eq!(parse_int::<u16>("0o755").unwrap(), 0o755);
        assert_eq!(parse_int::<u32>("0xdead_beef").unwrap(), 0xdead_beef);
    }

    #[test]
    fn test_parse_int_digit_separators() {
        assert_eq!(parse_int::<u32>("62_500_000").unwrap(), 62_500_000);
        assert_eq!(parse_int::<u64>("1_700_000_000").unwrap(), 1_700_000_000);
        for bad in ["_1000", "1000_", "1__000", "", "-", "0x", "-0x10", "1 000"] {
            assert_eq!(parse_int::<u32>(bad), Err(ParseError::InvalidValue), "{bad}");
        }
    }

    #[test]
    fn test_firmware_default_config_parses() {
        let shipped = include_str!("../../../dial-firmware/watch.toml");
        let config = parse_config(shipped).unwrap();
        assert_eq!(config.display.touch.address, 0x15);
        assert_eq!(config.clock.start_unix, 1_700_000_000);
    }

    #[test]
    fn test_underscored_config_matches_plain() {
        let config = parse_config(UNDERSCORED).unwrap();
        assert_eq!(config.display.bus.freq_write, 62_500_000);
        assert_eq!(config.display.light.freq, 1_000);
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(FULL).unwrap();
        let display = &config.display;

        assert_eq!(display.bus.miso, None);
        assert_eq!(display.bus.dc, PinConfig::new(8));
        assert_eq!(display.panel.offset_rotation, 2);
        assert!(!display.panel.bgr);
        assert!(display.light.invert);
        assert_eq!(display.light.brightness, 120);
        assert_eq!(display.touch.address, 0x15);
        assert_eq!(display.touch.int, PinConfig::inverted(21));
        assert_eq!(display.touch.offset_rotation, 1);
        assert_eq!(config.ui.loop_delay_ms, 10);
        assert_eq!(config.ui.brightness_step, 50);
        assert_eq!(config.clock.start_unix, 1_709_208_000);
        assert_eq!(config.timeout.level, TimeoutLevel::ThirtySeconds);

        let prefs = config.default_preferences();
        assert_eq!(prefs.brightness, 120);
        assert_eq!(prefs.timeout_level, TimeoutLevel::ThirtySeconds);
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let config = parse_config("[ui]\nsplash_ms = 500\n").unwrap();
        assert_eq!(config.ui.splash_ms, 500);
        assert_eq!(config.display, WatchConfig::new().display);
        assert_eq!(config.ui.loop_delay_ms, 5);
    }

    #[test]
    fn test_unknown_key_ignored() {
        let config = parse_config("[panel]\nmystery = 7\nwidth = 128\n").unwrap();
        assert_eq!(config.display.panel.width, 128);
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert_eq!(
            parse_config("[stepper]\nmicrosteps = 16\n"),
            Err(ParseError::InvalidSection)
        );
        assert_eq!(parse_config("[bus\n"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert_eq!(
            parse_config("[bus]\nspi_mode = 4\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[timeout]\nlevel = 5\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[panel]\ninvert = yes\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[touch]\nsda_pin = \"i2c0\"\n"),
            Err(ParseError::InvalidPin)
        );
    }

    #[test]
    fn test_section_header_with_comment() {
        let config = parse_config("[clock] # wall time\nstart_unix = 0\n").unwrap();
        assert_eq!(config.clock.start_unix, 0);
    }
}
