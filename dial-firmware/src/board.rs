//! Board wiring
//!
//! embassy-rp types every pin, so the wiring is fixed when the firmware
//! is built. These are the GPIOs of the round touch board; the firmware
//! warns when the loaded configuration names different ones.

use defmt::*;

use dial_core::config::{DisplayHwConfig, PinConfig};

pub const SCLK: u8 = 10;
pub const MOSI: u8 = 11;
pub const MISO: u8 = 12;
pub const DC: u8 = 8;
pub const PANEL_CS: u8 = 9;
pub const PANEL_RST: u8 = 13;
pub const BACKLIGHT: u8 = 25;
pub const TOUCH_SDA: u8 = 6;
pub const TOUCH_SCL: u8 = 7;
pub const TOUCH_INT: u8 = 21;
pub const TOUCH_RST: u8 = 22;

/// Touch bus instance (I2C1)
pub const I2C_PORT: u8 = 1;

/// Compare the configured pins with the wiring
///
/// Returns the number of mismatches, each logged as a warning.
pub fn check_wiring(config: &DisplayHwConfig) -> usize {
    let pins: [(&str, u8, Option<PinConfig>); 11] = [
        ("sclk", SCLK, Some(config.bus.sclk)),
        ("mosi", MOSI, Some(config.bus.mosi)),
        ("miso", MISO, config.bus.miso),
        ("dc", DC, Some(config.bus.dc)),
        ("panel cs", PANEL_CS, Some(config.panel.cs)),
        ("panel rst", PANEL_RST, Some(config.panel.rst)),
        ("backlight", BACKLIGHT, Some(config.light.pin)),
        ("touch sda", TOUCH_SDA, Some(config.touch.sda)),
        ("touch scl", TOUCH_SCL, Some(config.touch.scl)),
        ("touch int", TOUCH_INT, Some(config.touch.int)),
        ("touch rst", TOUCH_RST, Some(config.touch.rst)),
    ];

    let mut mismatches = 0;
    for (name, wired, configured) in pins {
        // An absent MISO line is fine; the panel is write-only then
        let Some(configured) = configured else {
            continue;
        };
        if configured.pin != wired {
            warn!(
                "Config puts {} on gpio{}, board wires gpio{}",
                name, configured.pin, wired
            );
            mismatches += 1;
        }
    }

    if config.touch.i2c_port != I2C_PORT {
        warn!(
            "Config selects I2C{}, touch is on I2C{}",
            config.touch.i2c_port, I2C_PORT
        );
        mismatches += 1;
    }

    mismatches
}
