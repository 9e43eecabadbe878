//! Hardware configuration types
//!
//! Pin map and electrical settings of the round display module. Defaults
//! describe the RP2040 round touch board: GC9A01 on SPI1, CST816S on
//! I2C1 and a PWM backlight on GPIO25.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: false,
        }
    }
}

/// Panel SPI bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusConfig {
    /// SPI mode (0-3)
    pub spi_mode: u8,
    /// Write clock in Hz
    pub freq_write: u32,
    /// Read clock in Hz
    pub freq_read: u32,
    pub sclk: PinConfig,
    pub mosi: PinConfig,
    /// MISO is optional on write-only panels
    pub miso: Option<PinConfig>,
    /// Data/command select
    pub dc: PinConfig,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            spi_mode: 0,
            freq_write: 40_000_000,
            freq_read: 16_000_000,
            sclk: PinConfig::new(10),
            mosi: PinConfig::new(11),
            miso: Some(PinConfig::new(12)),
            dc: PinConfig::new(8),
        }
    }
}

/// Display panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// Chip select
    pub cs: PinConfig,
    /// Hardware reset
    pub rst: PinConfig,
    /// Visible width in pixels
    pub width: u16,
    /// Visible height in pixels
    pub height: u16,
    pub offset_x: u16,
    pub offset_y: u16,
    /// Mounting rotation in quarter turns, added to the user rotation
    pub offset_rotation: u8,
    /// Panel needs colour inversion
    pub invert: bool,
    /// Panel expects BGR subpixel order
    pub bgr: bool,
    /// Panel supports pixel readback
    pub readable: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            cs: PinConfig::new(9),
            rst: PinConfig::new(13),
            width: 240,
            height: 240,
            offset_x: 0,
            offset_y: 0,
            offset_rotation: 0,
            invert: true,
            bgr: true,
            readable: false,
        }
    }
}

/// Backlight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LightConfig {
    pub pin: PinConfig,
    /// Full duty means dark
    pub invert: bool,
    /// PWM frequency in Hz
    pub freq: u32,
    /// Level used when no preference is stored
    pub brightness: u8,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            pin: PinConfig::new(25),
            invert: false,
            freq: 44_100,
            brightness: 200,
        }
    }
}

/// Touch controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TouchConfig {
    /// I2C peripheral (0 or 1)
    pub i2c_port: u8,
    /// 7-bit device address
    pub address: u8,
    /// Bus clock in Hz
    pub freq: u32,
    pub sda: PinConfig,
    pub scl: PinConfig,
    /// Interrupt line
    pub int: PinConfig,
    /// Reset line
    pub rst: PinConfig,
    /// Raw coordinate range reported by the controller
    pub x_min: u16,
    pub x_max: u16,
    pub y_min: u16,
    pub y_max: u16,
    /// Touch panel rotation relative to the display, in quarter turns
    pub offset_rotation: u8,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            i2c_port: 1,
            address: 0x15,
            freq: 100_000,
            sda: PinConfig::new(6),
            scl: PinConfig::new(7),
            int: PinConfig::new(21),
            rst: PinConfig::new(22),
            x_min: 0,
            x_max: 240,
            y_min: 0,
            y_max: 240,
            offset_rotation: 0,
        }
    }
}

/// Complete display module description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayHwConfig {
    pub bus: BusConfig,
    pub panel: PanelConfig,
    pub light: LightConfig,
    pub touch: TouchConfig,
}
