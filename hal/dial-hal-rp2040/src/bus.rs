//! Bus configuration conversions
//!
//! Turns the shared `dial-hal` bus settings into embassy-rp peripheral
//! configurations.

use dial_hal::spi::{Phase, Polarity};
use dial_hal::{I2cConfig, SpiConfig};
use embassy_rp::{i2c, spi};

/// SPI peripheral configuration for panel writes
pub fn spi_config(config: &SpiConfig) -> spi::Config {
    let mut spi_config = spi::Config::default();
    spi_config.frequency = config.frequency;
    spi_config.polarity = match config.polarity {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    spi_config.phase = match config.phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    spi_config
}

/// I2C peripheral configuration for the touch controller
pub fn i2c_config(config: &I2cConfig) -> i2c::Config {
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = config.frequency;
    i2c_config
}
