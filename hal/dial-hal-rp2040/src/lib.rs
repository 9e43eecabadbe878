//! RP2040-specific HAL for the watch firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `dial-hal` traits, plus conversions of the shared bus settings:
//!
//! - Flash storage driver (implements `dial_hal::FlashStorage`)
//! - SPI and I2C peripheral configuration
//! - Backlight PWM slice configuration

#![no_std]

pub mod bus;
pub mod flash;
pub mod pwm;

// Re-export shared traits from dial-hal for convenience
pub use dial_hal::{FlashStorage as FlashStorageTrait, StorageKey};
