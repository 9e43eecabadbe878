//! Dial Hardware Abstraction Layer
//!
//! This crate defines the board-facing pieces that are shared between the
//! chip-specific HAL and the application: persistent storage keys, the
//! flash storage trait, bus configuration types for the panel (SPI)
//! and the touch controller (I2C), and backlight PWM timing.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (dial-firmware)            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dial-hal (this crate - traits/config)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  dial-hal-    │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Contents
//!
//! - [`flash::FlashStorage`] - Preferences and config override records
//! - [`spi::SpiConfig`] - Panel bus settings
//! - [`i2c::I2cConfig`] - Touch bus settings
//! - [`pwm::PwmTiming`] - Backlight PWM counter settings

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod i2c;
pub mod pwm;
pub mod spi;

// Re-export key types at crate root for convenience
pub use flash::{FlashError, FlashStorage, StorageKey, CONFIG_TOML_CAPACITY, PREFS_CAPACITY};
pub use i2c::I2cConfig;
pub use pwm::PwmTiming;
pub use spi::{Mode, SpiConfig};
