//! Board-agnostic core logic for the watch firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Display timeout controller (inactivity dimming)
//! - Hardware abstraction traits (clock, backlight, touch, navigation)
//! - Event sink and the watch context owned by the control loop
//! - View carousel and screen composition
//! - Clock face formatting
//! - Sample data provider
//! - Configuration types and parser
//! - Persisted preferences

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod context;
pub mod data;
pub mod events;
pub mod face;
pub mod prefs;
pub mod screen;
pub mod settings;
pub mod timeout;
pub mod traits;
pub mod view;
