//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in dial-core for the watch peripherals:
//!
//! - Touch controller (CST816S over I2C)
//! - Backlight (PWM duty cycle)

#![no_std]
#![deny(unsafe_code)]

pub mod backlight;
pub mod touch;
