//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod backlight;
pub mod clock;
pub mod navigator;
pub mod touch;

pub use backlight::Backlight;
pub use clock::Clock;
pub use navigator::ViewNavigator;
pub use touch::{Gesture, TouchInput, TouchPoint};
