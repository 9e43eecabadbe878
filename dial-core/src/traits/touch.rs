//! Touch input

use core::future::Future;

/// Gesture reported by the touch controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    /// Finger down, no gesture recognised yet
    #[default]
    None,
    /// Swipe towards the top edge
    SwipeUp,
    /// Swipe towards the bottom edge
    SwipeDown,
    /// Swipe towards the left edge
    SwipeLeft,
    /// Swipe towards the right edge
    SwipeRight,
    /// Single tap
    Click,
    /// Double tap
    DoubleClick,
    /// Press and hold
    LongPress,
}

/// A pressed touch point in panel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoint {
    /// Horizontal position (0 = left edge)
    pub x: u16,
    /// Vertical position (0 = top edge)
    pub y: u16,
    /// Gesture latched by the controller
    pub gesture: Gesture,
}

impl TouchPoint {
    /// Create a touch point with no gesture
    pub const fn new(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            gesture: Gesture::None,
        }
    }

    /// Attach a gesture
    pub const fn with_gesture(mut self, gesture: Gesture) -> Self {
        self.gesture = gesture;
        self
    }
}

/// Trait for touch controllers
pub trait TouchInput {
    /// Error type for bus failures
    type Error;

    /// Poll the controller
    ///
    /// Returns `Ok(Some(point))` while a finger is down and `Ok(None)`
    /// when released.
    fn read_touch(&mut self) -> impl Future<Output = Result<Option<TouchPoint>, Self::Error>>;
}
