//! Touch gesture edge detection
//!
//! Touch controllers keep reporting the same gesture while the finger
//! stays down. The tracker turns that into one event per gesture.

use crate::traits::{Gesture, TouchPoint};

/// Reports each gesture once per touch
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    last: Gesture,
}

impl GestureTracker {
    /// Create a tracker with no gesture seen
    pub const fn new() -> Self {
        Self {
            last: Gesture::None,
        }
    }

    /// Feed one poll result
    ///
    /// Returns the gesture if it was not reported before during this touch.
    pub fn update(&mut self, sample: Option<TouchPoint>) -> Option<Gesture> {
        let Some(point) = sample else {
            self.last = Gesture::None;
            return None;
        };

        if point.gesture == Gesture::None || point.gesture == self.last {
            return None;
        }

        self.last = point.gesture;
        Some(point.gesture)
    }
}
