//! Monotonic time source

/// Millisecond clock
///
/// Must be monotonic and non-decreasing between calls. A 32-bit value is
/// enough; consumers compare timestamps by subtraction.
pub trait Clock {
    /// Current time in milliseconds since an arbitrary epoch
    fn now_ms(&self) -> u32;
}
