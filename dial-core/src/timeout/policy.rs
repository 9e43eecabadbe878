//! Timeout policy and selector levels

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Countdown used at startup and for selector level 0
pub const DEFAULT_TIMEOUT_MS: i32 = 5000;

/// Duration value that disables the countdown
pub const ALWAYS_ON: i32 = -1;

/// Spacing of the 10/20/30 second levels
const LEVEL_STEP_MS: i32 = 10_000;

/// Timeout selector levels as offered in the settings screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum TimeoutLevel {
    /// 5 second timeout (default)
    FiveSeconds = 0,
    /// 10 second timeout
    TenSeconds = 1,
    /// 20 second timeout
    TwentySeconds = 2,
    /// 30 second timeout
    ThirtySeconds = 3,
    /// Never dim
    AlwaysOn = 4,
}

impl TimeoutLevel {
    /// All levels in selector order
    pub const ALL: [TimeoutLevel; 5] = [
        TimeoutLevel::FiveSeconds,
        TimeoutLevel::TenSeconds,
        TimeoutLevel::TwentySeconds,
        TimeoutLevel::ThirtySeconds,
        TimeoutLevel::AlwaysOn,
    ];

    /// Map a selector index to a level
    ///
    /// Returns `None` for anything outside 0-4.
    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Selector index of this level
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Countdown duration in milliseconds (negative for always-on)
    pub fn duration_ms(self) -> i32 {
        match self {
            TimeoutLevel::FiveSeconds => DEFAULT_TIMEOUT_MS,
            TimeoutLevel::AlwaysOn => ALWAYS_ON,
            level => LEVEL_STEP_MS * level.index() as i32,
        }
    }

    /// Whether selecting this level re-arms the countdown
    ///
    /// Always-on only swaps the duration and leaves the active flag alone.
    pub fn restarts_countdown(self) -> bool {
        self != TimeoutLevel::AlwaysOn
    }

    /// Short label for the selector
    pub fn label(self) -> &'static str {
        match self {
            TimeoutLevel::FiveSeconds => "5s",
            TimeoutLevel::TenSeconds => "10s",
            TimeoutLevel::TwentySeconds => "20s",
            TimeoutLevel::ThirtySeconds => "30s",
            TimeoutLevel::AlwaysOn => "Always",
        }
    }

    /// Next level in the selector, wrapping to the first
    pub fn next(self) -> Self {
        Self::ALL[(self.index() as usize + 1) % Self::ALL.len()]
    }
}

impl Default for TimeoutLevel {
    fn default() -> Self {
        TimeoutLevel::FiveSeconds
    }
}

/// Countdown state of the display timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeoutPolicy {
    /// Monotonic time (ms) of the last touch or explicit reset
    pub last_activity_ms: u32,
    /// Inactivity period in ms; negative means never expire
    pub duration_ms: i32,
    /// Whether the countdown is running
    pub active: bool,
}

impl TimeoutPolicy {
    /// Create a running policy with the default duration
    pub const fn new(now_ms: u32) -> Self {
        Self {
            last_activity_ms: now_ms,
            duration_ms: DEFAULT_TIMEOUT_MS,
            active: true,
        }
    }

    /// Check if the countdown can never fire
    pub fn is_always_on(&self) -> bool {
        self.duration_ms < 0
    }

    /// Milliseconds since the last activity
    ///
    /// Computed by subtraction so a wrapped 32-bit counter still yields
    /// the right distance.
    pub fn elapsed_ms(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.last_activity_ms)
    }

    /// Check whether the inactivity period has strictly passed at `now_ms`
    pub fn is_expired_at(&self, now_ms: u32) -> bool {
        match u32::try_from(self.duration_ms) {
            Ok(duration) => self.elapsed_ms(now_ms) > duration,
            Err(_) => false,
        }
    }

    /// Selector level matching the current duration, if any
    pub fn level(&self) -> Option<TimeoutLevel> {
        TimeoutLevel::ALL
            .iter()
            .copied()
            .find(|level| level.duration_ms() == self.duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_durations() {
        assert_eq!(TimeoutLevel::FiveSeconds.duration_ms(), 5000);
        assert_eq!(TimeoutLevel::TenSeconds.duration_ms(), 10_000);
        assert_eq!(TimeoutLevel::TwentySeconds.duration_ms(), 20_000);
        assert_eq!(TimeoutLevel::ThirtySeconds.duration_ms(), 30_000);
        assert!(TimeoutLevel::AlwaysOn.duration_ms() < 0);
    }

    #[test]
    fn test_from_index_bounds() {
        assert_eq!(TimeoutLevel::from_index(0), Some(TimeoutLevel::FiveSeconds));
        assert_eq!(TimeoutLevel::from_index(4), Some(TimeoutLevel::AlwaysOn));
        assert_eq!(TimeoutLevel::from_index(5), None);
        assert_eq!(TimeoutLevel::from_index(-1), None);
        assert_eq!(TimeoutLevel::from_index(i32::MIN), None);
    }

    #[test]
    fn test_next_wraps() {
        assert_eq!(TimeoutLevel::ThirtySeconds.next(), TimeoutLevel::AlwaysOn);
        assert_eq!(TimeoutLevel::AlwaysOn.next(), TimeoutLevel::FiveSeconds);
    }

    #[test]
    fn test_expiry_is_strict() {
        let policy = TimeoutPolicy::new(1000);
        assert!(!policy.is_expired_at(6000)); // exactly 5000ms elapsed
        assert!(policy.is_expired_at(6001));
    }

    #[test]
    fn test_expiry_across_wrap() {
        let policy = TimeoutPolicy::new(u32::MAX - 100);
        assert_eq!(policy.elapsed_ms(50), 151);
        assert!(!policy.is_expired_at(50));
        assert!(policy.is_expired_at(5000));
    }

    #[test]
    fn test_policy_level_lookup() {
        let mut policy = TimeoutPolicy::new(0);
        assert_eq!(policy.level(), Some(TimeoutLevel::FiveSeconds));
        policy.duration_ms = 20_000;
        assert_eq!(policy.level(), Some(TimeoutLevel::TwentySeconds));
        policy.duration_ms = 1234;
        assert_eq!(policy.level(), None);
    }
}
