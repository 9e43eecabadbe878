//! Screen navigation

/// Trait for switching the displayed screen
pub trait ViewNavigator {
    /// Replace the current screen with the idle/home screen
    fn load_idle_view(&mut self);
}
