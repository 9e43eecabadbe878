//! View navigation
//!
//! Tracks which screen is shown and moves between screens in response to
//! gestures. Swiping left or right walks the carousel; swiping up on the
//! weather view opens the forecast; swiping down leaves a detail view.
//! On list views vertical swipes scroll instead.

use crate::traits::{Gesture, ViewNavigator};

/// Text rows that fit under the title
pub const VISIBLE_ROWS: usize = 8;

/// Screens the watch can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum View {
    /// Watch face (home)
    #[default]
    Clock,
    Weather,
    /// Daily forecast, reached from `Weather`
    Forecast,
    Notifications,
    /// One notification opened from the list
    Message(u8),
    Contacts,
    Files,
    Settings,
    About,
}

/// Order of the horizontal carousel
pub const CAROUSEL: [View; 7] = [
    View::Clock,
    View::Weather,
    View::Notifications,
    View::Contacts,
    View::Files,
    View::Settings,
    View::About,
];

impl View {
    /// Carousel view this view belongs to
    pub fn anchor(self) -> View {
        match self {
            View::Forecast => View::Weather,
            View::Message(_) => View::Notifications,
            other => other,
        }
    }

    /// Position in the carousel
    pub fn carousel_index(self) -> usize {
        let anchor = self.anchor();
        CAROUSEL.iter().position(|v| *v == anchor).unwrap_or(0)
    }

    /// Next view to the right
    pub fn next(self) -> View {
        CAROUSEL[(self.carousel_index() + 1) % CAROUSEL.len()]
    }

    /// Next view to the left
    pub fn previous(self) -> View {
        let len = CAROUSEL.len();
        CAROUSEL[(self.carousel_index() + len - 1) % len]
    }

    /// Title shown at the top of the screen
    pub fn title(self) -> &'static str {
        match self {
            View::Clock => "",
            View::Weather => "Weather",
            View::Forecast => "Forecast",
            View::Notifications => "Notifications",
            View::Message(_) => "Message",
            View::Contacts => "Contacts",
            View::Files => "Files",
            View::Settings => "Settings",
            View::About => "About",
        }
    }

    /// Whether vertical swipes scroll this view
    pub fn scrolls(self) -> bool {
        matches!(
            self,
            View::Notifications | View::Message(_) | View::Contacts | View::Files
        )
    }
}

/// Current view plus redraw bookkeeping
#[derive(Debug, Clone)]
pub struct ViewState {
    current: View,
    home: View,
    /// First visible row on list views and open messages
    scroll: usize,
    dirty: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(View::Clock)
    }
}

impl ViewState {
    /// Start on the home view with a pending redraw
    pub fn new(home: View) -> Self {
        Self {
            current: home,
            home,
            scroll: 0,
            dirty: true,
        }
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn home(&self) -> View {
        self.home
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Switch to `view`, resetting the scroll position
    pub fn show(&mut self, view: View) {
        if view != self.current {
            self.current = view;
            self.scroll = 0;
            self.dirty = true;
        }
    }

    /// Apply a swipe
    ///
    /// # Arguments
    /// * `gesture` - Newly detected gesture
    /// * `rows` - Entry count of the current view when it is a list, or
    ///   line count of an open message
    ///
    /// Returns whether the gesture changed anything.
    pub fn on_gesture(&mut self, gesture: Gesture, rows: usize) -> bool {
        let before = (self.current, self.scroll);
        match (gesture, self.current) {
            (Gesture::SwipeLeft, view) => self.show(view.next()),
            (Gesture::SwipeRight, view) => self.show(view.previous()),
            (Gesture::SwipeUp, View::Weather) => self.show(View::Forecast),
            (Gesture::SwipeDown, View::Forecast) => self.show(View::Weather),
            (Gesture::SwipeDown, View::Message(_)) if self.scroll == 0 => {
                self.show(View::Notifications)
            }
            (Gesture::SwipeUp, view) if view.scrolls() => {
                let max = rows.saturating_sub(VISIBLE_ROWS);
                self.scroll = (self.scroll + 1).min(max);
            }
            (Gesture::SwipeDown, view) if view.scrolls() => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            _ => {}
        }
        let changed = before != (self.current, self.scroll);
        if changed {
            self.dirty = true;
        }
        changed
    }

    /// Open the notification shown on `row`
    ///
    /// The index wraps around `count` so every row maps to a message.
    pub fn open_message(&mut self, row: usize, count: usize) {
        if count == 0 {
            return;
        }
        let index = (self.scroll + row) % count;
        self.show(View::Message(index as u8));
    }

    /// Request a redraw
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Check and clear the redraw flag
    pub fn take_dirty(&mut self) -> bool {
        core::mem::take(&mut self.dirty)
    }
}

impl ViewNavigator for ViewState {
    fn load_idle_view(&mut self) {
        let home = self.home;
        self.show(home);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carousel_wraps() {
        let mut state = ViewState::default();
        for expected in CAROUSEL.iter().skip(1) {
            assert!(state.on_gesture(Gesture::SwipeLeft, 0));
            assert_eq!(state.current(), *expected);
        }
        state.on_gesture(Gesture::SwipeLeft, 0);
        assert_eq!(state.current(), View::Clock);

        state.on_gesture(Gesture::SwipeRight, 0);
        assert_eq!(state.current(), View::About);
    }

    #[test]
    fn test_forecast_detail() {
        let mut state = ViewState::new(View::Clock);
        state.show(View::Weather);
        state.on_gesture(Gesture::SwipeUp, 0);
        assert_eq!(state.current(), View::Forecast);

        // Horizontal swipes continue from the parent view
        state.on_gesture(Gesture::SwipeLeft, 0);
        assert_eq!(state.current(), View::Notifications);

        state.show(View::Forecast);
        state.on_gesture(Gesture::SwipeDown, 0);
        assert_eq!(state.current(), View::Weather);
    }

    #[test]
    fn test_list_scroll_clamped() {
        let mut state = ViewState::new(View::Clock);
        state.show(View::Notifications);
        for _ in 0..5 {
            state.on_gesture(Gesture::SwipeUp, 10);
        }
        assert_eq!(state.scroll(), 2);
        assert!(!state.on_gesture(Gesture::SwipeUp, 10));

        state.on_gesture(Gesture::SwipeDown, 10);
        assert_eq!(state.scroll(), 1);

        // Short lists never scroll
        state.show(View::Files);
        assert!(!state.on_gesture(Gesture::SwipeUp, 6));
    }

    #[test]
    fn test_open_message_wraps() {
        let mut state = ViewState::new(View::Clock);
        state.show(View::Notifications);
        state.on_gesture(Gesture::SwipeUp, 10);
        state.open_message(3, 10);
        assert_eq!(state.current(), View::Message(4));

        state.show(View::Notifications);
        state.open_message(13, 10);
        assert_eq!(state.current(), View::Message(3));

        state.on_gesture(Gesture::SwipeDown, 0);
        assert_eq!(state.current(), View::Notifications);
    }

    #[test]
    fn test_message_scrolls_before_closing() {
        let mut state = ViewState::new(View::Clock);
        state.show(View::Message(6));
        for _ in 0..20 {
            state.on_gesture(Gesture::SwipeUp, 19);
        }
        assert_eq!(state.scroll(), 11);

        state.on_gesture(Gesture::SwipeDown, 19);
        assert_eq!(state.current(), View::Message(6));
        assert_eq!(state.scroll(), 10);

        for _ in 0..10 {
            state.on_gesture(Gesture::SwipeDown, 19);
        }
        assert_eq!(state.current(), View::Message(6));
        assert_eq!(state.scroll(), 0);

        state.on_gesture(Gesture::SwipeDown, 19);
        assert_eq!(state.current(), View::Notifications);
    }

    #[test]
    fn test_load_idle_view() {
        let mut state = ViewState::new(View::Clock);
        state.show(View::Settings);
        state.take_dirty();

        state.load_idle_view();
        assert_eq!(state.current(), View::Clock);
        assert!(state.take_dirty());
        assert!(!state.take_dirty());
    }

    #[test]
    fn test_clicks_do_not_navigate() {
        let mut state = ViewState::new(View::Clock);
        assert!(!state.on_gesture(Gesture::Click, 0));
        assert!(!state.on_gesture(Gesture::LongPress, 0));
        assert_eq!(state.current(), View::Clock);
    }
}
