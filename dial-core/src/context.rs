//! Watch context
//!
//! Owns everything the control loop mutates: the timeout controller, the
//! view state, gesture tracking and the user preferences. The firmware
//! UI task calls [`WatchContext::step`] once per iteration.

use crate::data::{DataProvider, SampleData};
use crate::events::{ActivitySink, EventSink, GestureTracker, SettingChange};
use crate::face::DateTime;
use crate::prefs::{Preferences, ROTATION_COUNT};
use crate::screen::{line_at, message_rows, Screen};
use crate::settings::{self, SettingsEdit};
use crate::timeout::{Action, DisplayTimeout, TimeoutLevel};
use crate::traits::{Backlight, Gesture, TouchInput, TouchPoint, ViewNavigator};
use crate::view::{View, ViewState};

/// Default brightness change per tap on the settings screen
pub const DEFAULT_BRIGHTNESS_STEP: u8 = 25;

/// Default panel width in pixels
pub const DEFAULT_WIDTH: u16 = 240;

/// Tick the timeout controller and carry out its decision
///
/// # Arguments
/// * `timeout` - Controller to tick
/// * `now_ms` - Current monotonic time
/// * `backlight` - Receives the brightness for the returned action
/// * `navigator` - Returns to the idle view on expiry
pub fn service_timeout<B: Backlight, N: ViewNavigator>(
    timeout: &mut DisplayTimeout,
    now_ms: u32,
    backlight: &mut B,
    navigator: &mut N,
) -> Action {
    let action = timeout.tick(now_ms);
    match action {
        Action::KeepAlive(level) => backlight.set_brightness(level),
        Action::ExpireAndDim => {
            backlight.set_brightness(0);
            navigator.load_idle_view();
        }
        Action::None => {}
    }
    action
}

/// Outcome of one control-loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    /// What the timeout controller decided
    pub action: Action,
    /// The screen content changed
    pub redraw: bool,
    /// Last selector change made during this iteration
    pub change: Option<SettingChange>,
    /// Preferences changed and should be saved
    pub prefs_changed: bool,
}

impl Default for Step {
    fn default() -> Self {
        Self {
            action: Action::None,
            redraw: false,
            change: None,
            prefs_changed: false,
        }
    }
}

/// State owned by the UI task
pub struct WatchContext<D = SampleData> {
    timeout: DisplayTimeout,
    views: ViewState,
    gestures: GestureTracker,
    prefs: Preferences,
    data: D,
    brightness_step: u8,
    width: u16,
    /// Ignore gestures until the finger that woke the screen lifts
    waking: bool,
    change: Option<SettingChange>,
    prefs_changed: bool,
    brightness_changed: bool,
}

impl<D: DataProvider + Default> WatchContext<D> {
    /// Create a context on the home view
    ///
    /// # Arguments
    /// * `now_ms` - Current monotonic time, taken as the last activity
    /// * `prefs` - Stored preferences to start from
    pub fn new(now_ms: u32, prefs: &Preferences) -> Self {
        Self::with_data(now_ms, prefs, D::default())
    }
}

impl<D: DataProvider> WatchContext<D> {
    /// Create a context with an explicit data source
    pub fn with_data(now_ms: u32, prefs: &Preferences, data: D) -> Self {
        let mut timeout = DisplayTimeout::new(now_ms, prefs.brightness);
        timeout.configure(i32::from(prefs.timeout_level.index()));

        Self {
            timeout,
            views: ViewState::new(View::Clock),
            gestures: GestureTracker::new(),
            prefs: Preferences {
                rotation: prefs.rotation(),
                ..*prefs
            },
            data,
            brightness_step: DEFAULT_BRIGHTNESS_STEP,
            width: DEFAULT_WIDTH,
            waking: false,
            change: None,
            prefs_changed: false,
            brightness_changed: false,
        }
    }

    /// Set the brightness change per settings tap
    pub fn with_brightness_step(mut self, step: u8) -> Self {
        self.brightness_step = step;
        self
    }

    /// Set the panel width used for left/right hit tests
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Run one control-loop iteration
    ///
    /// Reads the touch controller, dispatches new gestures and services
    /// the display timeout. A touch that lands while the display is
    /// dimmed only wakes it.
    pub async fn step<T: TouchInput, B: Backlight>(
        &mut self,
        now_ms: u32,
        touch: &mut T,
        backlight: &mut B,
    ) -> Result<Step, T::Error> {
        let sample = touch.read_touch().await?;
        let gesture = self.gestures.update(sample);

        match sample {
            Some(point) => {
                if !self.timeout.is_active() {
                    self.waking = true;
                    self.views.mark_dirty();
                    backlight.set_brightness(self.timeout.brightness());
                }
                self.on_activity(now_ms);

                if let Some(gesture) = gesture.filter(|_| !self.waking) {
                    self.dispatch(gesture, point);
                }
            }
            None => self.waking = false,
        }

        if core::mem::take(&mut self.brightness_changed) {
            backlight.set_brightness(self.timeout.brightness());
        }

        let action = service_timeout(&mut self.timeout, now_ms, backlight, &mut self.views);

        Ok(Step {
            action,
            redraw: self.views.take_dirty(),
            change: self.change.take(),
            prefs_changed: core::mem::take(&mut self.prefs_changed),
        })
    }

    fn dispatch(&mut self, gesture: Gesture, point: TouchPoint) {
        let view = self.views.current();
        match (gesture, view) {
            (Gesture::Click, View::Settings) => {
                match settings::tap(&self.prefs, point, self.width, self.brightness_step) {
                    Some(SettingsEdit::Brightness(level)) => self.on_brightness_change(level),
                    Some(SettingsEdit::Setting(change)) => self.on_setting_change(change),
                    None => {}
                }
            }
            (Gesture::Click, View::Notifications) => {
                if let Some(row) = line_at(point.y) {
                    let count = self.data.notifications().len();
                    self.views.open_message(row, count);
                }
            }
            (Gesture::Click, View::Message(_)) => self.views.show(View::Notifications),
            _ => {
                let rows = self.rows(view);
                self.views.on_gesture(gesture, rows);
            }
        }
    }

    /// Entry count of a list view
    fn rows(&self, view: View) -> usize {
        match view {
            View::Notifications => self.data.notifications().len(),
            View::Message(index) => self
                .data
                .notification(usize::from(index))
                .map_or(0, |note| message_rows(note.message)),
            View::Contacts => self.data.contacts().len(),
            View::Files => self.data.files().len(),
            _ => 0,
        }
    }

    /// Compose the current view
    pub fn compose(&self, screen: &mut Screen, now: &DateTime) {
        screen.compose(
            self.views.current(),
            self.views.scroll(),
            &self.prefs,
            &self.data,
            now,
        );
    }

    /// Snapshot of the current settings
    pub fn preferences(&self) -> Preferences {
        self.prefs
    }

    pub fn view(&self) -> View {
        self.views.current()
    }

    pub fn views_mut(&mut self) -> &mut ViewState {
        &mut self.views
    }

    pub fn timeout(&self) -> &DisplayTimeout {
        &self.timeout
    }

    pub fn data(&self) -> &D {
        &self.data
    }
}

impl<D: DataProvider> ActivitySink for WatchContext<D> {
    fn record_activity(&mut self, now_ms: u32) {
        self.timeout.record_activity(now_ms);
    }
}

impl<D: DataProvider> EventSink for WatchContext<D> {
    fn on_brightness_change(&mut self, level: u8) {
        self.timeout.set_brightness(level);
        self.prefs.brightness = level;
        self.brightness_changed = true;
        self.prefs_changed = true;
        self.views.mark_dirty();
    }

    fn on_setting_change(&mut self, change: SettingChange) {
        match change {
            SettingChange::Timeout(index) => {
                if !self.timeout.configure(index) {
                    return;
                }
                if let Some(level) = TimeoutLevel::from_index(index) {
                    self.prefs.timeout_level = level;
                }
            }
            SettingChange::Rotation(rotation) => {
                self.prefs.rotation = rotation % ROTATION_COUNT;
            }
        }
        self.change = Some(change);
        self.prefs_changed = true;
        self.views.mark_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::{LINE_HEIGHT, TITLE_HEIGHT};
    use embassy_futures::block_on;

    /// Replays a fixed sequence of samples, then reports no touch
    struct ScriptedTouch<'a> {
        samples: &'a [Option<TouchPoint>],
        next: usize,
    }

    impl<'a> ScriptedTouch<'a> {
        fn new(samples: &'a [Option<TouchPoint>]) -> Self {
            Self { samples, next: 0 }
        }
    }

    impl TouchInput for ScriptedTouch<'_> {
        type Error = ();

        async fn read_touch(&mut self) -> Result<Option<TouchPoint>, ()> {
            let sample = self.samples.get(self.next).copied().flatten();
            self.next += 1;
            Ok(sample)
        }
    }

    struct FailingTouch;

    impl TouchInput for FailingTouch {
        type Error = u8;

        async fn read_touch(&mut self) -> Result<Option<TouchPoint>, u8> {
            Err(7)
        }
    }

    #[derive(Default)]
    struct RecordingBacklight {
        levels: [u8; 16],
        count: usize,
    }

    impl RecordingBacklight {
        fn last(&self) -> Option<u8> {
            self.count.checked_sub(1).map(|i| self.levels[i % 16])
        }
    }

    impl Backlight for RecordingBacklight {
        fn set_brightness(&mut self, level: u8) {
            self.levels[self.count % 16] = level;
            self.count += 1;
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        loads: usize,
    }

    impl ViewNavigator for RecordingNavigator {
        fn load_idle_view(&mut self) {
            self.loads += 1;
        }
    }

    fn swipe(gesture: Gesture) -> Option<TouchPoint> {
        Some(TouchPoint::new(120, 120).with_gesture(gesture))
    }

    fn click_line(x: u16, line: u16) -> Option<TouchPoint> {
        let y = TITLE_HEIGHT + line * LINE_HEIGHT + 2;
        Some(TouchPoint::new(x, y).with_gesture(Gesture::Click))
    }

    fn context() -> WatchContext {
        WatchContext::new(0, &Preferences::new())
    }

    #[test]
    fn test_service_timeout_keep_alive() {
        let mut timeout = DisplayTimeout::new(0, 180);
        let mut backlight = RecordingBacklight::default();
        let mut nav = RecordingNavigator::default();

        let action = service_timeout(&mut timeout, 100, &mut backlight, &mut nav);
        assert_eq!(action, Action::KeepAlive(180));
        assert_eq!(backlight.last(), Some(180));
        assert_eq!(nav.loads, 0);
    }

    #[test]
    fn test_service_timeout_expiry() {
        let mut timeout = DisplayTimeout::new(0, 180);
        let mut backlight = RecordingBacklight::default();
        let mut nav = RecordingNavigator::default();

        let action = service_timeout(&mut timeout, 5001, &mut backlight, &mut nav);
        assert_eq!(action, Action::ExpireAndDim);
        assert_eq!(backlight.last(), Some(0));
        assert_eq!(nav.loads, 1);

        // Nothing happens while dimmed
        let action = service_timeout(&mut timeout, 9000, &mut backlight, &mut nav);
        assert_eq!(action, Action::None);
        assert_eq!(backlight.count, 1);
        assert_eq!(nav.loads, 1);
    }

    #[test]
    fn test_service_timeout_always_on() {
        let mut timeout = DisplayTimeout::new(0, 180);
        timeout.configure(4);
        let mut backlight = RecordingBacklight::default();
        let mut nav = RecordingNavigator::default();

        for now in [10, 10_000, 1_000_000] {
            assert_eq!(
                service_timeout(&mut timeout, now, &mut backlight, &mut nav),
                Action::None
            );
        }
        assert_eq!(backlight.count, 0);
    }

    #[test]
    fn test_new_applies_preferences() {
        let prefs = Preferences {
            timeout_level: TimeoutLevel::TwentySeconds,
            brightness: 90,
            rotation: 5,
            ..Preferences::new()
        };
        let ctx: WatchContext = WatchContext::new(500, &prefs);
        assert_eq!(ctx.timeout().duration_ms(), 20_000);
        assert_eq!(ctx.timeout().brightness(), 90);
        assert!(ctx.timeout().is_active());
        assert_eq!(ctx.preferences().rotation, 1);
        assert_eq!(ctx.view(), View::Clock);
    }

    #[test]
    fn test_swipes_navigate() {
        block_on(async {
            let mut ctx = context();
            let samples = [swipe(Gesture::SwipeLeft), swipe(Gesture::SwipeLeft), None];
            let mut touch = ScriptedTouch::new(&samples);
            let mut backlight = RecordingBacklight::default();

            let step = ctx.step(10, &mut touch, &mut backlight).await.unwrap();
            assert_eq!(ctx.view(), View::Weather);
            assert!(step.redraw);
            assert_eq!(step.action, Action::KeepAlive(200));

            // Same gesture while the finger stays down is not repeated
            let step = ctx.step(20, &mut touch, &mut backlight).await.unwrap();
            assert_eq!(ctx.view(), View::Weather);
            assert!(!step.redraw);
        });
    }

    #[test]
    fn test_expiry_returns_home() {
        block_on(async {
            let mut ctx = context();
            let samples = [swipe(Gesture::SwipeLeft)];
            let mut touch = ScriptedTouch::new(&samples);
            let mut backlight = RecordingBacklight::default();

            ctx.step(100, &mut touch, &mut backlight).await.unwrap();
            assert_eq!(ctx.view(), View::Weather);

            let step = ctx.step(5101, &mut touch, &mut backlight).await.unwrap();
            assert_eq!(step.action, Action::ExpireAndDim);
            assert!(step.redraw);
            assert_eq!(ctx.view(), View::Clock);
            assert_eq!(backlight.last(), Some(0));
        });
    }

    #[test]
    fn test_touch_while_dimmed_only_wakes() {
        block_on(async {
            let mut ctx = context();
            let samples = [
                None,
                swipe(Gesture::SwipeLeft),
                swipe(Gesture::SwipeRight),
                None,
                swipe(Gesture::SwipeLeft),
            ];
            let mut touch = ScriptedTouch::new(&samples);
            let mut backlight = RecordingBacklight::default();

            let step = ctx.step(6000, &mut touch, &mut backlight).await.unwrap();
            assert_eq!(step.action, Action::ExpireAndDim);

            let step = ctx.step(7000, &mut touch, &mut backlight).await.unwrap();
            assert_eq!(ctx.view(), View::Clock);
            assert_eq!(step.action, Action::KeepAlive(200));
            assert_eq!(backlight.last(), Some(200));

            // Still the waking touch
            ctx.step(7010, &mut touch, &mut backlight).await.unwrap();
            assert_eq!(ctx.view(), View::Clock);

            ctx.step(7020, &mut touch, &mut backlight).await.unwrap();
            ctx.step(7030, &mut touch, &mut backlight).await.unwrap();
            assert_eq!(ctx.view(), View::Weather);
        });
    }

    #[test]
    fn test_settings_taps() {
        block_on(async {
            let mut ctx = context();
            ctx.views_mut().show(View::Settings);
            let samples = [
                click_line(120, 0),
                None,
                click_line(200, 1),
                None,
                click_line(120, 2),
            ];
            let mut touch = ScriptedTouch::new(&samples);
            let mut backlight = RecordingBacklight::default();

            let step = ctx.step(10, &mut touch, &mut backlight).await.unwrap();
            assert_eq!(step.change, Some(SettingChange::Timeout(1)));
            assert!(step.prefs_changed);
            assert_eq!(ctx.timeout().duration_ms(), 10_000);
            assert_eq!(ctx.preferences().timeout_level, TimeoutLevel::TenSeconds);

            ctx.step(20, &mut touch, &mut backlight).await.unwrap();
            let step = ctx.step(30, &mut touch, &mut backlight).await.unwrap();
            assert_eq!(step.change, None);
            assert!(step.prefs_changed);
            assert_eq!(ctx.preferences().brightness, 225);
            assert_eq!(step.action, Action::KeepAlive(225));

            ctx.step(40, &mut touch, &mut backlight).await.unwrap();
            let step = ctx.step(50, &mut touch, &mut backlight).await.unwrap();
            assert_eq!(step.change, Some(SettingChange::Rotation(1)));
            assert_eq!(ctx.preferences().rotation, 1);
        });
    }

    #[test]
    fn test_brightness_applied_when_always_on() {
        block_on(async {
            let prefs = Preferences {
                timeout_level: TimeoutLevel::AlwaysOn,
                ..Preferences::new()
            };
            let mut ctx: WatchContext = WatchContext::new(0, &prefs);
            ctx.views_mut().show(View::Settings);
            let samples = [click_line(10, 1)];
            let mut touch = ScriptedTouch::new(&samples);
            let mut backlight = RecordingBacklight::default();

            let step = ctx.step(10, &mut touch, &mut backlight).await.unwrap();
            assert_eq!(step.action, Action::None);
            assert_eq!(backlight.last(), Some(175));
        });
    }

    #[test]
    fn test_open_and_close_message() {
        block_on(async {
            let mut ctx = context();
            ctx.views_mut().show(View::Notifications);
            let samples = [click_line(120, 3), None, click_line(120, 0)];
            let mut touch = ScriptedTouch::new(&samples);
            let mut backlight = RecordingBacklight::default();

            ctx.step(10, &mut touch, &mut backlight).await.unwrap();
            assert_eq!(ctx.view(), View::Message(3));

            ctx.step(20, &mut touch, &mut backlight).await.unwrap();
            ctx.step(30, &mut touch, &mut backlight).await.unwrap();
            assert_eq!(ctx.view(), View::Notifications);
        });
    }

    #[test]
    fn test_long_message_scrolls_to_last_word() {
        block_on(async {
            let mut ctx = context();
            ctx.views_mut().show(View::Message(6));
            let mut samples = [None; 40];
            for sample in samples.iter_mut().step_by(2) {
                *sample = swipe(Gesture::SwipeUp);
            }
            let mut touch = ScriptedTouch::new(&samples);
            let mut backlight = RecordingBacklight::default();

            for now in 0..40 {
                ctx.step(now * 10, &mut touch, &mut backlight).await.unwrap();
            }
            assert_eq!(ctx.view(), View::Message(6));

            let mut screen = Screen::new();
            ctx.compose(&mut screen, &DateTime::from_unix(1_700_000_000));
            let last = screen.lines().filter(|l| !l.is_empty()).last().unwrap();
            assert!(last.ends_with("journey!"));
        });
    }

    #[test]
    fn test_touch_error_propagates() {
        block_on(async {
            let mut ctx = context();
            let mut backlight = RecordingBacklight::default();
            assert_eq!(ctx.step(10, &mut FailingTouch, &mut backlight).await, Err(7));
        });
    }

    #[test]
    fn test_out_of_range_setting_ignored() {
        let mut ctx = context();
        ctx.on_setting_change(SettingChange::Timeout(9));
        assert_eq!(ctx.timeout().duration_ms(), 5000);
        assert_eq!(ctx.preferences().timeout_level, TimeoutLevel::FiveSeconds);
    }
}
