//! UI control loop
//!
//! The single cooperative loop of the watch: poll touch, dispatch
//! gestures, service the display timeout, redraw. Runs every
//! `loop_delay_ms`.

use core::convert::Infallible;

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_time::Timer;

use dial_core::config::WatchConfig;
use dial_core::context::WatchContext;
use dial_core::events::SettingChange;
use dial_core::screen::Screen;
use dial_core::timeout::Action;
use dial_core::traits::{Clock, TouchInput, TouchPoint};
use dial_core::view::View;
use dial_drivers::touch::Cst816s;

use crate::channels::PREFS_SAVE;
use crate::clock::{EmbassyClock, WallClock};
use crate::display::{draw_screen, set_rotation, WatchBacklight, WatchDisplay};

/// Touch controller on I2C1
pub type WatchTouch = Cst816s<I2c<'static, I2C1, Async>, Output<'static>>;

/// Everything the UI task owns
pub struct UiResources {
    pub context: WatchContext,
    pub display: WatchDisplay,
    pub touch: WatchTouch,
    pub backlight: WatchBacklight,
    pub config: WatchConfig,
}

/// Reports bus errors as "no finger" so one bad read cannot stall the loop
struct ReleaseOnError<'a>(&'a mut WatchTouch);

impl TouchInput for ReleaseOnError<'_> {
    type Error = Infallible;

    async fn read_touch(&mut self) -> Result<Option<TouchPoint>, Infallible> {
        match self.0.read_touch().await {
            Ok(sample) => Ok(sample),
            Err(e) => {
                warn!("Touch read failed: {:?}", Debug2Format(&e));
                Ok(None)
            }
        }
    }
}

#[embassy_executor::task]
pub async fn ui_task(resources: UiResources) {
    let UiResources {
        mut context,
        mut display,
        mut touch,
        mut backlight,
        config,
    } = resources;

    info!("UI task started");

    let clock = EmbassyClock;
    let wall = WallClock::new(config.clock.start_unix);
    let panel = config.display.panel;
    let mut screen = Screen::new();
    // (hour, minute) on the last drawn clock face
    let mut shown_minute: Option<(u8, u8)> = None;

    loop {
        let now_ms = clock.now_ms();
        let step = match context
            .step(now_ms, &mut ReleaseOnError(&mut touch), &mut backlight)
            .await
        {
            Ok(step) => step,
            Err(e) => match e {},
        };

        if step.action == Action::ExpireAndDim {
            debug!("Display timed out");
        }

        if let Some(SettingChange::Rotation(_)) = step.change {
            let rotation = context.preferences().rotation();
            if let Err(e) = set_rotation(&mut display, &panel, rotation) {
                warn!("Failed to rotate panel: {:?}", e);
            }
            touch.set_rotation(rotation);
            info!("Rotation set to {}", rotation);
        }

        if step.prefs_changed {
            PREFS_SAVE.signal(context.preferences());
        }

        let now = wall.now();
        let face_stale =
            context.view() == View::Clock && shown_minute != Some((now.hour, now.minute));

        if step.redraw || face_stale {
            context.compose(&mut screen, &now);
            if let Err(e) = draw_screen(&mut display, &screen, panel.width) {
                warn!("Draw failed: {:?}", Debug2Format(&e));
            }
            shown_minute = Some((now.hour, now.minute));
        }

        Timer::after_millis(u64::from(config.ui.loop_delay_ms)).await;
    }
}
