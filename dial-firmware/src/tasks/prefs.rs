//! Preferences persistence task
//!
//! Owns the flash storage after startup and writes the preferences the
//! UI task signals. Bursts of changes (several brightness taps) collapse
//! into one write.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Timer};

use dial_core::prefs::Preferences;
use dial_hal_rp2040::flash::Rp2040FlashStorage;

use crate::channels::PREFS_SAVE;
use crate::config::save_preferences;

/// Quiet time after the last change before writing
const SAVE_DEBOUNCE: Duration = Duration::from_secs(1);

#[embassy_executor::task]
pub async fn prefs_task(mut storage: Rp2040FlashStorage<'static>, stored: Preferences) {
    info!("Preferences task started");

    let mut saved = stored;

    loop {
        let mut prefs = PREFS_SAVE.wait().await;

        loop {
            match select(PREFS_SAVE.wait(), Timer::after(SAVE_DEBOUNCE)).await {
                Either::First(newer) => prefs = newer,
                Either::Second(()) => break,
            }
        }

        if prefs == saved {
            debug!("Preferences unchanged, skipping write");
            continue;
        }

        match save_preferences(&mut storage, &prefs).await {
            Ok(()) => {
                info!("Preferences saved");
                saved = prefs;
            }
            Err(e) => {
                // The next change retries with a fresh snapshot
                error!("Failed to save preferences: {:?}", e);
            }
        }
    }
}
