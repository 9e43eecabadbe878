//! Preferences persistence
//!
//! Loads and saves the user preferences record in flash.

use defmt::*;

use dial_core::prefs::{Preferences, MAX_PREFS_SIZE};
use dial_hal_rp2040::flash::{FlashError, Rp2040FlashStorage, StorageKey, PREFS_CAPACITY};
use dial_hal_rp2040::FlashStorageTrait;

use super::ConfigError;

const _: () = core::assert!(MAX_PREFS_SIZE <= PREFS_CAPACITY);

/// Load preferences from flash
///
/// Returns `defaults` when nothing is stored or the record is unusable.
pub async fn load_preferences(
    storage: &mut Rp2040FlashStorage<'_>,
    defaults: Preferences,
) -> Preferences {
    match load_preferences_inner(storage).await {
        Ok(prefs) => {
            info!(
                "Loaded preferences: timeout level {}, brightness {}, rotation {}",
                prefs.timeout_level.index(),
                prefs.brightness,
                prefs.rotation()
            );
            prefs
        }
        Err(ConfigError::Flash(FlashError::NotFound)) => {
            debug!("No preferences in flash, using defaults");
            defaults
        }
        Err(e) => {
            warn!("Failed to load preferences: {:?}, using defaults", e);
            defaults
        }
    }
}

async fn load_preferences_inner(
    storage: &mut Rp2040FlashStorage<'_>,
) -> Result<Preferences, ConfigError> {
    let mut buffer = [0u8; MAX_PREFS_SIZE];
    let len = storage.read(StorageKey::Preferences, &mut buffer).await?;
    debug!("Read {} bytes of preferences from flash", len);

    Ok(Preferences::decode(&buffer[..len])?)
}

/// Save preferences to flash
pub async fn save_preferences(
    storage: &mut Rp2040FlashStorage<'_>,
    prefs: &Preferences,
) -> Result<(), ConfigError> {
    let mut buffer = [0u8; MAX_PREFS_SIZE];
    let bytes = prefs.encode(&mut buffer)?;

    debug!("Saving {} bytes of preferences to flash", bytes.len());
    storage.write(StorageKey::Preferences, bytes).await?;

    Ok(())
}
