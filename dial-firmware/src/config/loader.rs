//! Configuration persistence
//!
//! Loads watch configuration from flash storage.
//! Falls back to embedded defaults if flash is empty.

use core::str;
use defmt::*;

use dial_core::config::{parse_config, WatchConfig, CONFIG_VERSION};
use dial_core::prefs::PrefsError;
use dial_hal_rp2040::flash::{FlashError, Rp2040FlashStorage, StorageKey, MAX_ITEM_SIZE};
// Import the FlashStorage trait to bring methods into scope
use dial_hal_rp2040::FlashStorageTrait;

/// Configuration persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Flash operation failed
    Flash(FlashError),
    /// TOML parsing failed
    TomlParse,
    /// Invalid UTF-8 in TOML data
    InvalidUtf8,
    /// Stored preferences could not be used
    Prefs(PrefsError),
}

impl From<FlashError> for ConfigError {
    fn from(e: FlashError) -> Self {
        ConfigError::Flash(e)
    }
}

impl From<PrefsError> for ConfigError {
    fn from(e: PrefsError) -> Self {
        ConfigError::Prefs(e)
    }
}

/// Configuration persistence manager
///
/// Handles loading the watch configuration from flash storage.
pub struct ConfigPersistence<'d> {
    storage: Rp2040FlashStorage<'d>,
}

impl<'d> ConfigPersistence<'d> {
    /// Create a new config persistence manager
    pub fn new(storage: Rp2040FlashStorage<'d>) -> Self {
        Self { storage }
    }

    /// Borrow the storage, for loading preferences before handing it on
    pub fn storage(&mut self) -> &mut Rp2040FlashStorage<'d> {
        &mut self.storage
    }

    /// Consume this persistence manager and return the underlying storage
    ///
    /// The preferences task takes the storage over once startup is done.
    pub fn into_storage(self) -> Rp2040FlashStorage<'d> {
        self.storage
    }

    /// Load the TOML override from flash
    pub async fn load(&mut self) -> Result<WatchConfig, ConfigError> {
        info!("Loading configuration from flash...");

        let mut buffer = [0u8; MAX_ITEM_SIZE];
        let len = self
            .storage
            .read(StorageKey::WatchConfigToml, &mut buffer)
            .await?;

        debug!("Read {} bytes of TOML from flash", len);

        let toml_str = str::from_utf8(&buffer[..len]).map_err(|_| ConfigError::InvalidUtf8)?;
        let config = parse_toml(toml_str)?;

        log_config_summary(&config);
        Ok(config)
    }
}

/// Parse TOML text, logging the parser error
pub fn parse_toml(toml_str: &str) -> Result<WatchConfig, ConfigError> {
    let config = parse_config(toml_str).map_err(|e| {
        warn!("TOML parse error: {:?}", e);
        ConfigError::TomlParse
    })?;

    if config.version != CONFIG_VERSION {
        warn!(
            "Config version {} differs from supported {}",
            config.version, CONFIG_VERSION
        );
    }
    Ok(config)
}

/// Log a summary of the loaded configuration
pub fn log_config_summary(config: &WatchConfig) {
    let display = &config.display;
    info!(
        "Panel {}x{}, SPI mode {} at {} Hz",
        display.panel.width, display.panel.height, display.bus.spi_mode, display.bus.freq_write
    );
    debug!(
        "  Backlight gpio{} at {} Hz, brightness {}",
        display.light.pin.pin, display.light.freq, display.light.brightness
    );
    debug!(
        "  Touch I2C{} addr {=u8:#x} at {} Hz",
        display.touch.i2c_port, display.touch.address, display.touch.freq
    );
    debug!(
        "  Loop {} ms, timeout level {}",
        config.ui.loop_delay_ms,
        config.timeout.level.index()
    );
}
