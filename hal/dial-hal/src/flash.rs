//! Persistent watch records
//!
//! The watch keeps two records in flash: the user preferences (timeout
//! level, brightness, rotation) written whenever a setting changes, and an
//! optional `watch.toml` override that replaces the configuration embedded
//! in the firmware image. Each record has a fixed capacity that the chip
//! HAL enforces on write.

/// Capacity of the postcard-encoded preferences record
pub const PREFS_CAPACITY: usize = 16;

/// Capacity of the `watch.toml` override
pub const CONFIG_TOML_CAPACITY: usize = 2048;

/// Record selector
///
/// The byte value is what lands in flash, so existing values must not be
/// renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Preferences, rewritten after each settings change
    Preferences = 0,
    /// `watch.toml` text that overrides the embedded configuration
    WatchConfigToml = 1,
}

impl StorageKey {
    /// Every record the watch stores
    pub const ALL: [StorageKey; 2] = [StorageKey::Preferences, StorageKey::WatchConfigToml];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageKey::Preferences),
            1 => Some(StorageKey::WatchConfigToml),
            _ => None,
        }
    }

    /// Largest value accepted for this record
    pub const fn capacity(self) -> usize {
        match self {
            StorageKey::Preferences => PREFS_CAPACITY,
            StorageKey::WatchConfigToml => CONFIG_TOML_CAPACITY,
        }
    }

    /// Reject a value that does not fit this record
    pub fn check_len(self, len: usize) -> Result<(), FlashError> {
        if len > self.capacity() {
            return Err(FlashError::TooLarge);
        }
        Ok(())
    }
}

/// Errors from reading or writing a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// The flash peripheral reported an erase or program failure
    Flash,
    /// The storage layer failed for another reason
    Storage,
    /// The record was never written, or the partition was erased
    NotFound,
    /// The caller's buffer is shorter than the stored record
    BufferTooSmall,
    /// The value exceeds the record's capacity
    TooLarge,
    /// Stored data failed its integrity check
    Corrupted,
    /// No free space is left after garbage collection
    Full,
}

/// Record storage on the board's flash
///
/// Implementations keep older copies until space is needed, so a write
/// interrupted by power loss leaves the previous value readable.
pub trait FlashStorage {
    /// Read the record for `key` into `buffer`
    ///
    /// Returns the record length. A short buffer is an error rather than
    /// a truncated read.
    fn read(
        &mut self,
        key: StorageKey,
        buffer: &mut [u8],
    ) -> impl core::future::Future<Output = Result<usize, FlashError>>;

    /// Replace the record for `key`
    fn write(
        &mut self,
        key: StorageKey,
        data: &[u8],
    ) -> impl core::future::Future<Output = Result<(), FlashError>>;

    fn exists(&mut self, key: StorageKey) -> impl core::future::Future<Output = bool>;

    /// Erase the whole partition, preferences and override alike
    fn erase_all(&mut self) -> impl core::future::Future<Output = Result<(), FlashError>>;
}

// One byte on flash per key
#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        buffer[0] = self.as_u8();
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        match StorageKey::from_u8(buffer[0]) {
            Some(key) => Ok((key, 1)),
            None => Err(sequential_storage::map::SerializationError::InvalidFormat),
        }
    }
}
