//! Watch records in RP2040 flash
//!
//! The preferences record and the `watch.toml` override live in a
//! `sequential-storage` map at the top 64 KB of the 2 MB flash, above the
//! firmware image. Writes append a new copy; erased pages are reclaimed
//! when the partition fills.

use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use embedded_storage_async::nor_flash::NorFlash;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

pub use dial_hal::flash::{FlashError, StorageKey, CONFIG_TOML_CAPACITY, PREFS_CAPACITY};

/// Flash fitted to the round touch board
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;
pub const STORAGE_PARTITION_SIZE: usize = 64 * 1024;
pub const STORAGE_PARTITION_START: usize = FLASH_SIZE - STORAGE_PARTITION_SIZE;

pub const FLASH_ERASE_SIZE: usize = ERASE_SIZE;

/// Largest record value, the `watch.toml` override
pub const MAX_ITEM_SIZE: usize = CONFIG_TOML_CAPACITY;

/// Map item buffer: the value plus its key byte, rounded up to a word
const SCRATCH_SIZE: usize = (MAX_ITEM_SIZE + 1).next_multiple_of(4);

pub const STORAGE_RANGE: core::ops::Range<u32> =
    (STORAGE_PARTITION_START as u32)..(FLASH_SIZE as u32);

const _: () = assert!(STORAGE_PARTITION_SIZE % FLASH_ERASE_SIZE == 0);
const _: () = assert!(STORAGE_PARTITION_SIZE >= 2 * FLASH_ERASE_SIZE);

/// Preferences and `watch.toml` override on the RP2040's QSPI flash
pub struct Rp2040FlashStorage<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
}


impl<'d> Rp2040FlashStorage<'d> {
    /// Take the flash peripheral, with a DMA channel for reads
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
        }
    }

    /// Latest copy of the record for `key`, if any
    async fn fetch<'b>(
        &mut self,
        key: StorageKey,
        scratch: &'b mut [u8; SCRATCH_SIZE],
    ) -> Result<Option<&'b [u8]>, FlashError> {
        map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            STORAGE_RANGE,
            &mut NoCache::new(),
            scratch,
            &key,
        )
        .await
        .map_err(|_| FlashError::Storage)
    }
}

impl<'d> dial_hal::FlashStorage for Rp2040FlashStorage<'d> {
    async fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let mut scratch = [0u8; SCRATCH_SIZE];

        let data = self.fetch(key, &mut scratch).await?.ok_or(FlashError::NotFound)?;
        let len = data.len();
        if buffer.len() < len {
            return Err(FlashError::BufferTooSmall);
        }
        buffer[..len].copy_from_slice(data);
        Ok(len)
    }

    async fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        key.check_len(data.len())?;
        let mut scratch = [0u8; SCRATCH_SIZE];

        map::store_item(
            &mut self.flash,
            STORAGE_RANGE,
            &mut NoCache::new(),
            &mut scratch,
            &key,
            &data,
        )
        .await
        .map_err(|e| match e {
            sequential_storage::Error::FullStorage => FlashError::Full,
            sequential_storage::Error::Corrupted { .. } => FlashError::Corrupted,
            _ => FlashError::Storage,
        })
    }

    async fn exists(&mut self, key: StorageKey) -> bool {
        let mut scratch = [0u8; SCRATCH_SIZE];
        matches!(self.fetch(key, &mut scratch).await, Ok(Some(_)))
    }

    async fn erase_all(&mut self) -> Result<(), FlashError> {
        self.flash
            .erase(STORAGE_RANGE.start, STORAGE_RANGE.end)
            .await
            .map_err(|_| FlashError::Flash)
    }
}
