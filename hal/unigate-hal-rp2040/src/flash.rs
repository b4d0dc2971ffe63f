//! Flash-emulated byte store for RP2040
//!
//! The RP2040 has no EEPROM, so the persisted family byte lives in a small
//! sequential-storage key/value map at the end of flash. The map appends a
//! new entry on each write and erases pages only when it wraps, which keeps
//! wear low for a value that changes once per button press.
//!
//! Implements the `ByteStore` trait from `unigate-hal`. A key that was never
//! written reads as the erased value, exactly like a blank EEPROM cell.

use embassy_futures::block_on;
use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::NoCache;
use sequential_storage::map;
use unigate_hal::{ByteStore, StorageKey, StoreError, ERASED_BYTE};

/// Flash storage configuration
pub const FLASH_SIZE: usize = 2 * 1024 * 1024; // 2MB flash on the Pico
pub const STORE_PARTITION_SIZE: usize = 2 * ERASE_SIZE; // Two pages, the map minimum
pub const STORE_PARTITION_START: usize = FLASH_SIZE - STORE_PARTITION_SIZE;

// The firmware's memory.x keeps the linker out of exactly this many bytes
const _: () = assert!(STORE_PARTITION_SIZE == 8 * 1024);

/// Flash range for the store partition
pub const STORE_RANGE: core::ops::Range<u32> =
    (STORE_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// Scratch space for one serialized map entry
const ITEM_BUFFER_LEN: usize = 32;

/// RP2040 flash byte store
pub struct FlashByteStore<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
}

impl<'d> FlashByteStore<'d> {
    /// Create a new flash store instance
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
        }
    }
}

impl ByteStore for FlashByteStore<'_> {
    fn read(&mut self, key: StorageKey) -> Result<u8, StoreError> {
        let mut data_buffer = [0u8; ITEM_BUFFER_LEN];

        let result = block_on(map::fetch_item::<StorageKey, u8, _>(
            &mut self.flash,
            STORE_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
        ));

        match result {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Ok(ERASED_BYTE),
            Err(e) => Err(store_error(e)),
        }
    }

    fn write(&mut self, key: StorageKey, value: u8) -> Result<(), StoreError> {
        let mut data_buffer = [0u8; ITEM_BUFFER_LEN];

        block_on(map::store_item(
            &mut self.flash,
            STORE_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
            &value,
        ))
        .map_err(store_error)
    }
}

/// Flash driver failures are told apart from map-level failures
fn store_error<E>(error: sequential_storage::Error<E>) -> StoreError {
    match error {
        sequential_storage::Error::Storage { .. } => StoreError::Flash,
        _ => StoreError::Storage,
    }
}
