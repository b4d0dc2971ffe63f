//! Non-volatile byte storage abstractions
//!
//! Models the small EEPROM-style store the gate keeps its settings in: one
//! byte per key, read at boot and rewritten only when the value changes.
//! Boards without EEPROM emulate it on flash (see `unigate-hal-rp2040`).

/// Value an erased or never-written location reads back as
pub const ERASED_BYTE: u8 = 0xFF;

/// Storage keys for persisted settings
///
/// The discriminant doubles as the byte address on EEPROM-style stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Selected gate family (one byte, ordinal)
    GateFamily = 0,
}

impl StorageKey {
    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageKey::GateFamily),
            _ => None,
        }
    }
}

/// Errors from byte storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Underlying flash/EEPROM operation failed
    Flash,
    /// Storage layer (map, wear levelling) failed
    Storage,
}

/// Single-byte non-volatile store
///
/// Implementations must return [`ERASED_BYTE`] for keys that were never
/// written, the way a blank EEPROM cell reads.
pub trait ByteStore {
    /// Read the byte stored under `key`
    fn read(&mut self, key: StorageKey) -> Result<u8, StoreError>;

    /// Unconditionally write `value` under `key`
    fn write(&mut self, key: StorageKey, value: u8) -> Result<(), StoreError>;

    /// Write `value` only if it differs from what is stored
    ///
    /// Returns `true` if a write was issued. Skipping identical writes bounds
    /// wear on the storage cells.
    fn update(&mut self, key: StorageKey, value: u8) -> Result<bool, StoreError> {
        if self.read(key)? == value {
            return Ok(false);
        }
        self.write(key, value)?;
        Ok(true)
    }
}

impl<T: ByteStore + ?Sized> ByteStore for &mut T {
    fn read(&mut self, key: StorageKey) -> Result<u8, StoreError> {
        (**self).read(key)
    }

    fn write(&mut self, key: StorageKey, value: u8) -> Result<(), StoreError> {
        (**self).write(key, value)
    }

    fn update(&mut self, key: StorageKey, value: u8) -> Result<bool, StoreError> {
        (**self).update(key, value)
    }
}

// Implement the sequential-storage Key trait when the feature is enabled
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
