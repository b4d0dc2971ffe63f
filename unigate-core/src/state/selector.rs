//! Family selection state machine
//!
//! Holds the active gate family, advances it on a rising edge of the
//! debounced mode button and persists every change. The states are the
//! families themselves; the only other cross-cycle state is the previous
//! button level used for edge detection.

use unigate_hal::{ByteStore, StorageKey, StoreError};

use crate::gate::GateFamily;

/// How the family was obtained at boot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadOutcome {
    /// A valid family was stored
    Restored,
    /// Storage held no valid family (blank or out of range); factory default used
    ColdStart {
        /// Byte found in storage
        stored: u8,
    },
    /// Storage could not be read; factory default used
    Unreadable(StoreError),
}

/// Result of persisting the family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PersistOutcome {
    /// New value written
    Written,
    /// Stored value already matched; no write issued
    Unchanged,
    /// Write failed; the in-memory family still changed
    Failed(StoreError),
}

/// A family change caused by a button edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FamilyChange {
    /// Family before the edge
    pub from: GateFamily,
    /// Family after the edge
    pub to: GateFamily,
    /// What happened to the stored copy
    pub persist: PersistOutcome,
}

/// Button-driven family selector with write-on-change persistence
#[derive(Debug, Clone)]
pub struct FamilySelector {
    family: GateFamily,
    key: StorageKey,
    last_button: bool,
}

impl FamilySelector {
    /// Create a selector starting at `family` without touching storage
    pub fn new(family: GateFamily, key: StorageKey) -> Self {
        Self {
            family,
            key,
            last_button: false,
        }
    }

    /// Restore the persisted family
    ///
    /// An out-of-range byte (blank storage reads 0xFF) or a failed read is a
    /// cold start, not an error: the factory default is selected and nothing
    /// is written until the user changes the family.
    pub fn load<S: ByteStore>(
        store: &mut S,
        key: StorageKey,
        factory_default: GateFamily,
    ) -> (Self, LoadOutcome) {
        let (family, outcome) = match store.read(key) {
            Ok(stored) => match GateFamily::from_u8(stored) {
                Some(family) => (family, LoadOutcome::Restored),
                None => (factory_default, LoadOutcome::ColdStart { stored }),
            },
            Err(e) => (factory_default, LoadOutcome::Unreadable(e)),
        };
        (Self::new(family, key), outcome)
    }

    /// Active family
    pub fn family(&self) -> GateFamily {
        self.family
    }

    /// Feed the debounced button level for this cycle
    ///
    /// On a low-to-high transition the family advances (wrapping) and is
    /// persisted immediately.
    pub fn on_button<S: ByteStore>(&mut self, pressed: bool, store: &mut S) -> Option<FamilyChange> {
        let rising = pressed && !self.last_button;
        self.last_button = pressed;
        if !rising {
            return None;
        }

        let from = self.family;
        self.family = from.next();
        Some(FamilyChange {
            from,
            to: self.family,
            persist: self.persist(store),
        })
    }

    /// Persist the active family, skipping the write if storage already matches
    pub fn persist<S: ByteStore>(&self, store: &mut S) -> PersistOutcome {
        match store.update(self.key, self.family.as_u8()) {
            Ok(true) => PersistOutcome::Written,
            Ok(false) => PersistOutcome::Unchanged,
            Err(e) => PersistOutcome::Failed(e),
        }
    }
}
