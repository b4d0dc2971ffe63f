//! Unigate Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the gate logic is written against.
//! Chip-specific HALs (currently RP2040) implement them, and host tests
//! implement them with mocks, so the same application code runs on the board
//! and on the workstation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  unigate-core / unigate-drivers         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  unigate-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ unigate-hal-  │       │  host mocks   │
//! │    rp2040     │       │  (unit tests) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`gpio::FlexPin`] - Pins that switch between input and driven-low output
//! - [`time::Clock`] - Monotonic microsecond time source
//! - [`storage::ByteStore`] - Non-volatile single-byte storage
//!
//! Delays use [`embedded_hal::delay::DelayNs`], re-exported as [`DelayNs`].

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod storage;
pub mod time;

// Re-export key traits at crate root for convenience
pub use embedded_hal::delay::DelayNs;
pub use gpio::{FlexPin, InputPin, OutputPin, Pull};
pub use storage::{ByteStore, StorageKey, StoreError, ERASED_BYTE};
pub use time::Clock;
