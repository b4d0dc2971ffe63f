//! RP2040-specific HAL for the Unigate firmware
//!
//! This crate provides RP2040 implementations of the shared `unigate-hal`
//! traits:
//!
//! - GPIO wrappers (inputs, outputs, and open-drain capable flex pins)
//! - Flash-emulated byte store (implements `unigate_hal::ByteStore`)
//! - PIO-driven WS2812 chain (implements `smart_leds::SmartLedsWrite`)
//! - Monotonic clock on top of embassy-time
//!
//! The application loop is synchronous; the async embassy drivers are
//! driven to completion with `embassy_futures::block_on`.

#![no_std]

pub mod flash;
pub mod gpio;
pub mod time;
pub mod ws2812;

// Re-export shared traits from unigate-hal for convenience
pub use unigate_hal::{ByteStore, Clock, FlexPin, InputPin, OutputPin, Pull, StorageKey};
