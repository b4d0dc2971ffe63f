//! Status LED rendering
//!
//! Maps live gate state onto the seven-pixel indicator chain, and drives the
//! boot warm-up sweep.

pub mod frame;
pub mod palette;
pub mod warmup;

pub use frame::{LedSlot, StatusFrame, LED_COUNT};
pub use palette::{rgb, Palette, OFF};
pub use warmup::{WarmUp, WarmUpReport};
