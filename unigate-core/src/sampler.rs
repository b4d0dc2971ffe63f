//! Input sampling
//!
//! Debounced pin reads and row aggregation. A pin is read three times with a
//! short spacing and the majority wins, which rejects single-sample glitches
//! for a bounded latency of two spacing intervals per pin.

use unigate_hal::{DelayNs, InputPin};

/// Samples taken per debounced read
pub const SAMPLES_PER_READ: u8 = 3;

/// Debouncing pin sampler
pub struct Sampler<D> {
    delay: D,
    spacing_us: u32,
}

impl<D: DelayNs> Sampler<D> {
    /// Create a sampler waiting `spacing_us` between samples
    pub fn new(delay: D, spacing_us: u32) -> Self {
        Self { delay, spacing_us }
    }

    /// Majority vote of three spaced samples
    pub fn read_stable(&mut self, pin: &dyn InputPin) -> bool {
        let mut high = 0u8;
        for i in 0..SAMPLES_PER_READ {
            if i > 0 {
                self.delay.delay_us(self.spacing_us);
            }
            if pin.is_high() {
                high += 1;
            }
        }
        high * 2 > SAMPLES_PER_READ
    }

    /// OR of the debounced values of a row's pins
    ///
    /// Stops at the first pin that reads high.
    pub fn row_or(&mut self, pins: &[&dyn InputPin]) -> bool {
        pins.iter().any(|pin| self.read_stable(*pin))
    }
}
