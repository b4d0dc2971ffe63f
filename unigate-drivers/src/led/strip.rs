//! Addressable LED status strip
//!
//! Wraps any [`SmartLedsWrite`] chain and enforces the minimum idle time the
//! chain needs between two transmissions to latch the previous frame. The
//! guard measures elapsed time since the end of the last flush and only
//! sleeps for what remains; the first flush never waits.

use smart_leds::{SmartLedsWrite, RGB8};
use unigate_core::status::StatusFrame;
use unigate_core::traits::{LedError, StatusSink};
use unigate_hal::{Clock, DelayNs};

/// LED chain with latch timing protection
pub struct LedStrip<W, C, D> {
    writer: W,
    clock: C,
    delay: D,
    /// Minimum time between the end of one flush and the start of the next (µs)
    latch_guard_us: u32,
    /// End of the last flush, `None` before the first one
    last_flush_us: Option<u64>,
}

impl<W, C, D> LedStrip<W, C, D>
where
    W: SmartLedsWrite<Color = RGB8>,
    C: Clock,
    D: DelayNs,
{
    /// Create a strip; nothing is sent until the first write
    pub fn new(writer: W, clock: C, delay: D, latch_guard_us: u32) -> Self {
        Self {
            writer,
            clock,
            delay,
            latch_guard_us,
            last_flush_us: None,
        }
    }

    /// Time still to wait before the chain may be written again (µs)
    pub fn latch_remaining_us(&self) -> u32 {
        match self.last_flush_us {
            Some(last) => {
                let elapsed = self.clock.now_us().saturating_sub(last);
                (self.latch_guard_us as u64).saturating_sub(elapsed) as u32
            }
            None => 0,
        }
    }

    /// Send pixels in chain order, waiting out the latch guard first
    ///
    /// The timestamp is taken after the write returns, whether it succeeded
    /// or not, since a failed transmission may still have toggled the line.
    pub fn write_pixels(&mut self, pixels: &[RGB8]) -> Result<(), LedError> {
        let remaining = self.latch_remaining_us();
        if remaining > 0 {
            self.delay.delay_us(remaining);
        }

        let result = self.writer.write(pixels.iter().copied());
        self.last_flush_us = Some(self.clock.now_us());
        result.map_err(|_| LedError::Write)
    }
}

impl<W, C, D> StatusSink for LedStrip<W, C, D>
where
    W: SmartLedsWrite<Color = RGB8>,
    C: Clock,
    D: DelayNs,
{
    fn show(&mut self, frame: &StatusFrame) -> Result<(), LedError> {
        self.write_pixels(frame.pixels())
    }
}
