//! Boot warm-up animation
//!
//! Sweeps the family indicator through every family colour for a fixed
//! window. Besides showing the board is alive, the window gives an attached
//! display module time to power up before it is probed.

use unigate_hal::{Clock, DelayNs};

use super::frame::StatusFrame;
use super::palette::Palette;
use crate::config::TimingConfig;
use crate::gate::GateFamily;
use crate::traits::StatusSink;

/// Warm-up timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WarmUp {
    window_ms: u32,
    dwell_ms: u32,
    frame_ms: u32,
}

/// What happened during the warm-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WarmUpReport {
    /// Frames pushed to the chain
    pub frames: u32,
    /// Frames the chain rejected
    pub failed_frames: u32,
}

impl WarmUp {
    /// Create from explicit durations (ms)
    pub fn new(window_ms: u32, dwell_ms: u32, frame_ms: u32) -> Self {
        Self {
            window_ms,
            dwell_ms: dwell_ms.max(1),
            frame_ms: frame_ms.max(1),
        }
    }

    /// Create from the configured timing
    pub fn from_timing(timing: &TimingConfig) -> Self {
        Self::new(
            timing.warmup_ms,
            timing.warmup_dwell_ms,
            timing.warmup_frame_ms,
        )
    }

    /// Family colour to show `elapsed_ms` into the window, or `None` once over
    pub fn phase(&self, elapsed_ms: u64) -> Option<GateFamily> {
        if elapsed_ms >= self.window_ms as u64 {
            return None;
        }
        let step = (elapsed_ms / self.dwell_ms as u64) as usize;
        Some(GateFamily::ALL[step % GateFamily::COUNT])
    }

    /// Blank the chain, then run the sweep until the window has elapsed
    ///
    /// LED failures are counted, not fatal: the window must still elapse in
    /// full so the display gets its power-up time.
    pub fn run<S, C, D>(&self, sink: &mut S, palette: &Palette, clock: &C, delay: &mut D) -> WarmUpReport
    where
        S: StatusSink + ?Sized,
        C: Clock + ?Sized,
        D: DelayNs,
    {
        let mut report = WarmUpReport::default();
        let mut push = |sink: &mut S, frame: &StatusFrame| {
            report.frames += 1;
            if sink.show(frame).is_err() {
                report.failed_frames += 1;
            }
        };

        push(&mut *sink, &StatusFrame::dark());

        let start = clock.now_ms();
        while let Some(family) = self.phase(clock.now_ms().saturating_sub(start)) {
            push(&mut *sink, &StatusFrame::warmup(family, palette));
            delay.delay_ms(self.frame_ms);
        }

        report
    }
}
