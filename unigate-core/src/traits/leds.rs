//! Status LED chain trait

use crate::status::StatusFrame;

/// Errors from the LED chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedError {
    /// The chain transmission failed
    Write,
}

/// Write-only addressable LED chain
///
/// Implementations are responsible for honouring the chain's latch timing
/// between consecutive flushes.
pub trait StatusSink {
    /// Set every pixel from `frame` and flush the chain
    fn show(&mut self, frame: &StatusFrame) -> Result<(), LedError>;
}
