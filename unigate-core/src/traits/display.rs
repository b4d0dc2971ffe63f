//! Display trait for the optional gate diagram

use crate::gate::GateView;

/// Errors that can occur while updating the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// The display stopped acknowledging on the bus
    Communication,
}

/// Something that can show the gate diagram
///
/// Every call redraws and transmits the full frame; implementations keep no
/// incremental state between calls.
pub trait DiagramSink {
    /// Render and push one frame for the given gate state
    fn present(&mut self, view: &GateView) -> Result<(), DisplayError>;
}
