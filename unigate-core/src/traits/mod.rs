//! Output device traits
//!
//! These traits define the interface between the cycle controller and the
//! devices that visualise its state. Drivers implement them; tests implement
//! them with recorders.

pub mod display;
pub mod leds;

pub use display::{DiagramSink, DisplayError};
pub use leds::{LedError, StatusSink};
