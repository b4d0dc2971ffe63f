//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific HALs.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Input bias resistor selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// High impedance; the board's external resistors decide the idle level
    None,
    /// Internal pull-up enabled
    Up,
    /// Internal pull-down enabled
    Down,
}

/// Pin that can be reconfigured between input and output at runtime
///
/// This is what open-drain emulation needs: a line is "released" by turning
/// the pin into an input (optionally with a pull-up so the line floats high)
/// and "asserted" by turning it into an output driving low. The pin can
/// always be read, whatever its current direction.
pub trait FlexPin: InputPin {
    /// Reconfigure as an input with the given bias
    fn set_as_input(&mut self, pull: Pull);

    /// Reconfigure as an output and drive it low
    fn drive_low(&mut self);
}
