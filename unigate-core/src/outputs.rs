//! Output pin buses
//!
//! Each logical output is brought out on three header pins. A bus owns all
//! three and only exposes whole-bus writes, so the pins can never disagree.

use unigate_hal::OutputPin;

use crate::gate::OutputPair;

/// Physical pins per logical output
pub const PINS_PER_OUTPUT: usize = 3;

/// One logical output driven onto several pins
pub struct OutputBus<P> {
    pins: [P; PINS_PER_OUTPUT],
}

impl<P: OutputPin> OutputBus<P> {
    /// Take ownership of the pins and drive them low
    pub fn new(pins: [P; PINS_PER_OUTPUT]) -> Self {
        let mut bus = Self { pins };
        bus.drive(false);
        bus
    }

    /// Drive every pin to `high`
    pub fn drive(&mut self, high: bool) {
        for pin in self.pins.iter_mut() {
            pin.set_state(high);
        }
    }

    /// Level currently driven (taken from the first pin)
    pub fn level(&self) -> bool {
        self.pins[0].is_set_high()
    }

    /// Borrow the pins
    pub fn pins(&self) -> &[P; PINS_PER_OUTPUT] {
        &self.pins
    }
}

/// The Y and /Y (or Y1 and Y2) output buses
pub struct OutputBuses<P> {
    /// Primary output
    pub y: OutputBus<P>,
    /// Secondary output
    pub y_bar: OutputBus<P>,
}

impl<P: OutputPin> OutputBuses<P> {
    /// Bundle the two buses
    pub fn new(y: OutputBus<P>, y_bar: OutputBus<P>) -> Self {
        Self { y, y_bar }
    }

    /// Drive both buses from an evaluated pair
    pub fn drive(&mut self, outputs: OutputPair) {
        self.y.drive(outputs.y);
        self.y_bar.drive(outputs.y_bar);
    }

    /// Levels currently driven
    pub fn levels(&self) -> OutputPair {
        OutputPair {
            y: self.y.level(),
            y_bar: self.y_bar.level(),
        }
    }
}
