//! GPIO wrappers
//!
//! Newtypes over the embassy-rp pin drivers implementing the board-agnostic
//! pin traits.

use embassy_rp::gpio::{self, Flex, Input, Level, Output};
use embassy_rp::Peri;
use unigate_hal::{FlexPin, InputPin, OutputPin, Pull};

fn to_rp_pull(pull: Pull) -> gpio::Pull {
    match pull {
        Pull::None => gpio::Pull::None,
        Pull::Up => gpio::Pull::Up,
        Pull::Down => gpio::Pull::Down,
    }
}

/// Input pin
pub struct GpioInput<'d> {
    pin: Input<'d>,
}

impl<'d> GpioInput<'d> {
    /// Configure `pin` as an input with the given bias
    pub fn new(pin: Peri<'d, impl gpio::Pin>, pull: Pull) -> Self {
        Self {
            pin: Input::new(pin, to_rp_pull(pull)),
        }
    }
}

impl InputPin for GpioInput<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

/// Push-pull output pin
pub struct GpioOutput<'d> {
    pin: Output<'d>,
}

impl<'d> GpioOutput<'d> {
    /// Configure `pin` as an output, initially low
    pub fn new(pin: Peri<'d, impl gpio::Pin>) -> Self {
        Self {
            pin: Output::new(pin, Level::Low),
        }
    }
}

impl OutputPin for GpioOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

/// Pin switchable between input and output at runtime
pub struct GpioFlex<'d> {
    pin: Flex<'d>,
}

impl<'d> GpioFlex<'d> {
    /// Take `pin`, starting as an unbiased input
    pub fn new(pin: Peri<'d, impl gpio::Pin>) -> Self {
        let mut flex = Self {
            pin: Flex::new(pin),
        };
        flex.set_as_input(Pull::None);
        flex
    }
}

impl InputPin for GpioFlex<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

impl FlexPin for GpioFlex<'_> {
    fn set_as_input(&mut self, pull: Pull) {
        self.pin.set_as_input();
        self.pin.set_pull(to_rp_pull(pull));
    }

    fn drive_low(&mut self) {
        // Latch the level first so the line never glitches high
        self.pin.set_low();
        self.pin.set_as_output();
    }
}
