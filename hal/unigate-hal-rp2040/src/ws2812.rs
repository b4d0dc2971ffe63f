//! PIO-driven WS2812 chain
//!
//! Wraps the embassy-rp WS2812 PIO program behind `SmartLedsWrite` so the
//! board-agnostic LED strip driver can use it. Each write is driven to
//! completion before returning.

use core::convert::Infallible;

use embassy_futures::block_on;
use embassy_rp::dma::Channel;
use embassy_rp::pio::{Common, Instance, PioPin, StateMachine};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::Peri;
use smart_leds::{SmartLedsWrite, RGB8};

/// WS2812 chain of `N` pixels on one PIO state machine
pub struct Ws2812Chain<'d, P: Instance, const S: usize, const N: usize> {
    ws: PioWs2812<'d, P, S, N>,
}

impl<'d, P: Instance, const S: usize, const N: usize> Ws2812Chain<'d, P, S, N> {
    /// Load the chain onto a state machine
    pub fn new(
        common: &mut Common<'d, P>,
        sm: StateMachine<'d, P, S>,
        dma: Peri<'d, impl Channel>,
        pin: Peri<'d, impl PioPin>,
        program: &PioWs2812Program<'d, P>,
    ) -> Self {
        Self {
            ws: PioWs2812::new(common, sm, dma, pin, program),
        }
    }
}

impl<P: Instance, const S: usize, const N: usize> SmartLedsWrite for Ws2812Chain<'_, P, S, N> {
    type Error = Infallible;
    type Color = RGB8;

    /// Pixels beyond `N` are ignored; missing pixels are sent dark
    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        let mut pixels = [RGB8::default(); N];
        for (slot, color) in pixels.iter_mut().zip(iterator) {
            *slot = color.into();
        }
        block_on(self.ws.write(&pixels));
        Ok(())
    }
}
