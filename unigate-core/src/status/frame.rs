//! Status LED frame composition

use smart_leds::RGB8;

use super::palette::{Palette, OFF};
use crate::gate::{GateFamily, GateView, Row};

/// Number of pixels on the status chain
pub const LED_COUNT: usize = 7;

/// Pixel positions along the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedSlot {
    /// Row 1 indicator
    In1 = 0,
    /// Row 2 indicator
    In2 = 1,
    /// Row 3 indicator
    In3 = 2,
    /// Row 4 indicator (dark while row 4 is the mode button)
    In4 = 3,
    /// Family colour, steady after boot
    Family = 4,
    /// Primary output
    Y = 5,
    /// Secondary output
    YBar = 6,
}

/// One complete set of pixel colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFrame {
    pixels: [RGB8; LED_COUNT],
}

impl Default for StatusFrame {
    fn default() -> Self {
        Self::dark()
    }
}

impl StatusFrame {
    /// All pixels off
    pub const fn dark() -> Self {
        Self {
            pixels: [OFF; LED_COUNT],
        }
    }

    /// Map live gate state to indicator colours
    pub fn compose(view: &GateView, palette: &Palette) -> Self {
        let mut frame = Self::dark();
        let lit = |on: bool, color: RGB8| if on { color } else { OFF };

        frame.set(LedSlot::In1, lit(view.rows.get(Row::One), palette.input_on));
        frame.set(LedSlot::In2, lit(view.rows.get(Row::Two), palette.input_on));
        frame.set(LedSlot::In3, lit(view.rows.get(Row::Three), palette.input_on));
        frame.set(
            LedSlot::In4,
            lit(
                view.mode.uses_row4() && view.rows.get(Row::Four),
                palette.input_on,
            ),
        );

        frame.set(LedSlot::Family, palette.family(view.family));

        // Both outputs of the dual inverter are inverted functions
        let y_color = if view.family.is_dual_inverter() {
            palette.output_inverted
        } else {
            palette.output_true
        };
        frame.set(LedSlot::Y, lit(view.outputs.y, y_color));
        frame.set(
            LedSlot::YBar,
            lit(view.outputs.y_bar, palette.output_inverted),
        );

        frame
    }

    /// Warm-up frame: only the family indicator lit
    pub fn warmup(family: GateFamily, palette: &Palette) -> Self {
        let mut frame = Self::dark();
        frame.set(LedSlot::Family, palette.family(family));
        frame
    }

    /// Colour of one slot
    pub fn get(&self, slot: LedSlot) -> RGB8 {
        self.pixels[slot as usize]
    }

    /// Set one slot
    pub fn set(&mut self, slot: LedSlot, color: RGB8) {
        self.pixels[slot as usize] = color;
    }

    /// Pixels in chain order
    pub fn pixels(&self) -> &[RGB8; LED_COUNT] {
        &self.pixels
    }
}
