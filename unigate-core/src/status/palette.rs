//! Indicator colours
//!
//! Channel values are kept at or below 64 to hold the LED chain's current
//! draw within what the board's 5 V rail is sized for.

use smart_leds::RGB8;

use crate::gate::GateFamily;

/// Build a colour in a const context
pub const fn rgb(r: u8, g: u8, b: u8) -> RGB8 {
    RGB8 { r, g, b }
}

/// Unlit pixel
pub const OFF: RGB8 = rgb(0, 0, 0);

/// Colour policy for the status LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Lit input row
    pub input_on: RGB8,
    /// High non-inverted output (Y)
    pub output_true: RGB8,
    /// High inverted output (/Y, and both outputs of the dual inverter)
    pub output_inverted: RGB8,
    /// Family indicator colour, indexed by [`GateFamily::index`]
    pub families: [RGB8; GateFamily::COUNT],
}

impl Palette {
    /// Dim green inputs, green Y, red /Y, one hue per family
    pub const DEFAULT: Self = Self {
        input_on: rgb(0, 48, 0),
        output_true: rgb(0, 64, 0),
        output_inverted: rgb(64, 0, 0),
        families: [
            rgb(0, 64, 0),   // AND/NAND: green
            rgb(48, 24, 0),  // OR/NOR: amber
            rgb(32, 0, 48),  // XOR/XNOR: magenta
            rgb(48, 48, 0),  // MAJ/MIN: yellow
            rgb(0, 32, 48),  // Dual NOT: cyan
        ],
    };

    /// Indicator colour for a family
    pub fn family(&self, family: GateFamily) -> RGB8 {
        self.families[family.index()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::DEFAULT
    }
}
