//! Gate diagram renderer
//!
//! Draws a D-shaped gate body with the family name inside, input legs with
//! their live bits on the left and output legs with labels and bits on the
//! right. Each call clears the canvas and draws the whole frame.

use unigate_core::gate::{GateFamily, GateView, Row};

use crate::canvas::Canvas;
use crate::font::draw_text;

/// Diagram geometry in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DiagramLayout {
    /// Left edge of the gate body
    pub body_left: i32,
    /// Right edge of the gate body (tip of the curve)
    pub body_right: i32,
    /// Top edge of the gate body
    pub body_top: i32,
    /// Bottom edge of the gate body
    pub body_bottom: i32,
    /// Width of the curved output end
    pub curve_width: i32,
    /// Label x offset from the body's left edge
    pub label_inset: i32,
    /// Top of the upper and lower family labels
    pub label_rows: [i32; 2],
    /// Font scale of the family labels
    pub label_scale: u8,
    /// Y of the two output legs
    pub output_rows: [i32; 2],
    /// Output leg length
    pub output_leg: i32,
    /// Output label x offset from the body's right edge
    pub output_label_dx: i32,
    /// Output bit x offset from the body's right edge
    pub output_bit_dx: i32,
    /// X where the input legs start
    pub input_start: i32,
    /// Gap between the end of an input leg and the body
    pub input_gap: i32,
    /// Input bit x offset back from the end of the leg
    pub input_bit_dx: i32,
    /// Y of the three input legs in the standard layout
    pub input_rows: [i32; 3],
}

impl DiagramLayout {
    /// Layout for a 128x64 panel
    pub const DEFAULT: Self = Self {
        body_left: 26,
        body_right: 92,
        body_top: 10,
        body_bottom: 54,
        curve_width: 14,
        label_inset: 8,
        label_rows: [18, 36],
        label_scale: 2,
        output_rows: [26, 38],
        output_leg: 12,
        output_label_dx: 14,
        output_bit_dx: 28,
        input_start: 14,
        input_gap: 3,
        input_bit_dx: 16,
        input_rows: [18, 32, 46],
    };

    /// X where input legs end
    fn input_end(&self) -> i32 {
        self.body_left - self.input_gap
    }
}

impl Default for DiagramLayout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Upper and lower family labels, padded to four characters
pub fn family_labels(family: GateFamily) -> (&'static str, &'static str) {
    match family {
        GateFamily::AndNand => ("AND ", "NAND"),
        GateFamily::OrNor => ("OR  ", "NOR "),
        GateFamily::XorXnor => ("XOR ", "XNOR"),
        GateFamily::MajMin => ("MAJ ", "MIN "),
        GateFamily::DualNot => ("NOT ", "NOT "),
    }
}

/// Labels of the two outputs
pub fn output_labels(family: GateFamily) -> (&'static str, &'static str) {
    if family.is_dual_inverter() {
        ("Y1", "Y2")
    } else {
        ("Y", "/Y")
    }
}

/// Redraw the whole diagram for `view`
pub fn render<C: Canvas + ?Sized>(canvas: &mut C, view: &GateView, layout: &DiagramLayout) {
    canvas.clear();

    draw_body(canvas, layout);

    let (top, bottom) = family_labels(view.family);
    let label_x = layout.body_left + layout.label_inset;
    draw_text(canvas, label_x, layout.label_rows[0], top, layout.label_scale);
    draw_text(canvas, label_x, layout.label_rows[1], bottom, layout.label_scale);

    draw_outputs(canvas, view, layout);
    draw_inputs(canvas, view, layout);
}

/// Straight back, flat top and bottom, and a stepped curve at the output end
fn draw_body<C: Canvas + ?Sized>(canvas: &mut C, layout: &DiagramLayout) {
    let shoulder = layout.body_right - layout.curve_width / 2 - 1;
    canvas.hline(layout.body_left, shoulder, layout.body_top, true);
    canvas.hline(layout.body_left, shoulder, layout.body_bottom, true);
    canvas.vline(layout.body_left, layout.body_top, layout.body_bottom, true);

    for i in 0..layout.curve_width {
        canvas.vline(
            shoulder + i,
            layout.body_top + 3 + i / 3,
            layout.body_bottom - 3 - i / 3,
            true,
        );
    }
}

fn draw_outputs<C: Canvas + ?Sized>(canvas: &mut C, view: &GateView, layout: &DiagramLayout) {
    let (first, second) = output_labels(view.family);
    let values = [view.outputs.y, view.outputs.y_bar];

    for ((oy, label), value) in layout.output_rows.iter().zip([first, second]).zip(values) {
        canvas.hline(layout.body_right, layout.body_right + layout.output_leg, *oy, true);
        draw_text(canvas, layout.body_right + layout.output_label_dx, oy - 2, label, 1);
        draw_bit(canvas, layout.body_right + layout.output_bit_dx, oy - 2, value);
    }
}

fn draw_inputs<C: Canvas + ?Sized>(canvas: &mut C, view: &GateView, layout: &DiagramLayout) {
    let end = layout.input_end();
    let bit_x = end - layout.input_bit_dx;
    let rows = &view.rows;

    if view.family.is_dual_inverter() {
        // Two legs, level with the outputs they invert into
        let legs = [
            (layout.output_rows[0], rows.get(Row::Two)),
            (layout.output_rows[1], rows.get(Row::Three)),
        ];
        for (y, value) in legs {
            canvas.hline(layout.input_start, end, y, true);
            draw_bit(canvas, bit_x, y - 3, value);
        }
    } else {
        let values = [rows.get(Row::One), rows.get(Row::Two), rows.get(Row::Three)];
        for (y, value) in layout.input_rows.iter().zip(values) {
            canvas.hline(layout.input_start, end, *y, true);
            draw_bit(canvas, bit_x, y - 3, value);
        }
    }
}

fn draw_bit<C: Canvas + ?Sized>(canvas: &mut C, x: i32, y: i32, value: bool) {
    draw_text(canvas, x, y, if value { "1" } else { "0" }, 1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::Framebuffer;
    use proptest::prelude::*;
    use unigate_core::gate::{RowState, TopologyMode};

    const LAYOUT: DiagramLayout = DiagramLayout::DEFAULT;

    fn draw(family: GateFamily, rows: [bool; 4]) -> Framebuffer {
        let view = GateView::evaluate(
            family,
            TopologyMode::ThreeInputWithDisplay,
            RowState::new(rows[0], rows[1], rows[2], rows[3]),
        );
        let mut fb = Framebuffer::new();
        render(&mut fb, &view, &LAYOUT);
        fb
    }

    /// Middle column of a bit glyph at (x, y); row 1 separates '1' from '0'
    fn bit_at(fb: &Framebuffer, x: i32, y: i32) -> bool {
        fb.pixel(x + 2, y + 1)
    }

    #[test]
    fn test_body_outline() {
        let fb = draw(GateFamily::AndNand, [false; 4]);
        // Back edge
        for y in LAYOUT.body_top..=LAYOUT.body_bottom {
            assert!(fb.pixel(LAYOUT.body_left, y));
        }
        // Flat edges stop where the curve starts
        assert!(fb.pixel(84, LAYOUT.body_top));
        assert!(fb.pixel(84, LAYOUT.body_bottom));
        assert!(!fb.pixel(90, LAYOUT.body_top));
        // Curve tip reaches the right edge on the output rows
        assert!(fb.pixel(97, 26) && fb.pixel(97, 38));
    }

    #[test]
    fn test_input_bits_follow_rows() {
        let bit_x = LAYOUT.body_left - LAYOUT.input_gap - LAYOUT.input_bit_dx;

        let fb = draw(GateFamily::OrNor, [true, false, true, false]);
        assert!(bit_at(&fb, bit_x, 15));
        assert!(!bit_at(&fb, bit_x, 29));
        assert!(bit_at(&fb, bit_x, 43));

        let fb = draw(GateFamily::OrNor, [false, true, false, false]);
        assert!(!bit_at(&fb, bit_x, 15));
        assert!(bit_at(&fb, bit_x, 29));
        assert!(!bit_at(&fb, bit_x, 43));
    }

    #[test]
    fn test_output_bits_follow_outputs() {
        let bit_x = LAYOUT.body_right + LAYOUT.output_bit_dx;

        let fb = draw(GateFamily::AndNand, [true, true, true, false]);
        assert!(bit_at(&fb, bit_x, 24));
        assert!(!bit_at(&fb, bit_x, 36));

        let fb = draw(GateFamily::AndNand, [true, false, true, false]);
        assert!(!bit_at(&fb, bit_x, 24));
        assert!(bit_at(&fb, bit_x, 36));
    }

    #[test]
    fn test_output_bit_clears_label() {
        let (_, second) = output_labels(GateFamily::AndNand);
        let mut fb = Framebuffer::new();
        let end = draw_text(&mut fb, LAYOUT.body_right + LAYOUT.output_label_dx, 0, second, 1);
        assert!(end <= LAYOUT.body_right + LAYOUT.output_bit_dx);
        assert!(LAYOUT.body_right + LAYOUT.output_bit_dx + 5 <= 128);
    }

    #[test]
    fn test_dual_not_shows_two_aligned_legs() {
        let end = LAYOUT.body_left - LAYOUT.input_gap;
        let bit_x = end - LAYOUT.input_bit_dx;

        let fb = draw(GateFamily::DualNot, [false, true, false, false]);
        // Legs on the output rows, none on the standard rows
        assert!(fb.pixel(LAYOUT.input_start, 26) && fb.pixel(end, 38));
        assert!(!fb.pixel(LAYOUT.input_start, 18));
        assert!(!fb.pixel(LAYOUT.input_start, 46));
        // Bits show rows 2 and 3
        assert!(bit_at(&fb, bit_x, 23));
        assert!(!bit_at(&fb, bit_x, 35));
    }

    #[test]
    fn test_labels() {
        assert_eq!(family_labels(GateFamily::XorXnor), ("XOR ", "XNOR"));
        assert_eq!(output_labels(GateFamily::MajMin), ("Y", "/Y"));
        assert_eq!(output_labels(GateFamily::DualNot), ("Y1", "Y2"));
        for family in GateFamily::ALL {
            let (top, bottom) = family_labels(family);
            assert_eq!(top.len(), 4);
            assert_eq!(bottom.len(), 4);
        }
    }

    #[test]
    fn test_families_draw_differently() {
        let frames: [Framebuffer; GateFamily::COUNT] =
            core::array::from_fn(|i| draw(GateFamily::ALL[i], [false; 4]));
        for a in 0..frames.len() {
            for b in a + 1..frames.len() {
                assert_ne!(frames[a], frames[b]);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_render_is_deterministic(
            family in 0..GateFamily::COUNT as u8,
            rows in any::<[bool; 4]>(),
            previous in any::<[bool; 4]>(),
        ) {
            let family = GateFamily::from_u8(family).unwrap();
            let fresh = draw(family, rows);

            // Drawing over an older frame gives the same bytes
            let mut reused = draw(GateFamily::ALL[0], previous);
            let view = GateView::evaluate(
                family,
                TopologyMode::ThreeInputWithDisplay,
                RowState::new(rows[0], rows[1], rows[2], rows[3]),
            );
            render(&mut reused, &view, &LAYOUT);

            prop_assert_eq!(fresh.as_bytes(), reused.as_bytes());
        }
    }
}
