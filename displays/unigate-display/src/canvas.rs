//! Drawing surface trait
//!
//! Defines the primitives the font and diagram renderers draw with.

/// Monochrome drawing surface
///
/// Coordinates are signed so callers may compute positions that fall off
/// the surface; such pixels are silently dropped by the implementation.
pub trait Canvas {
    /// Turn every pixel off
    fn clear(&mut self);

    /// Set or clear one pixel; out-of-range coordinates are a no-op
    fn set_pixel(&mut self, x: i32, y: i32, on: bool);

    /// Draw a horizontal line from `x0` to `x1` inclusive
    ///
    /// Endpoints may be given in either order.
    fn hline(&mut self, x0: i32, x1: i32, y: i32, on: bool) {
        let (from, to) = if x1 < x0 { (x1, x0) } else { (x0, x1) };
        for x in from..=to {
            self.set_pixel(x, y, on);
        }
    }

    /// Draw a vertical line from `y0` to `y1` inclusive
    ///
    /// Endpoints may be given in either order.
    fn vline(&mut self, x: i32, y0: i32, y1: i32, on: bool) {
        let (from, to) = if y1 < y0 { (y1, y0) } else { (y0, y1) };
        for y in from..=to {
            self.set_pixel(x, y, on);
        }
    }
}
