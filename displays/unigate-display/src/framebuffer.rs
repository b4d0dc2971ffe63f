//! Page-packed monochrome framebuffer
//!
//! Layout matches the SSD1306 horizontal addressing mode: eight pages of
//! 128 column bytes, bit 0 of each byte being the top row of its page. The
//! buffer can therefore be streamed to the controller unchanged.

use crate::canvas::Canvas;

/// Width in pixels
pub const WIDTH: usize = 128;

/// Height in pixels
pub const HEIGHT: usize = 64;

/// Rows of 8 pixels
pub const PAGES: usize = HEIGHT / 8;

/// Bytes in one full frame
pub const BUFFER_LEN: usize = WIDTH * PAGES;

/// Off-screen 128x64 pixel store
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    buffer: [u8; BUFFER_LEN],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let lit = self.buffer.iter().map(|b| b.count_ones()).sum::<u32>();
        write!(f, "Framebuffer({} px lit)", lit)
    }
}

impl Framebuffer {
    /// Create a blank framebuffer
    pub const fn new() -> Self {
        Self {
            buffer: [0; BUFFER_LEN],
        }
    }

    /// Raw bytes in transmission order
    pub fn as_bytes(&self) -> &[u8; BUFFER_LEN] {
        &self.buffer
    }

    /// Read back one pixel (`false` when out of range)
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        match Self::locate(x, y) {
            Some((index, mask)) => self.buffer[index] & mask != 0,
            None => false,
        }
    }

    /// Byte index and bit mask of a pixel, if it is on screen
    fn locate(x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some(((y / 8) * WIDTH + x, 1 << (y & 7)))
    }
}

impl Canvas for Framebuffer {
    fn clear(&mut self) {
        self.buffer.fill(0);
    }

    fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((index, mask)) = Self::locate(x, y) {
            if on {
                self.buffer[index] |= mask;
            } else {
                self.buffer[index] &= !mask;
            }
        }
    }
}
