//! Monochrome drawing and the gate diagram for Unigate
//!
//! This crate provides:
//! - `Canvas` trait with the pixel and axis-aligned line primitives
//! - `Framebuffer`, the 128x64 page-packed pixel store sent to the panel
//! - A 5x7 bitmap font with integer scaling
//! - The gate diagram renderer
//!
//! # Architecture
//!
//! Nothing here touches a bus. The drivers crate owns a `Framebuffer`, lets
//! [`diagram::render`] draw into it and then pushes the bytes to the
//! controller. Keeping drawing separate makes every frame testable on the
//! host.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod canvas;
pub mod diagram;
pub mod font;
pub mod framebuffer;

// Re-export key types
pub use canvas::Canvas;
pub use diagram::{render, DiagramLayout};
pub use font::{draw_text, glyph, GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};
pub use framebuffer::{Framebuffer, BUFFER_LEN, HEIGHT, PAGES, WIDTH};
