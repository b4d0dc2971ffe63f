//! Status LED drivers

pub mod strip;

pub use strip::LedStrip;
