//! Two-wire bus drivers

pub mod bitbang;

pub use bitbang::{BitBangI2c, BusError, Probe, DISPLAY_ADDRESSES};
