//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in unigate-core for the gate's peripherals:
//!
//! - Software two-wire bus with display probing (bit-banged I2C)
//! - SSD1306 OLED controller and the gate diagram panel
//! - Addressable LED status strip with latch timing

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod display;
pub mod led;
