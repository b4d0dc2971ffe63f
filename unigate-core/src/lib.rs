//! Board-agnostic core logic for the Unigate programmable logic gate
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Gate families and the pure evaluation function
//! - Debounced input sampling
//! - Family selection state machine with persistence
//! - Status LED colour mapping and the boot warm-up sweep
//! - Output buses and the per-cycle controller
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod gate;
pub mod outputs;
pub mod sampler;
pub mod state;
pub mod status;
pub mod traits;
