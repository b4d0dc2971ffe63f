//! Build-time gate configuration
//!
//! `build.rs` validates `gate.toml` and generates [`GATE_CONFIG`]; keys left
//! out of the file keep the defaults from `unigate_core::config`.

use unigate_core::config::{GateConfig, TimingConfig};

include!(concat!(env!("OUT_DIR"), "/gate_config.rs"));
