//! Build script for unigate-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates gate.toml at compile time and turns it into `GATE_CONFIG`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use unigate_core::gate::GateFamily;

/// Keys of the `[timing]` table with their accepted ranges
const TIMING_KEYS: &[(&str, i64, i64)] = &[
    ("debounce_spacing_us", 1, 10_000),
    ("bus_delay_us", 1, 1_000),
    ("warmup_ms", 0, 10_000),
    ("warmup_dwell_ms", 1, 10_000),
    ("warmup_frame_ms", 1, 1_000),
    ("led_latch_guard_us", 50, 100_000),
];

fn main() {
    setup_linker();
    let config = validate_config();
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // cortex-m-rt, RP2040 boot2 and defmt linker scripts
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate gate.toml configuration at compile time
fn validate_config() -> toml::Value {
    // Re-run if gate.toml changes
    println!("cargo:rerun-if-changed=gate.toml");

    let config_path = Path::new("gate.toml");

    // Check if config file exists
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: gate.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a gate.toml configuration file.           ║\n\
            ║  Please create one in the unigate-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    // Read the config file
    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read gate.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in gate.toml                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_gate(&config, &mut errors);
    validate_timing(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid gate configuration                               ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=gate.toml validated successfully");
    config
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only `[gate]` and `[timing]` are known; a typo elsewhere should not be
/// silently ignored
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        return;
    };

    for (name, value) in table {
        match name.as_str() {
            "gate" | "timing" => {
                if !value.is_table() {
                    errors.push(format!("[{}] must be a table", name));
                }
            }
            _ => errors.push(format!("unknown section '{}'", name)),
        }
    }
}

/// Validate the `[gate]` table
fn validate_gate(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(gate) = config.get("gate").and_then(|g| g.as_table()) else {
        return;
    };

    for (key, value) in gate {
        if key != "factory_default" {
            errors.push(format!("[gate] unknown key '{}'", key));
            continue;
        }
        match value.as_str() {
            Some(name) if GateFamily::from_name(name).is_some() => {}
            Some(name) => errors.push(format!("[gate] unknown family '{}'", name)),
            None => errors.push("[gate] factory_default must be a string".to_string()),
        }
    }
}

/// Validate the `[timing]` table
fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(timing) = config.get("timing").and_then(|t| t.as_table()) else {
        return;
    };

    for (key, value) in timing {
        let Some(&(_, min, max)) = TIMING_KEYS.iter().find(|(name, _, _)| name == key) else {
            errors.push(format!("[timing] unknown key '{}'", key));
            continue;
        };
        match value.as_integer() {
            Some(v) if (min..=max).contains(&v) => {}
            Some(_) => errors.push(format!("[timing] {} must be {}-{}", key, min, max)),
            None => errors.push(format!("[timing] {} must be an integer", key)),
        }
    }

    let dwell = timing.get("warmup_dwell_ms").and_then(|v| v.as_integer());
    let window = timing.get("warmup_ms").and_then(|v| v.as_integer());
    if let (Some(dwell), Some(window)) = (dwell, window) {
        if window > 0 && dwell > window {
            errors.push("[timing] warmup_dwell_ms must not exceed warmup_ms".to_string());
        }
    }
}

/// Write `gate_config.rs` into OUT_DIR
///
/// Only keys present in gate.toml are emitted; the rest come from the
/// defaults through struct update syntax.
fn generate_config(config: &toml::Value) {
    let mut gate_fields = String::new();
    if let Some(name) = config
        .get("gate")
        .and_then(|g| g.get("factory_default"))
        .and_then(|v| v.as_str())
    {
        if let Some(family) = GateFamily::from_name(name) {
            gate_fields.push_str(&format!("    factory_default: unigate_core::gate::GateFamily::{:?},\n", family));
        }
    }

    let mut timing_fields = String::new();
    if let Some(timing) = config.get("timing") {
        for (key, _, _) in TIMING_KEYS {
            if let Some(v) = timing.get(*key).and_then(|v| v.as_integer()) {
                timing_fields.push_str(&format!("        {}: {},\n", key, v));
            }
        }
    }

    let source = format!(
        "/// Configuration generated from gate.toml\n\
         pub const GATE_CONFIG: GateConfig = GateConfig {{\n\
         {gate_fields}    \
         timing: TimingConfig {{\n\
         {timing_fields}        \
         ..TimingConfig::DEFAULT\n    \
         }},\n    \
         ..GateConfig::DEFAULT\n\
         }};\n"
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("gate_config.rs"), source).unwrap();
}
