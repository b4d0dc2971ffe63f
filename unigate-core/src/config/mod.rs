//! Configuration types
//!
//! Compile-time settings of the gate. Boards embed one [`GateConfig`]
//! (the firmware generates it from `gate.toml` at build time); the only
//! runtime setting is the persisted family byte.

use unigate_hal::StorageKey;

use crate::gate::GateFamily;

/// Timing constants
///
/// All durations are blocking waits on the single thread of control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Spacing between the three debounce samples of one pin (µs)
    pub debounce_spacing_us: u32,
    /// Half-period delay of the software bus (µs); 8 µs is roughly 100 kHz
    pub bus_delay_us: u32,
    /// Length of the boot warm-up animation (ms)
    pub warmup_ms: u32,
    /// How long each family colour is shown during warm-up (ms)
    pub warmup_dwell_ms: u32,
    /// Pause between warm-up frames (ms)
    pub warmup_frame_ms: u32,
    /// Minimum interval between two LED chain flushes (µs)
    pub led_latch_guard_us: u32,
}

impl TimingConfig {
    /// Defaults tuned for 100 kΩ input pull-downs and common SSD1306 modules
    pub const DEFAULT: Self = Self {
        debounce_spacing_us: 80,
        bus_delay_us: 8,
        warmup_ms: 1_000,
        warmup_dwell_ms: 200,
        warmup_frame_ms: 10,
        led_latch_guard_us: 300,
    };
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Complete gate configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GateConfig {
    /// Family used when storage holds no valid family (first boot)
    pub factory_default: GateFamily,
    /// Where the selected family is persisted
    pub family_key: StorageKey,
    /// Timing constants
    pub timing: TimingConfig,
}

impl GateConfig {
    /// Shipping configuration
    pub const DEFAULT: Self = Self {
        factory_default: GateFamily::OrNor,
        family_key: StorageKey::GateFamily,
        timing: TimingConfig::DEFAULT,
    };
}

impl Default for GateConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
