//! Boot-session context

use crate::gate::{DisplayPresence, TopologyMode};

/// Facts latched at boot and immutable afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Session {
    presence: DisplayPresence,
    mode: TopologyMode,
}

impl Session {
    /// Start a session from the probe result
    pub fn new(presence: DisplayPresence) -> Self {
        Self {
            presence,
            mode: presence.topology(),
        }
    }

    /// Probe result
    pub fn presence(&self) -> DisplayPresence {
        self.presence
    }

    /// Input topology for this session
    pub fn mode(&self) -> TopologyMode {
        self.mode
    }
}
