//! Gate engine
//!
//! Families, topology, and the pure evaluation function.

pub mod eval;
pub mod family;
pub mod topology;

pub use eval::{evaluate, Reduction, Rule};
pub use family::GateFamily;
pub use topology::{DisplayPresence, OutputPair, Row, RowState, TopologyMode};

/// Everything the renderers need to know about one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GateView {
    /// Active family
    pub family: GateFamily,
    /// Session topology
    pub mode: TopologyMode,
    /// Sampled rows
    pub rows: RowState,
    /// Evaluated outputs
    pub outputs: OutputPair,
}

impl GateView {
    /// Evaluate the gate and bundle the result with its inputs
    pub fn evaluate(family: GateFamily, mode: TopologyMode, rows: RowState) -> Self {
        Self {
            family,
            mode,
            rows,
            outputs: evaluate(family, mode, &rows),
        }
    }
}
