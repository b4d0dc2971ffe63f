//! Gate evaluation
//!
//! Stateless mapping from row values, family and topology to the output pair.
//! Each family is described by a [`Rule`] in a table indexed by the family
//! ordinal, so the inverter family's asymmetry is data rather than a special
//! case hanging off the complementary path.

use super::family::GateFamily;
use super::topology::{OutputPair, Row, RowState, TopologyMode};

/// Reduction of all in-scope rows to one bit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reduction {
    /// True iff every row is true
    All,
    /// True iff any row is true
    Any,
    /// True iff an odd number of rows are true (n-ary XOR)
    OddParity,
    /// True iff at least `(n + 2) / 2` rows are true: 2-of-3, 3-of-4
    Majority,
}

impl Reduction {
    /// Apply the reduction to the in-scope row values
    pub fn apply(self, rows: &[bool]) -> bool {
        let high = rows.iter().filter(|&&r| r).count();
        match self {
            Reduction::All => high == rows.len(),
            Reduction::Any => high > 0,
            Reduction::OddParity => high % 2 == 1,
            Reduction::Majority => high >= majority_threshold(rows.len()),
        }
    }
}

/// Smallest count that is a strict majority of `n` inputs, i.e. ceil((n+1)/2)
pub const fn majority_threshold(n: usize) -> usize {
    (n + 2) / 2
}

/// How a family derives its two outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rule {
    /// `Y = reduction(rows)`, `/Y = !Y`
    Complementary(Reduction),
    /// Two unrelated inverters: `Y1 = !y`, `Y2 = !y_bar`
    DualInverter {
        /// Row inverted onto the first output
        y: Row,
        /// Row inverted onto the second output
        y_bar: Row,
    },
}

/// Rule table, indexed by [`GateFamily::index`]
const RULES: [Rule; GateFamily::COUNT] = [
    Rule::Complementary(Reduction::All),
    Rule::Complementary(Reduction::Any),
    Rule::Complementary(Reduction::OddParity),
    Rule::Complementary(Reduction::Majority),
    Rule::DualInverter {
        y: Row::Two,
        y_bar: Row::Three,
    },
];

/// Look up the rule for a family
pub fn rule(family: GateFamily) -> Rule {
    RULES[family.index()]
}

/// Evaluate the gate for one cycle
pub fn evaluate(family: GateFamily, mode: TopologyMode, rows: &RowState) -> OutputPair {
    match rule(family) {
        Rule::Complementary(reduction) => {
            OutputPair::complementary(reduction.apply(rows.active(mode)))
        }
        Rule::DualInverter { y, y_bar } => OutputPair {
            y: !rows.get(y),
            y_bar: !rows.get(y_bar),
        },
    }
}
