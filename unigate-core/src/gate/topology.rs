//! Input topology and per-cycle signal values

/// Whether an optional display answered the boot-time probe
///
/// Latched once at boot; never re-evaluated during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayPresence {
    /// A display acknowledged at the given 7-bit address
    Detected(u8),
    /// Nobody answered; the bus pins are plain inputs
    Absent,
}

impl DisplayPresence {
    /// Input topology implied by the presence of a display
    pub fn topology(&self) -> TopologyMode {
        match self {
            DisplayPresence::Detected(_) => TopologyMode::ThreeInputWithDisplay,
            DisplayPresence::Absent => TopologyMode::FourInputStandalone,
        }
    }
}

/// How many input rows feed the gate
///
/// Decided once at boot from [`DisplayPresence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TopologyMode {
    /// Rows 1-3 are inputs; the row-4 pins carry the display bus and the
    /// mode button
    ThreeInputWithDisplay,
    /// Rows 1-4 are inputs; there is no mode button
    FourInputStandalone,
}

impl TopologyMode {
    /// Number of rows that feed the combinational families
    pub const fn input_count(self) -> usize {
        match self {
            TopologyMode::ThreeInputWithDisplay => 3,
            TopologyMode::FourInputStandalone => 4,
        }
    }

    /// Whether row 4 is sampled as an input in this mode
    pub const fn uses_row4(self) -> bool {
        matches!(self, TopologyMode::FourInputStandalone)
    }

    /// Whether the mode button is available in this mode
    pub const fn has_mode_button(self) -> bool {
        matches!(self, TopologyMode::ThreeInputWithDisplay)
    }
}

/// Input rows, numbered as printed on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Row {
    /// Row 1 (three pins)
    One = 0,
    /// Row 2 (two pins)
    Two = 1,
    /// Row 3 (two pins)
    Three = 2,
    /// Row 4 (three pins, shared with the display bus)
    Four = 3,
}

/// Logical row values for one cycle
///
/// Row 4 is only meaningful in [`TopologyMode::FourInputStandalone`]; the
/// sampler leaves it `false` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RowState {
    values: [bool; 4],
}

impl RowState {
    /// Build from the four row values in board order
    pub const fn new(in1: bool, in2: bool, in3: bool, in4: bool) -> Self {
        Self {
            values: [in1, in2, in3, in4],
        }
    }

    /// Value of one row
    pub fn get(&self, row: Row) -> bool {
        self.values[row as usize]
    }

    /// Set one row
    pub fn set(&mut self, row: Row, value: bool) {
        self.values[row as usize] = value;
    }

    /// Rows in scope for the given topology (first three or all four)
    pub fn active(&self, mode: TopologyMode) -> &[bool] {
        &self.values[..mode.input_count()]
    }

    /// All four values in board order
    pub fn as_array(&self) -> [bool; 4] {
        self.values
    }
}

/// The two gate outputs
///
/// For complementary families `y_bar == !y`. Under
/// [`GateFamily::DualNot`](super::GateFamily::DualNot) they are two unrelated
/// inverter outputs (Y1 and Y2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputPair {
    /// Primary output (O1 bus)
    pub y: bool,
    /// Complementary / secondary output (O2 bus)
    pub y_bar: bool,
}

impl OutputPair {
    /// Pair where the second output is the complement of the first
    pub const fn complementary(y: bool) -> Self {
        Self { y, y_bar: !y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_decides_topology() {
        assert_eq!(
            DisplayPresence::Detected(0x3C).topology(),
            TopologyMode::ThreeInputWithDisplay
        );
        assert_eq!(
            DisplayPresence::Absent.topology(),
            TopologyMode::FourInputStandalone
        );
    }

    #[test]
    fn test_active_rows_follow_mode() {
        let rows = RowState::new(true, false, true, true);
        assert_eq!(
            rows.active(TopologyMode::ThreeInputWithDisplay),
            &[true, false, true]
        );
        assert_eq!(
            rows.active(TopologyMode::FourInputStandalone),
            &[true, false, true, true]
        );
    }

    #[test]
    fn test_row_accessors() {
        let mut rows = RowState::default();
        rows.set(Row::Three, true);
        assert!(rows.get(Row::Three));
        assert!(!rows.get(Row::One));
        assert_eq!(rows.as_array(), [false, false, true, false]);
    }
}
