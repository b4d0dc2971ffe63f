//! Gate families
//!
//! The selectable logic functions, in the order the mode button cycles
//! through them. The ordinal is what gets persisted.

/// Logic function the gate currently implements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum GateFamily {
    /// Y = AND, /Y = NAND
    AndNand = 0,
    /// Y = OR, /Y = NOR
    OrNor = 1,
    /// Y = XOR (odd parity), /Y = XNOR
    XorXnor = 2,
    /// Y = majority, /Y = minority
    MajMin = 3,
    /// Two independent inverters (row 2 -> Y1, row 3 -> Y2)
    DualNot = 4,
}

impl GateFamily {
    /// Number of families
    pub const COUNT: usize = 5;

    /// All families in cycling order
    pub const ALL: [GateFamily; Self::COUNT] = [
        GateFamily::AndNand,
        GateFamily::OrNor,
        GateFamily::XorXnor,
        GateFamily::MajMin,
        GateFamily::DualNot,
    ];

    /// Ordinal as stored in non-volatile memory
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode a stored ordinal
    ///
    /// Anything at or past [`GateFamily::COUNT`] is not a family; callers
    /// treat that as "nothing stored yet".
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Position in [`GateFamily::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Next family in cycling order, wrapping after the last
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::COUNT]
    }

    /// Parse a family name as written in board configuration files
    ///
    /// Accepts the upper-case names with or without the underscore, e.g.
    /// `"OR_NOR"` or `"ORNOR"`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "AND_NAND" | "ANDNAND" => Some(GateFamily::AndNand),
            "OR_NOR" | "ORNOR" => Some(GateFamily::OrNor),
            "XOR_XNOR" | "XORXNOR" => Some(GateFamily::XorXnor),
            "MAJ_MIN" | "MAJMIN" => Some(GateFamily::MajMin),
            "DUAL_NOT" | "DUALNOT" => Some(GateFamily::DualNot),
            _ => None,
        }
    }

    /// Whether both outputs are inverters rather than a complementary pair
    pub fn is_dual_inverter(self) -> bool {
        matches!(self, GateFamily::DualNot)
    }
}
