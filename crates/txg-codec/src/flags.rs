use std::fmt;
use std::ops::BitOr;

/// Serialization flags selecting which optional parts of an entry are
/// written to the wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SerFlags(u8);

impl SerFlags {
    /// Nothing optional.
    pub const NONE: Self = Self(0);
    /// Include witness data.
    pub const WITNESS: Self = Self(1 << 0);
    /// Include the spent output's commitment in spend inputs.
    pub const PREVOUT: Self = Self(1 << 1);
    /// Include reference data verbatim rather than by hash.
    pub const METADATA: Self = Self(1 << 2);
    /// Every optional part.
    pub const ALL: Self = Self(0x07);

    /// Build from raw bits, dropping unknown ones.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// The raw flag bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if every flag in `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for SerFlags {
    fn default() -> Self {
        Self::ALL
    }
}

impl BitOr for SerFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for SerFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SerFlags({:#05b})", self.0)
    }
}
