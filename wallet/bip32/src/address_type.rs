use crate::ChildNumber;
use core::fmt::{self, Display};

/// BIP44 chain selector: external (deposit) or change (internal) addresses.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum AddressType {
    #[default]
    External = 0,
    Change,
}

impl Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::External => f.write_str("External"),
            Self::Change => f.write_str("Change"),
        }
    }
}

impl AddressType {
    /// Select a chain from a raw flag. Only the low bit is significant, so
    /// any other value collapses onto `External` or `Change`.
    pub fn from_flag(flag: u8) -> Self {
        match flag & 1 {
            0 => Self::External,
            _ => Self::Change,
        }
    }

    pub fn index(&self) -> u32 {
        match self {
            Self::External => 0,
            Self::Change => 1,
        }
    }

    /// Non-hardened child number used for this chain.
    pub fn child_number(&self) -> ChildNumber {
        ChildNumber(self.index())
    }
}

impl From<u8> for AddressType {
    fn from(flag: u8) -> Self {
        Self::from_flag(flag)
    }
}
