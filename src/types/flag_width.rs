//! This module defines the canonical, type-safe representation of the integer
//! width a flags enumeration is declared with.

use crate::error::FlagsError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The unsigned integer representation underlying a flags enumeration.
///
/// A table is always built for one concrete representation; the declared
/// width is checked against it so a `u16` enumeration cannot be fed through a
/// `u8` table by accident.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FlagWidth {
    UInt8,
    UInt16,
    UInt32,
    UInt64,
}

impl FlagWidth {
    /// Number of bits in the representation.
    pub fn bits(&self) -> u32 {
        match self {
            Self::UInt8 => 8,
            Self::UInt16 => 16,
            Self::UInt32 => 32,
            Self::UInt64 => 64,
        }
    }

    /// Maps a bit count back to a width.
    pub fn from_bits(bits: u32) -> Result<Self, FlagsError> {
        match bits {
            8 => Ok(Self::UInt8),
            16 => Ok(Self::UInt16),
            32 => Ok(Self::UInt32),
            64 => Ok(Self::UInt64),
            other => Err(FlagsError::InvalidConfiguration(format!(
                "No flags representation is {} bits wide",
                other
            ))),
        }
    }
}

impl fmt::Display for FlagWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
