//! This module defines the traits that tie a flags enumeration to its integer
//! representation.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use bytemuck::Pod;
use num_traits::{PrimInt, Unsigned};

use crate::types::FlagWidth;

/// An unsigned integer that can carry OR-combined flag bits.
pub trait FlagBits:
    PrimInt + Unsigned + Pod + Hash + Debug + Display + Send + Sync + 'static
{
    /// The width this representation corresponds to.
    const WIDTH: FlagWidth;
}

// Implement the trait for every unsigned primitive a flags enum can be declared with.
macro_rules! impl_flag_bits {
    ($T:ty, $W:expr) => {
        impl FlagBits for $T {
            const WIDTH: FlagWidth = $W;
        }
    };
}

impl_flag_bits!(u8, FlagWidth::UInt8);
impl_flag_bits!(u16, FlagWidth::UInt16);
impl_flag_bits!(u32, FlagWidth::UInt32);
impl_flag_bits!(u64, FlagWidth::UInt64);

/// A flags enumeration: a plain-old-data newtype whose bit pattern is its
/// integer representation.
///
/// ```
/// use bytemuck::{Pod, Zeroable};
/// use flagtext::{FlagEnum, FlagWidth};
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
/// #[repr(transparent)]
/// struct Access(u8);
///
/// impl Access {
///     const READ: Self = Self(1);
///     const WRITE: Self = Self(2);
/// }
///
/// impl FlagEnum for Access {
///     type Repr = u8;
///     const WIDTH: FlagWidth = FlagWidth::UInt8;
///     const MEMBERS: &'static [(&'static str, Self)] =
///         &[("Read", Self::READ), ("Write", Self::WRITE)];
/// }
/// ```
pub trait FlagEnum: Pod + Send + Sync + 'static {
    /// The integer the enumeration is reinterpreted as.
    type Repr: FlagBits;

    /// The width the enumeration is declared with. Must match `Repr`.
    const WIDTH: FlagWidth;

    /// Every named member in declaration order, aliases and zero included.
    const MEMBERS: &'static [(&'static str, Self)];

    /// Name used in diagnostics.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}
