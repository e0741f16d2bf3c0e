//! This module contains the single conversion between a flags enumeration value
//! and its integer representation.
//!
//! Both sides are `Pod`, so the conversion is a zero-copy reinterpretation of the
//! same bits, checked by `bytemuck` rather than an ad hoc `as` cast. It is panic-free.

use crate::error::FlagsError;
use crate::traits::FlagEnum;

//==================================================================================
// 1. Layout Validation
//==================================================================================

/// Checks once, at codec construction, that `E` and `E::Repr` have the same size.
pub fn check_layout<E: FlagEnum>() -> Result<(), FlagsError> {
    let enum_size = std::mem::size_of::<E>();
    let repr_size = std::mem::size_of::<E::Repr>();
    if enum_size != repr_size {
        return Err(FlagsError::InvalidConfiguration(format!(
            "Bit-cast size mismatch: '{}' is {} bytes but its representation {} is {} bytes",
            E::type_name(),
            enum_size,
            std::any::type_name::<E::Repr>(),
            repr_size
        )));
    }
    Ok(())
}

//==================================================================================
// 2. Public API
//==================================================================================

/// Reinterprets an enumeration value as its integer bits.
pub fn to_repr<E: FlagEnum>(value: E) -> Result<E::Repr, FlagsError> {
    Ok(bytemuck::try_cast::<E, E::Repr>(value)?)
}

/// Reinterprets integer bits as an enumeration value.
pub fn from_repr<E: FlagEnum>(bits: E::Repr) -> Result<E, FlagsError> {
    Ok(bytemuck::try_cast::<E::Repr, E>(bits)?)
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
