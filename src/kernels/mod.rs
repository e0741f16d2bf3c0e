//! This module collects the pure, stateless kernels of the flags codec.
//!
//! Every kernel takes an immutable `NameTable` and per-call input, and keeps all
//! of its working state on the call's own stack (or in a pooled buffer it
//! returns before exiting).

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Enum value <-> integer reinterpretation.
pub mod bitcast;

/// xxHash32 name index.
pub mod hash;

/// Value -> delimited name list.
pub mod encode;

/// Delimited name list (contiguous or chunked) -> value.
pub mod decode;
