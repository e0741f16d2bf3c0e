//! This module defines the core, strongly-typed representations shared by the
//! table builder and the codec kernels.
//!
//! It currently holds the canonical `FlagWidth` enum, which names the unsigned
//! integer representation a flags enumeration is declared with.

pub mod flag_width;

// Re-export the main type(s) for easier access.
pub use flag_width::FlagWidth;
