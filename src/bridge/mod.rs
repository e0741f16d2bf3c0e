// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the typed, user-facing API of the flagtext library. It wraps the
// pure, integer-only `kernels` so callers deal in their own flags types rather
// than raw `u8`/`u16`/`u32`/`u64` bits.
//
// Data Flow (Encoding):
//
//   1. [Facade (FlagsCodec<E>) or stateless encode_flags / serde_flags]
//         |
//         `-> kernels::bitcast::to_repr      E -> E::Repr
//         |
//         `-> kernels::encode::encode_with   bits -> name list, lent to the sink
//
// Data Flow (Decoding):
//
//   1. [Facade or stateless decode_flags / decode_flag_chunks / serde_flags]
//         |
//         `-> kernels::decode::{decode_span, decode_chunks}   bytes -> bits
//         |
//         `-> kernels::bitcast::from_repr    E::Repr -> E
//
// The stateless entry points and the serde adapter fetch their codec from the
// per-type `registry`, which builds each table once with the default config.
// ====================================================================================
pub mod codec;
pub mod registry;
pub mod serde_flags;
pub mod stateless_api;

// --- High-Level Stateful API ---
pub use codec::FlagsCodec;

// --- Stateless API ---
pub use registry::shared_codec;
pub use stateless_api::{decode_flag_chunks, decode_flags, encode_flags};

#[cfg(test)]
mod tests;
