//! This file is the root of the `flagtext` Rust crate.
//!
//! `flagtext` converts bit-flag enumeration values to a delimited list of member
//! names (`"Write, Read"`) and back. Names are resolved through an xxHash32 index
//! rather than string comparison, encoding assembles output in a stack or pooled
//! scratch buffer, and decoding accepts either one contiguous span or a
//! sequence of chunks.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring the top-level modules (`table`, `kernels`, `bridge`, ...).
//! 2.  Re-exporting the public API.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod bridge;
pub mod buffer_pool;
pub mod config;
pub mod kernels;
pub mod naming;
pub mod observability;
pub mod table;

mod error;
mod traits;
mod types;

//==================================================================================
// 2. Public API
//==================================================================================
pub use bridge::{
    decode_flag_chunks, decode_flags, encode_flags, serde_flags, shared_codec, FlagsCodec,
};
pub use buffer_pool::BufferPool;
pub use config::CodecConfig;
pub use error::FlagsError;
pub use naming::NamingPolicy;
pub use table::{FlagDefinition, NameTable};
pub use traits::{FlagBits, FlagEnum};
pub use types::FlagWidth;
