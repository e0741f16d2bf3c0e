// In: src/error.rs

//! This module defines the single, unified error type for the entire flagtext library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlagsError {
    // =========================================================================
    // === Construction-Time Errors
    // =========================================================================
    /// The enumeration or codec configuration cannot produce a usable table
    /// (width mismatch, too few members, bad names, hash collision).
    #[error("Invalid flags configuration: {0}")]
    InvalidConfiguration(String),

    // =========================================================================
    // === Encode/Decode Errors (Specific to our library's logic)
    // =========================================================================
    /// A value or token has no representation in the table at all.
    #[error("The value '{value}' could not be mapped to any member of '{type_name}'")]
    UnmappedValue { type_name: String, value: String },

    /// Some bits of the value decomposed, but `remainder` is left over after
    /// every entry was tried.
    #[error(
        "The bits {remainder} of value '{value}' could not be mapped to any member of '{type_name}'"
    )]
    UnmappedBitValue {
        type_name: String,
        value: String,
        remainder: String,
    },

    /// A token is longer than the longest known name and was rejected before hashing.
    #[error("The name '{name}' exceeds the longest member name of '{type_name}' ({max} bytes)")]
    NameTooLong {
        type_name: String,
        name: String,
        max: usize,
    },

    /// A separator was split across two input chunks.
    #[error("A separator split across input chunks is not supported while decoding '{type_name}'")]
    ChunkedSeparatorUnsupported { type_name: String },

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// The byte sink rejected the encoded output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),
}

impl From<bytemuck::PodCastError> for FlagsError {
    fn from(err: bytemuck::PodCastError) -> Self {
        FlagsError::InternalError(format!("Flag value cast failed: {}", err))
    }
}
