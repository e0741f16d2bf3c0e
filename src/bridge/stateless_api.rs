// In: src/bridge/stateless_api.rs

//! Free functions over the shared per-type codecs, for callers that do not
//! want to hold a `FlagsCodec` themselves.

use crate::bridge::registry::shared_codec;
use crate::error::FlagsError;
use crate::traits::FlagEnum;

/// Encodes `value` with the default configuration.
pub fn encode_flags<E: FlagEnum>(value: E) -> Result<Vec<u8>, FlagsError> {
    shared_codec::<E>()?.encode_to_vec(value)
}

/// Decodes a complete name list with the default configuration.
pub fn decode_flags<E: FlagEnum>(bytes: &[u8]) -> Result<E, FlagsError> {
    shared_codec::<E>()?.decode(bytes)
}

/// Decodes a chunked name list with the default configuration.
pub fn decode_flag_chunks<E: FlagEnum>(chunks: &[&[u8]]) -> Result<E, FlagsError> {
    shared_codec::<E>()?.decode_chunks(chunks)
}
