// In: src/bridge/codec.rs

//! The typed facade over the kernels: one `FlagsCodec<E>` per flags enumeration.

use std::io::Write;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::buffer_pool::BufferPool;
use crate::config::CodecConfig;
use crate::error::FlagsError;
use crate::kernels::{bitcast, decode, encode};
use crate::table::NameTable;
use crate::traits::FlagEnum;

/// Encodes and decodes values of the flags enumeration `E`.
///
/// The table is built once in the constructor and shared through an `Arc`, so
/// cloning a codec is cheap and every clone can be used from any thread.
pub struct FlagsCodec<E: FlagEnum> {
    table: Arc<NameTable<E::Repr>>,
    pool: Arc<BufferPool>,
    _enum: PhantomData<fn() -> E>,
}

impl<E: FlagEnum> Clone for FlagsCodec<E> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            pool: Arc::clone(&self.pool),
            _enum: PhantomData,
        }
    }
}

impl<E: FlagEnum> std::fmt::Debug for FlagsCodec<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlagsCodec")
            .field("type_name", &self.table.type_name())
            .field("max_length", &self.table.max_length())
            .finish()
    }
}

impl<E: FlagEnum> FlagsCodec<E> {
    /// Builds the codec using the process-wide buffer pool.
    pub fn new(config: &CodecConfig) -> Result<Self, FlagsError> {
        Self::with_pool(config, BufferPool::shared())
    }

    /// Builds the codec renting large scratch buffers from `pool`.
    pub fn with_pool(config: &CodecConfig, pool: Arc<BufferPool>) -> Result<Self, FlagsError> {
        bitcast::check_layout::<E>()?;
        let members = E::MEMBERS
            .iter()
            .map(|&(name, value)| Ok((name, bitcast::to_repr(value)?)))
            .collect::<Result<Vec<_>, FlagsError>>()?;
        let table = NameTable::build(E::type_name(), E::WIDTH, &members, config)?;
        Ok(Self {
            table: Arc::new(table),
            pool,
            _enum: PhantomData,
        })
    }

    pub fn table(&self) -> &NameTable<E::Repr> {
        &self.table
    }

    /// Encodes `value` and lends the bytes to `sink` without allocating.
    pub fn encode_with<T, F>(&self, value: E, sink: F) -> Result<T, FlagsError>
    where
        F: FnOnce(&[u8]) -> T,
    {
        let bits = bitcast::to_repr(value)?;
        encode::encode_with(&self.table, &self.pool, bits, sink)
    }

    /// Encodes `value` straight into a writer.
    pub fn encode_to<W: Write>(&self, value: E, writer: &mut W) -> Result<(), FlagsError> {
        self.encode_with(value, |bytes| writer.write_all(bytes))??;
        Ok(())
    }

    pub fn encode_to_vec(&self, value: E) -> Result<Vec<u8>, FlagsError> {
        self.encode_with(value, <[u8]>::to_vec)
    }

    pub fn encode_to_string(&self, value: E) -> Result<String, FlagsError> {
        let bytes = self.encode_to_vec(value)?;
        // Names come from `&str` and the separator from a `String`.
        String::from_utf8(bytes).map_err(|e| FlagsError::InternalError(e.to_string()))
    }

    /// Decodes a complete name list.
    pub fn decode(&self, bytes: &[u8]) -> Result<E, FlagsError> {
        let bits = decode::decode_span(&self.table, bytes)?;
        bitcast::from_repr(bits)
    }

    /// Decodes a name list delivered as several chunks.
    pub fn decode_chunks(&self, chunks: &[&[u8]]) -> Result<E, FlagsError> {
        let bits = decode::decode_chunks(&self.table, chunks)?;
        bitcast::from_repr(bits)
    }
}
