//! This module contains the kernel that parses a delimited name list back into
//! a flags value.
//!
//! Tokens are never compared as strings: each one is length-checked against the
//! longest known name, hashed, and resolved through the table's hash index. Text
//! is only materialised when building an error.
//!
//! Input arrives either as one contiguous span or as a sequence of chunks (data
//! that was fragmented by the transport). The chunked path hashes tokens
//! incrementally, so a name split across chunks needs no copy. A separator that
//! is itself split across a chunk boundary is rejected.

use crate::error::FlagsError;
use crate::kernels::hash::NameHasher;
use crate::table::{find_separator, NameTable};
use crate::traits::FlagBits;

//==================================================================================
// 1. Public API
//==================================================================================

/// Decodes a complete name list held in one span.
///
/// An empty span decodes to zero, the inverse of encoding zero when the
/// enumeration has no zero-valued member.
pub fn decode_span<R: FlagBits>(table: &NameTable<R>, span: &[u8]) -> Result<R, FlagsError> {
    if span.is_empty() {
        return Ok(R::zero());
    }

    let sep = table.separator();
    let mut value = R::zero();
    let mut rest = span;
    loop {
        match find_separator(rest, sep) {
            Some(at) => {
                value = value | resolve_token(table, &rest[..at])?;
                rest = &rest[at + sep.len()..];
            }
            None => return Ok(value | resolve_token(table, rest)?),
        }
    }
}

/// Decodes a name list whose bytes are the concatenation of `chunks`.
pub fn decode_chunks<R: FlagBits>(table: &NameTable<R>, chunks: &[&[u8]]) -> Result<R, FlagsError> {
    match chunks {
        [] => decode_span(table, &[]),
        [single] => decode_span(table, single),
        _ => ChunkDecoder::new(table, chunks).run(),
    }
}

//==================================================================================
// 2. Contiguous Path
//==================================================================================

fn resolve_token<R: FlagBits>(table: &NameTable<R>, token: &[u8]) -> Result<R, FlagsError> {
    if token.len() > table.max_name_length() {
        return Err(name_too_long(table, token));
    }
    table
        .index()
        .get(token)
        .ok_or_else(|| unmapped(table, token))
}

//==================================================================================
// 3. Chunked Path
//==================================================================================

/// Per-call state for decoding chunked input.
struct ChunkDecoder<'t, 'c, R: FlagBits> {
    table: &'t NameTable<R>,
    chunks: &'c [&'c [u8]],
    hasher: NameHasher,
    value: R,
    /// Length of a separator prefix that ended the previous chunk and has not
    /// been hashed yet.
    held: usize,
}

impl<'t, 'c, R: FlagBits> ChunkDecoder<'t, 'c, R> {
    fn new(table: &'t NameTable<R>, chunks: &'c [&'c [u8]]) -> Self {
        Self {
            table,
            chunks,
            hasher: table.index().hasher(),
            value: R::zero(),
            held: 0,
        }
    }

    fn run(mut self) -> Result<R, FlagsError> {
        let (table, chunks) = (self.table, self.chunks);
        if chunks.iter().all(|chunk| chunk.is_empty()) {
            return Ok(R::zero());
        }

        let sep = table.separator();
        let last = chunks.len() - 1;
        // Chunk that ended with the start of the pending separator prefix.
        let mut held_since = 0;
        for (i, &chunk) in chunks.iter().enumerate() {
            let mut rest = chunk;

            if self.held > 0 {
                let held = self.held;
                let need = &sep[held..];
                let take = need.len().min(rest.len());
                if rest[..take] == need[..take] {
                    if take == need.len() {
                        log::debug!(
                            "Separator split across chunks {} to {} while decoding '{}'",
                            held_since,
                            i,
                            table.type_name()
                        );
                        return Err(FlagsError::ChunkedSeparatorUnsupported {
                            type_name: table.type_name().to_string(),
                        });
                    }
                    // Empty or too short to decide: keep matching in the next chunk.
                    self.held = held + take;
                    if i == last {
                        self.held = 0;
                        self.feed(&sep[..held + take])?;
                    }
                    continue;
                }
                // Not a separator after all: those bytes belong to the name.
                self.held = 0;
                self.feed(&sep[..held])?;
            }

            while let Some(at) = find_separator(rest, sep) {
                self.feed(&rest[..at])?;
                self.finish_token()?;
                rest = &rest[at + sep.len()..];
            }

            if i == last {
                self.feed(rest)?;
            } else {
                let held = trailing_separator_prefix(rest, sep);
                self.feed(&rest[..rest.len() - held])?;
                self.held = held;
                held_since = i;
            }
        }

        self.finish_token()?;
        Ok(self.value)
    }

    /// Hashes the next piece of the current token, failing once it is longer
    /// than any known name.
    fn feed(&mut self, piece: &[u8]) -> Result<(), FlagsError> {
        if self.hasher.len() + piece.len() > self.table.max_name_length() {
            return Err(name_too_long(self.table, &self.whole_input()));
        }
        self.hasher.update(piece);
        Ok(())
    }

    fn finish_token(&mut self) -> Result<(), FlagsError> {
        let mask = self
            .table
            .index()
            .get_hash(self.hasher.digest())
            .ok_or_else(|| unmapped(self.table, &self.whole_input()))?;
        self.value = self.value | mask;
        self.hasher.reset();
        Ok(())
    }

    /// The full input, for diagnostics only.
    fn whole_input(&self) -> Vec<u8> {
        self.chunks.concat()
    }
}

/// Length of the longest proper, non-empty prefix of `sep` that `chunk` ends with.
fn trailing_separator_prefix(chunk: &[u8], sep: &[u8]) -> usize {
    (1..sep.len())
        .rev()
        .find(|&len| chunk.ends_with(&sep[..len]))
        .unwrap_or(0)
}

//==================================================================================
// 4. Errors
//==================================================================================

fn name_too_long<R: FlagBits>(table: &NameTable<R>, name: &[u8]) -> FlagsError {
    FlagsError::NameTooLong {
        type_name: table.type_name().to_string(),
        name: String::from_utf8_lossy(name).into_owned(),
        max: table.max_name_length(),
    }
}

fn unmapped<R: FlagBits>(table: &NameTable<R>, name: &[u8]) -> FlagsError {
    log::debug!(
        "No member of '{}' is named '{}'",
        table.type_name(),
        String::from_utf8_lossy(name)
    );
    FlagsError::UnmappedValue {
        type_name: table.type_name().to_string(),
        value: String::from_utf8_lossy(name).into_owned(),
    }
}

//==================================================================================
// 5. Unit Tests
//==================================================================================
