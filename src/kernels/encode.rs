//! This module contains the kernel that turns a flags value into its delimited
//! name list.
//!
//! A value is either named outright (exact match, covering zero and aliases) or
//! greedily decomposed over the table's entries in descending-mask order. The
//! decomposed names are written into a scratch buffer sized for the table's
//! worst case: a stack array when that fits in `MAX_STACK_BYTES`, a pooled
//! buffer otherwise. The finished bytes are lent to a caller-supplied sink
//! while the scratch buffer is still alive, so the success path never
//! allocates.

use crate::buffer_pool::BufferPool;
use crate::error::FlagsError;
use crate::table::NameTable;
use crate::traits::FlagBits;

/// Largest worst-case output that is assembled on the stack.
pub const MAX_STACK_BYTES: usize = 256;

//==================================================================================
// 1. Public API
//==================================================================================

/// Encodes `value` and passes the resulting bytes to `sink`.
///
/// Returns whatever `sink` returns. On failure `sink` is never called and any
/// rented buffer has already been returned to `pool`.
pub fn encode_with<R, T, F>(
    table: &NameTable<R>,
    pool: &BufferPool,
    value: R,
    sink: F,
) -> Result<T, FlagsError>
where
    R: FlagBits,
    F: FnOnce(&[u8]) -> T,
{
    if let Some(name) = table.exact_name(value) {
        return Ok(sink(name));
    }

    if value != R::zero() && (value & table.known_bits()) == R::zero() {
        return Err(unmapped(table, value));
    }

    let max_length = table.max_length();
    if max_length <= MAX_STACK_BYTES {
        let mut scratch = [0u8; MAX_STACK_BYTES];
        let written = decompose(table, value, &mut scratch[..max_length])?;
        Ok(sink(&scratch[..written]))
    } else {
        let mut rented = pool.rent(max_length);
        let written = decompose(table, value, &mut rented)?;
        Ok(sink(&rented[..written]))
    }
}

/// Encodes `value` into a freshly allocated vector.
pub fn encode_to_vec<R: FlagBits>(
    table: &NameTable<R>,
    pool: &BufferPool,
    value: R,
) -> Result<Vec<u8>, FlagsError> {
    encode_with(table, pool, value, <[u8]>::to_vec)
}

//==================================================================================
// 2. Private Core Logic
//==================================================================================

/// Writes the names of the entries that make up `value` into `buf`, highest
/// mask first, and returns the number of bytes written.
fn decompose<R: FlagBits>(table: &NameTable<R>, value: R, buf: &mut [u8]) -> Result<usize, FlagsError> {
    let sep = table.separator();
    let mut remaining = value;
    let mut end = 0;

    for definition in table.definitions() {
        if remaining == R::zero() {
            break;
        }
        let mask = definition.mask;
        if remaining & mask != mask {
            continue;
        }
        if end != 0 {
            end = put(buf, end, sep)?;
        }
        end = put(buf, end, &definition.name)?;
        remaining = remaining & !mask;
    }

    if remaining == R::zero() {
        Ok(end)
    } else if remaining == value {
        Err(unmapped(table, value))
    } else {
        Err(FlagsError::UnmappedBitValue {
            type_name: table.type_name().to_string(),
            value: value.to_string(),
            remainder: remaining.to_string(),
        })
    }
}

/// Copies `bytes` to `buf[at..]`, returning the new end.
fn put(buf: &mut [u8], at: usize, bytes: &[u8]) -> Result<usize, FlagsError> {
    let end = at + bytes.len();
    let slot = buf.get_mut(at..end).ok_or_else(|| {
        FlagsError::InternalError(format!(
            "Encoded output overran its {} byte buffer",
            end
        ))
    })?;
    slot.copy_from_slice(bytes);
    Ok(end)
}

fn unmapped<R: FlagBits>(table: &NameTable<R>, value: R) -> FlagsError {
    FlagsError::UnmappedValue {
        type_name: table.type_name().to_string(),
        value: value.to_string(),
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
