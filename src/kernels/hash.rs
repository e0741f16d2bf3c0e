//! This module contains the hash index that resolves a name's UTF-8 bytes to its
//! bitmask without comparing strings.
//!
//! Names are hashed with xxHash32 under the table's seed. The index is built once
//! and only read afterwards. Two different masks landing on the same hash would
//! make decoding silently pick one of them, so that is rejected at build time.

use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use xxhash_rust::xxh32::{xxh32, Xxh32};

use crate::error::FlagsError;
use crate::traits::FlagBits;

/// One-shot hash of a complete name.
pub fn hash_name(name: &[u8], seed: u32) -> u32 {
    xxh32(name, seed)
}

/// Streaming hasher for a name that arrives in several pieces.
///
/// Feeding the pieces of a name in order yields the same value as
/// [`hash_name`] over the concatenation.
#[derive(Clone)]
pub struct NameHasher {
    inner: Xxh32,
    seed: u32,
    len: usize,
}

impl NameHasher {
    pub fn new(seed: u32) -> Self {
        Self {
            inner: Xxh32::new(seed),
            seed,
            len: 0,
        }
    }

    /// Appends the next piece of the name.
    pub fn update(&mut self, piece: &[u8]) {
        self.inner.update(piece);
        self.len += piece.len();
    }

    /// Bytes appended since the last reset.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Hash of everything appended so far.
    pub fn digest(&self) -> u32 {
        self.inner.digest()
    }

    /// Starts over for the next name, keeping the seed.
    pub fn reset(&mut self) {
        self.inner.reset(self.seed);
        self.len = 0;
    }
}

/// Maps `hash32(name)` to the mask of the member with that name.
#[derive(Debug, Clone)]
pub struct HashIndex<R: FlagBits> {
    seed: u32,
    masks: HashMap<u32, R>,
}

impl<R: FlagBits> HashIndex<R> {
    /// Hashes every `(name, mask)` pair. Fails on a hash shared by different masks.
    pub fn build<'a, I>(seed: u32, names: I) -> Result<Self, FlagsError>
    where
        I: IntoIterator<Item = (&'a [u8], R)>,
    {
        let names = names.into_iter();
        let mut index = Self {
            seed,
            masks: HashMap::with_capacity(names.size_hint().0),
        };
        for (name, mask) in names {
            index.insert_hashed(hash_name(name, seed), mask, name)?;
        }
        Ok(index)
    }

    pub(crate) fn insert_hashed(&mut self, hash: u32, mask: R, name: &[u8]) -> Result<(), FlagsError> {
        match self.masks.entry(hash) {
            Entry::Vacant(slot) => {
                slot.insert(mask);
                Ok(())
            }
            Entry::Occupied(slot) if *slot.get() == mask => Ok(()),
            Entry::Occupied(slot) => Err(FlagsError::InvalidConfiguration(format!(
                "Name '{}' (mask {}) hashes to {:#010x}, already taken by mask {} under seed {}",
                String::from_utf8_lossy(name),
                mask,
                hash,
                slot.get(),
                self.seed
            ))),
        }
    }

    /// Resolves a complete name.
    pub fn get(&self, name: &[u8]) -> Option<R> {
        self.get_hash(hash_name(name, self.seed))
    }

    /// Resolves a precomputed hash, e.g. from a [`NameHasher`].
    pub fn get_hash(&self, hash: u32) -> Option<R> {
        self.masks.get(&hash).copied()
    }

    pub fn hasher(&self) -> NameHasher {
        NameHasher::new(self.seed)
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }
}
