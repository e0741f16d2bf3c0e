//! The immutable name table for one flags enumeration.
//!
//! A table is built once from the enumeration's members and then shared,
//! read-only, by every encode and decode call. It holds:
//!
//! - the decomposition entries, non-zero masks sorted descending (stable, so
//!   equal masks keep declaration order);
//! - an exact-match map from a full value to a single name, covering zero and
//!   composite aliases;
//! - the hash index used by the decoder;
//! - the size bounds the encoder and decoder rely on.

use hashbrown::HashMap;

use crate::config::CodecConfig;
use crate::error::FlagsError;
use crate::kernels::hash::HashIndex;
use crate::traits::FlagBits;
use crate::types::FlagWidth;

/// One named, non-zero member used for decomposition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagDefinition<R: FlagBits> {
    pub mask: R,
    pub name: Box<[u8]>,
}

/// Canonical names, exact-match map and hash index of a flags enumeration.
#[derive(Debug, Clone)]
pub struct NameTable<R: FlagBits> {
    type_name: String,
    definitions: Vec<FlagDefinition<R>>,
    exact: HashMap<R, Box<[u8]>>,
    index: HashIndex<R>,
    separator: Box<[u8]>,
    known_bits: R,
    max_name_length: usize,
    max_length: usize,
}

impl<R: FlagBits> NameTable<R> {
    /// Builds the table for an enumeration declared with `width`.
    ///
    /// `members` is every named member in declaration order, aliases and zero
    /// included. Names are rewritten by the configured naming policy first.
    pub fn build(
        type_name: &str,
        width: FlagWidth,
        members: &[(&str, R)],
        config: &CodecConfig,
    ) -> Result<Self, FlagsError> {
        if width != R::WIDTH {
            return Err(FlagsError::InvalidConfiguration(format!(
                "'{}' is declared as {} but the table representation is {}",
                type_name,
                width,
                R::WIDTH
            )));
        }
        if members.len() <= 1 {
            return Err(FlagsError::InvalidConfiguration(format!(
                "Flags enum '{}' must contain more than one member, found {}",
                type_name,
                members.len()
            )));
        }

        let separator: Box<[u8]> = config.separator_bytes().into();
        let mut named: Vec<(Box<[u8]>, R)> = Vec::with_capacity(members.len());
        for &(declared, value) in members {
            let name = config.naming_policy.apply(declared);
            if name.is_empty() {
                return Err(FlagsError::InvalidConfiguration(format!(
                    "Member '{}' of '{}' has an empty name",
                    declared, type_name
                )));
            }
            if contains_separator(name.as_bytes(), &separator) {
                return Err(FlagsError::InvalidConfiguration(format!(
                    "Member name '{}' of '{}' contains the separator '{}'",
                    name,
                    type_name,
                    String::from_utf8_lossy(&separator)
                )));
            }
            named.push((name.into_bytes().into_boxed_slice(), value));
        }

        let index = HashIndex::build(
            config.hash_seed,
            named.iter().map(|(name, value)| (&name[..], *value)),
        )?;

        let mut exact = HashMap::with_capacity(named.len());
        let mut known_bits = R::zero();
        let mut max_name_length = 0;
        for (name, value) in &named {
            exact.entry(*value).or_insert_with(|| name.clone());
            known_bits = known_bits | *value;
            max_name_length = max_name_length.max(name.len());
        }

        let mut definitions: Vec<FlagDefinition<R>> = named
            .into_iter()
            .filter(|(_, value)| *value != R::zero())
            .map(|(name, mask)| FlagDefinition { mask, name })
            .collect();
        // Stable: equal masks keep declaration order.
        definitions.sort_by(|a, b| b.mask.cmp(&a.mask));

        let names_length: usize = definitions.iter().map(|d| d.name.len()).sum();
        let max_length =
            names_length + separator.len() * definitions.len().saturating_sub(1);

        log::debug!(
            "Built flags table for '{}': {} members, {} decomposition entries, max_length {}, max_name_length {}",
            type_name,
            members.len(),
            definitions.len(),
            max_length,
            max_name_length
        );

        Ok(Self {
            type_name: type_name.to_string(),
            definitions,
            exact,
            index,
            separator,
            known_bits,
            max_name_length,
            max_length,
        })
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Decomposition entries, descending by mask.
    pub fn definitions(&self) -> &[FlagDefinition<R>] {
        &self.definitions
    }

    /// The single name for exactly `value`, if one was declared.
    pub fn exact_name(&self, value: R) -> Option<&[u8]> {
        self.exact.get(&value).map(|name| &name[..])
    }

    pub fn index(&self) -> &HashIndex<R> {
        &self.index
    }

    pub fn separator(&self) -> &[u8] {
        &self.separator
    }

    /// OR of every member value.
    pub fn known_bits(&self) -> R {
        self.known_bits
    }

    /// Length in bytes of the longest name.
    pub fn max_name_length(&self) -> usize {
        self.max_name_length
    }

    /// Upper bound on any decomposed output: every entry written once.
    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

/// Position of the first occurrence of `sep` in `haystack`.
pub(crate) fn find_separator(haystack: &[u8], sep: &[u8]) -> Option<usize> {
    match sep {
        [] => None,
        [byte] => haystack.iter().position(|b| b == byte),
        _ => haystack.windows(sep.len()).position(|window| window == sep),
    }
}

fn contains_separator(name: &[u8], sep: &[u8]) -> bool {
    find_separator(name, sep).is_some()
}
