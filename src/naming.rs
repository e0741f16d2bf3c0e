//! Naming policies applied to member names when a table is built.
//!
//! Declared names are usually PascalCase (`ReadWrite`). A policy rewrites them
//! once, up front, so the encoder writes and the decoder hashes the rewritten form.

use serde::{Deserialize, Serialize};

/// How declared member names are rewritten before use.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NamingPolicy {
    /// Names are used exactly as declared.
    #[default]
    AsDeclared,
    /// `ReadWrite` -> `readWrite`, `URLPath` -> `urlPath`.
    CamelCase,
    /// `ReadWrite` -> `read_write`.
    SnakeCaseLower,
    /// `ReadWrite` -> `READ_WRITE`.
    SnakeCaseUpper,
    /// `ReadWrite` -> `read-write`.
    KebabCaseLower,
    /// `ReadWrite` -> `READ-WRITE`.
    KebabCaseUpper,
}

impl NamingPolicy {
    /// Rewrites one declared name.
    pub fn apply(&self, name: &str) -> String {
        match self {
            Self::AsDeclared => name.to_string(),
            Self::CamelCase => to_camel_case(name),
            Self::SnakeCaseLower => join_words(name, '_', false),
            Self::SnakeCaseUpper => join_words(name, '_', true),
            Self::KebabCaseLower => join_words(name, '-', false),
            Self::KebabCaseUpper => join_words(name, '-', true),
        }
    }
}

/// Lowercases the leading run of uppercase characters. When that run is
/// followed by a lowercase letter, its last character starts the next word
/// and keeps its case.
fn to_camel_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len());
    let mut lowering = true;
    for (i, &c) in chars.iter().enumerate() {
        if lowering && c.is_uppercase() {
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if i > 0 && next_is_lower {
                lowering = false;
                out.push(c);
            } else {
                out.extend(c.to_lowercase());
            }
        } else {
            lowering = false;
            out.push(c);
        }
    }
    out
}

/// Splits a name into words and joins them with `sep`.
fn join_words(name: &str, sep: char, upper: bool) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, word) in split_words(name).into_iter().enumerate() {
        if i > 0 {
            out.push(sep);
        }
        for c in word.chars() {
            if upper {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
        }
    }
    out
}

/// Word boundaries: `_`, `-` and whitespace; lower/digit followed by upper;
/// the last upper of an acronym followed by a lower (`HTTPServer` -> `HTTP`, `Server`).
fn split_words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}
