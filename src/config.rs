// In: src/config.rs

//! The single source of truth for codec configuration.
//!
//! A `CodecConfig` is created once, handed to the table builder, and baked into
//! the immutable `NameTable`. Nothing in it is consulted again per call.

use serde::{Deserialize, Serialize};

use crate::error::FlagsError;
use crate::naming::NamingPolicy;

/// The separator written between names when none is configured.
pub const DEFAULT_SEPARATOR: &str = ", ";

/// Configuration for building a flags table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct CodecConfig {
    /// Text placed between names. An empty separator falls back to `", "`.
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Seed for the xxHash32 name index.
    #[serde(default)]
    pub hash_seed: u32,

    /// Transformation applied to member names before they are written or hashed.
    #[serde(default)]
    pub naming_policy: NamingPolicy,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            hash_seed: 0,
            naming_policy: NamingPolicy::default(),
        }
    }
}

impl CodecConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, FlagsError> {
        serde_json::from_str(json)
            .map_err(|e| FlagsError::InvalidConfiguration(format!("Bad codec config: {}", e)))
    }

    /// The separator as bytes, with the empty-separator fallback applied.
    pub fn separator_bytes(&self) -> &[u8] {
        if self.separator.is_empty() {
            DEFAULT_SEPARATOR.as_bytes()
        } else {
            self.separator.as_bytes()
        }
    }
}

/// Helper for `serde` to default the separator.
fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}
