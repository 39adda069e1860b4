//! Decision keys via xxh3.
//!
//! A decision key is the stable hash of all semantically relevant inputs to a
//! stage. Two resolutions of textually identical input must produce equal
//! keys regardless of process, thread, or declaration order, so every field
//! is written length-prefixed through `KeyWriter` rather than hashed from an
//! in-memory layout.

use std::fmt;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::Xxh3;

/// Stable identity for incremental comparison and equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DecisionKey(pub u64);

impl fmt::Display for DecisionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Streaming field writer over an xxh3 hasher.
///
/// Strings are length-prefixed so adjacent fields cannot alias
/// (`("ab", "c")` vs `("a", "bc")`).
pub struct KeyWriter {
    hasher: Xxh3,
}

impl KeyWriter {
    pub fn new() -> Self {
        Self {
            hasher: Xxh3::new(),
        }
    }

    /// Write a discriminant tag separating unrelated field groups.
    pub fn tag(&mut self, tag: &'static str) -> &mut Self {
        self.str_field(tag)
    }

    pub fn str_field(&mut self, value: &str) -> &mut Self {
        self.hasher.update(&(value.len() as u64).to_le_bytes());
        self.hasher.update(value.as_bytes());
        self
    }

    pub fn opt_str_field(&mut self, value: Option<&str>) -> &mut Self {
        match value {
            Some(v) => {
                self.bool_field(true);
                self.str_field(v)
            }
            None => self.bool_field(false),
        }
    }

    pub fn bool_field(&mut self, value: bool) -> &mut Self {
        self.hasher.update(&[value as u8]);
        self
    }

    pub fn u64_field(&mut self, value: u64) -> &mut Self {
        self.hasher.update(&value.to_le_bytes());
        self
    }

    pub fn finish(&self) -> DecisionKey {
        DecisionKey(self.hasher.digest())
    }
}

impl Default for KeyWriter {
    fn default() -> Self {
        Self::new()
    }
}
