//! Scanner output types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::provider::Declaration;

/// A declaration that passed the structural filter, plus its content hash.
///
/// Ephemeral: raw declarations are consumed by the resolver and discarded.
#[derive(Debug, Clone, Copy)]
pub struct RawDeclaration<'a> {
    pub decl: &'a Declaration,
    /// Content hash used for incremental change classification.
    pub content_hash: u64,
}

/// Filtered declarations, partitioned by kind.
#[derive(Debug, Default)]
pub struct ScanSet<'a> {
    pub type_like: Vec<RawDeclaration<'a>>,
    pub method_like: Vec<RawDeclaration<'a>>,
    pub stats: ScanStats,
}

/// Counters for one scan pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    pub total: usize,
    pub attributed: usize,
    pub type_like: usize,
    pub method_like: usize,
}

impl fmt::Display for ScanStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ScanStats {{ total={}, attributed={}, type_like={}, method_like={} }}",
            self.total, self.attributed, self.type_like, self.method_like
        )
    }
}
