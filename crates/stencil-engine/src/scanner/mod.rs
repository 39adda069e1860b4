//! Scanner subsystem — structural attribute filtering and kind partitioning.
//!
//! The scanner is the entry point to the entire pipeline. It is a pure
//! syntactic test: keep declarations that carry at least one attribute list,
//! partitioned into type-like and method-like sets. No semantic analysis
//! happens here, so no failure is possible and re-running on every edit is
//! cheap — this filter is what makes incremental re-analysis tractable.

pub mod types;

pub use types::{RawDeclaration, ScanSet, ScanStats};

use crate::provider::Declaration;

/// Filter the full declaration set down to attributed declarations.
pub fn scan(declarations: &[Declaration]) -> ScanSet<'_> {
    let mut set = ScanSet::default();
    set.stats.total = declarations.len();

    for decl in declarations {
        if !decl.has_any_attribute() {
            continue;
        }
        set.stats.attributed += 1;
        let raw = RawDeclaration {
            decl,
            content_hash: decl.content_hash(),
        };
        if decl.kind.is_type_like() {
            set.type_like.push(raw);
        } else {
            set.method_like.push(raw);
        }
    }

    set.stats.type_like = set.type_like.len();
    set.stats.method_like = set.method_like.len();
    set
}
