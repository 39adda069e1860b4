//! Incremental cache — explicitly owned, pass-scoped memoization.
//!
//! The cache is a plain field of the driver, never a process-wide global:
//! hosts that want isolated pipelines own isolated caches. Entries are keyed
//! by `(variant id, qualified name)` and guarded by the hash of the inputs
//! that produced them; an entry whose guard no longer matches is recomputed,
//! everything else is replayed.

use std::sync::Arc;

use stencil_core::types::collections::FxHashMap;
use stencil_core::types::QualifiedName;
use stencil_core::Diagnostic;

use crate::crossref::CrossRefTable;
use crate::emit::EmissionUnit;
use crate::resolver::ResolvedMetadata;

/// Memoized resolution of one declaration under one variant.
#[derive(Debug, Clone)]
pub struct CachedResolution {
    /// Content hash of the declaration that produced this entry.
    pub content_hash: u64,
    pub meta: Option<Arc<ResolvedMetadata>>,
    /// Resolution diagnostics, replayed on every pass that reuses the entry.
    pub diagnostics: Vec<Diagnostic>,
}

/// Memoized join result for one variant.
#[derive(Debug, Clone)]
pub struct CachedJoin {
    /// Hash over both complete input sets. The join re-runs when either
    /// side changes, even if no anchor itself changed.
    pub signature: u64,
    pub table: CrossRefTable,
    pub diagnostics: Vec<Diagnostic>,
}

/// Memoized emission for one root.
#[derive(Debug, Clone)]
pub struct CachedEmission {
    /// Hash over the root's decision key, its correlated satellites'
    /// decision keys, and the emit plan.
    pub inputs_key: u64,
    /// `None` records "nothing to emit" so empty roots are cached too.
    pub unit: Option<EmissionUnit>,
}

type RootKey = (&'static str, QualifiedName);

/// Per-stage memo tables for one driver.
#[derive(Debug, Default)]
pub struct IncrementalCache {
    resolutions: FxHashMap<RootKey, CachedResolution>,
    joins: FxHashMap<&'static str, CachedJoin>,
    emissions: FxHashMap<RootKey, CachedEmission>,
}

impl IncrementalCache {
    pub fn resolution(&self, variant: &'static str, id: &QualifiedName) -> Option<&CachedResolution> {
        self.resolutions.get(&(variant, id.clone()))
    }

    pub fn insert_resolution(
        &mut self,
        variant: &'static str,
        id: QualifiedName,
        entry: CachedResolution,
    ) {
        self.resolutions.insert((variant, id), entry);
    }

    pub fn join(&self, variant: &'static str) -> Option<&CachedJoin> {
        self.joins.get(variant)
    }

    pub fn insert_join(&mut self, variant: &'static str, entry: CachedJoin) {
        self.joins.insert(variant, entry);
    }

    pub fn emission(&self, variant: &'static str, id: &QualifiedName) -> Option<&CachedEmission> {
        self.emissions.get(&(variant, id.clone()))
    }

    pub fn insert_emission(
        &mut self,
        variant: &'static str,
        id: QualifiedName,
        entry: CachedEmission,
    ) {
        self.emissions.insert((variant, id), entry);
    }

    pub fn resolution_count(&self) -> usize {
        self.resolutions.len()
    }

    pub fn emission_count(&self) -> usize {
        self.emissions.len()
    }
}
