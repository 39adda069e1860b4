//! Pipeline pass statistics.

use std::fmt;

use serde::Serialize;

/// Counters for one pipeline pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub declarations_total: usize,
    pub declarations_attributed: usize,
    pub resolutions_reused: usize,
    pub resolutions_computed: usize,
    pub joins_reused: usize,
    pub joins_computed: usize,
    pub emissions_reused: usize,
    pub emissions_computed: usize,
    pub roots_blocked: usize,
    pub artifacts_emitted: usize,
    pub duration_us: u64,
}

impl PipelineStats {
    /// Fraction of resolutions served from cache.
    pub fn resolution_reuse_ratio(&self) -> f64 {
        let total = self.resolutions_reused + self.resolutions_computed;
        if total == 0 {
            0.0
        } else {
            self.resolutions_reused as f64 / total as f64
        }
    }
}

impl fmt::Display for PipelineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PipelineStats {{ decls={}/{}, resolve={}+{}r, join={}+{}r, emit={}+{}r, blocked={}, artifacts={}, reuse={:.1}%, {}us }}",
            self.declarations_attributed,
            self.declarations_total,
            self.resolutions_computed,
            self.resolutions_reused,
            self.joins_computed,
            self.joins_reused,
            self.emissions_computed,
            self.emissions_reused,
            self.roots_blocked,
            self.artifacts_emitted,
            self.resolution_reuse_ratio() * 100.0,
            self.duration_us,
        )
    }
}
