//! Cross-referencer — joins independently resolved satellite and anchor sets.
//!
//! Correctness is defined on the two complete sets, not on any streaming
//! order: both inputs are sorted by qualified name before matching, so the
//! result is identical no matter which side resolved first or in what order
//! the host enumerated declarations. The join is the pipeline's single
//! synchronization barrier.
//!
//! Relations live in a side table keyed by identity; records never point at
//! each other.

pub mod types;

pub use types::{CrossRefTable, JoinOutcome};

use std::sync::Arc;

use stencil_core::Diagnostic;

use crate::resolver::ResolvedMetadata;

/// Variant-supplied matching rule for one satellite/anchor family.
pub trait JoinRule {
    /// Structural compatibility test. Never consults declaration order.
    fn matches(&self, satellite: &ResolvedMetadata, anchor: &ResolvedMetadata) -> bool;

    /// True when an anchor admits at most one satellite (mediator: one
    /// handler per request).
    fn exclusive_anchor(&self) -> bool {
        false
    }

    /// Diagnostic for a satellite that matched no anchor. Required
    /// correlations report an Error here; optional ones return `None`.
    fn unmatched_satellite(&self, satellite: &ResolvedMetadata) -> Option<Diagnostic>;

    /// Diagnostic when a satellite structurally matched several anchors and
    /// the lexicographically least was chosen.
    fn ambiguous_satellite(
        &self,
        _satellite: &ResolvedMetadata,
        _chosen: &ResolvedMetadata,
        _candidates: usize,
    ) -> Option<Diagnostic> {
        None
    }

    /// Diagnostic when an exclusive anchor attracted several satellites and
    /// the lexicographically least was kept.
    fn crowded_anchor(
        &self,
        _anchor: &ResolvedMetadata,
        _kept: &ResolvedMetadata,
        _candidates: usize,
    ) -> Option<Diagnostic> {
        None
    }
}

/// Join complete satellite and anchor sets under `rule`.
pub fn join(
    anchors: &[Arc<ResolvedMetadata>],
    satellites: &[Arc<ResolvedMetadata>],
    rule: &dyn JoinRule,
) -> JoinOutcome {
    let mut outcome = JoinOutcome::default();

    // Sort both sides by identity: the lexicographic tie-break below must
    // not depend on host enumeration order.
    let mut sorted_anchors: Vec<&Arc<ResolvedMetadata>> = anchors.iter().collect();
    sorted_anchors.sort_by(|a, b| a.identity.cmp(&b.identity));
    let mut sorted_satellites: Vec<&Arc<ResolvedMetadata>> = satellites.iter().collect();
    sorted_satellites.sort_by(|a, b| a.identity.cmp(&b.identity));

    for satellite in &sorted_satellites {
        let candidates: Vec<&Arc<ResolvedMetadata>> = sorted_anchors
            .iter()
            .filter(|anchor| rule.matches(satellite, anchor))
            .copied()
            .collect();

        match candidates.split_first() {
            None => {
                if let Some(diagnostic) = rule.unmatched_satellite(satellite) {
                    outcome.diagnostics.push(diagnostic);
                }
            }
            Some((chosen, rest)) => {
                if !rest.is_empty() {
                    if let Some(diagnostic) =
                        rule.ambiguous_satellite(satellite, chosen, candidates.len())
                    {
                        outcome.diagnostics.push(diagnostic);
                    }
                }
                outcome
                    .table
                    .insert(satellite.identity.clone(), chosen.identity.clone());
            }
        }
    }

    if rule.exclusive_anchor() {
        for anchor in &sorted_anchors {
            let attached = outcome.table.satellites_of(&anchor.identity);
            if attached.len() > 1 {
                // Satellite lists are kept sorted, so the first is the
                // lexicographically least.
                let kept_name = attached[0].clone();
                if let Some(kept) = sorted_satellites.iter().find(|s| s.identity == kept_name) {
                    if let Some(diagnostic) = rule.crowded_anchor(anchor, kept, attached.len()) {
                        outcome.diagnostics.push(diagnostic);
                    }
                }
                outcome.table.retain_only(&anchor.identity, &kept_name);
            }
        }
    }

    outcome
}
