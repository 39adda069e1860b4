//! Cross-reference side table.

use serde::{Deserialize, Serialize};

use stencil_core::types::collections::FxHashMap;
use stencil_core::types::QualifiedName;
use stencil_core::Diagnostic;

/// Relation between satellites and anchors, keyed by identity.
///
/// Invariants: at most one anchor per satellite; per-anchor satellite lists
/// stay sorted by qualified name so emission order is stable under
/// insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossRefTable {
    satellite_to_anchor: FxHashMap<QualifiedName, QualifiedName>,
    anchor_to_satellites: FxHashMap<QualifiedName, Vec<QualifiedName>>,
}

impl CrossRefTable {
    pub fn insert(&mut self, satellite: QualifiedName, anchor: QualifiedName) {
        let list = self.anchor_to_satellites.entry(anchor.clone()).or_default();
        match list.binary_search(&satellite) {
            Ok(_) => {}
            Err(pos) => list.insert(pos, satellite.clone()),
        }
        self.satellite_to_anchor.insert(satellite, anchor);
    }

    /// Drop every satellite of `anchor` except `kept`.
    pub fn retain_only(&mut self, anchor: &QualifiedName, kept: &QualifiedName) {
        if let Some(list) = self.anchor_to_satellites.get_mut(anchor) {
            for satellite in list.iter() {
                if satellite != kept {
                    self.satellite_to_anchor.remove(satellite);
                }
            }
            list.retain(|s| s == kept);
        }
    }

    pub fn anchor_of(&self, satellite: &QualifiedName) -> Option<&QualifiedName> {
        self.satellite_to_anchor.get(satellite)
    }

    /// Satellites of an anchor, sorted by qualified name. Empty for anchors
    /// with no correlation — never an error.
    pub fn satellites_of(&self, anchor: &QualifiedName) -> &[QualifiedName] {
        self.anchor_to_satellites
            .get(anchor)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.satellite_to_anchor.is_empty()
    }

    pub fn relation_count(&self) -> usize {
        self.satellite_to_anchor.len()
    }
}

/// Result of one join pass.
#[derive(Debug, Default)]
pub struct JoinOutcome {
    pub table: CrossRefTable,
    pub diagnostics: Vec<Diagnostic>,
}
