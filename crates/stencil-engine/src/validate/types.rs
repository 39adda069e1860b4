//! Validation context and emit plans.

use std::collections::BTreeSet;
use std::sync::Arc;

use stencil_core::types::collections::{FxHashMap, FxHashSet};
use stencil_core::types::QualifiedName;

use crate::crossref::CrossRefTable;
use crate::resolver::ResolvedMetadata;

/// Read-only surroundings a variant's rule set may consult.
pub struct ValidateContext<'a> {
    /// Every declared type name per namespace, attributed or not. Collision
    /// checks run against this table.
    pub namespace_types: &'a FxHashMap<Option<String>, FxHashSet<String>>,
    /// The joined relation for the variant under validation.
    pub crossref: &'a CrossRefTable,
    /// Resolved satellites by identity, for rules that inspect the far side
    /// of a relation.
    pub satellites: &'a FxHashMap<QualifiedName, Arc<ResolvedMetadata>>,
}

impl ValidateContext<'_> {
    /// True when `name` is already declared in `namespace`.
    pub fn type_exists(&self, namespace: &Option<String>, name: &str) -> bool {
        self.namespace_types
            .get(namespace)
            .is_some_and(|types| types.contains(name))
    }
}

/// What the emitter may render for one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootPlan {
    pub root: QualifiedName,
    /// Root-scoped Error present; no artifact for this root.
    pub blocked: bool,
    /// Members with member-scoped Errors; rendered output omits them.
    pub skipped_members: BTreeSet<String>,
}

impl RootPlan {
    pub fn new(root: QualifiedName) -> Self {
        Self {
            root,
            blocked: false,
            skipped_members: BTreeSet::new(),
        }
    }

    pub fn member_allowed(&self, member: &str) -> bool {
        !self.skipped_members.contains(member)
    }
}
