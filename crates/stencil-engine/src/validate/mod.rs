//! Validator — rule sets over the cross-referenced metadata graph.
//!
//! Validation walks each root with its correlations and produces
//! severity-tagged diagnostics; it never halts the pipeline. The emit plan
//! derived from a root's diagnostics decides what the emitter may render:
//! a root-scoped Error suppresses the whole root, a member-scoped Error
//! suppresses only that member (partial generation), Warnings suppress
//! nothing.

pub mod rules;
pub mod types;

pub use types::{RootPlan, ValidateContext};

use stencil_core::types::QualifiedName;
use stencil_core::Diagnostic;

/// Derive the emit plan for one root from every diagnostic attached to it.
pub fn build_plan(root: &QualifiedName, diagnostics: &[Diagnostic]) -> RootPlan {
    let mut plan = RootPlan::new(root.clone());
    for diagnostic in diagnostics {
        if diagnostic.root != *root || !diagnostic.is_error() {
            continue;
        }
        match &diagnostic.member {
            Some(member) => {
                plan.skipped_members.insert(member.clone());
            }
            None => plan.blocked = true,
        }
    }
    plan
}
