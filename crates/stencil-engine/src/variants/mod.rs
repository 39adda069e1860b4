//! Pattern variants — the four parameterizations of the pipeline.
//!
//! Each variant implements the [`PatternVariant`] trait and is registered in
//! the [`VariantRegistry`]. A variant owns its attribute schema, resolution
//! rules, correlation rule, validation rule set, and default renderer; the
//! driver owns everything else.

pub mod builder;
pub mod decorator;
pub mod mediator;
pub mod registry;
pub mod singleton;
pub mod traits;

pub use builder::BuilderVariant;
pub use decorator::DecoratorVariant;
pub use mediator::MediatorVariant;
pub use registry::VariantRegistry;
pub use singleton::SingletonVariant;
pub use traits::PatternVariant;

use stencil_core::config::ArgIssue;
use stencil_core::Diagnostic;

use crate::crossref::JoinRule;
use crate::provider::Declaration;
use crate::resolver::{MethodSig, ParamSig, ResolvedMetadata};

/// Join rule for variants without satellites.
pub(crate) struct NoSatellites;

impl JoinRule for NoSatellites {
    fn matches(&self, _satellite: &ResolvedMetadata, _anchor: &ResolvedMetadata) -> bool {
        false
    }

    fn unmatched_satellite(&self, _satellite: &ResolvedMetadata) -> Option<Diagnostic> {
        None
    }
}

/// Convert attribute-argument issues into Warning diagnostics on `decl`.
pub(crate) fn arg_issue_diagnostics(decl: &Declaration, issues: Vec<ArgIssue>) -> Vec<Diagnostic> {
    issues
        .into_iter()
        .map(|issue| {
            Diagnostic::warning(
                issue.code,
                decl.id.clone(),
                decl.location.clone(),
                format!("on '{}': {}", decl.id, issue.message),
            )
        })
        .collect()
}

/// Project a declaration's methods into signature records.
pub(crate) fn method_sigs(decl: &Declaration) -> Vec<MethodSig> {
    decl.methods
        .iter()
        .map(|method| MethodSig {
            name: method.name.clone(),
            is_static: method.is_static,
            params: method
                .params
                .iter()
                .map(|param| ParamSig {
                    name: param.name.clone(),
                    type_name: param.type_name.clone(),
                })
                .collect(),
            return_type: method.return_type.clone(),
        })
        .collect()
}
