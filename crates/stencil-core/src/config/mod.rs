//! Per-variant configuration structs.
//!
//! Each pattern's attribute schema is one versioned struct with every
//! default enumerated once, constructed from the literal named-argument map
//! the host hands over. Unknown argument names and mistyped values surface
//! as [`ArgIssue`]s; the resolver turns those into diagnostics.

pub mod builder_config;
pub mod decorator_config;
pub mod mediator_config;
pub mod singleton_config;

pub use builder_config::BuilderConfig;
pub use decorator_config::DecoratorConfig;
pub use mediator_config::MediatorConfig;
pub use singleton_config::{SingletonConfig, SingletonStrategy};

use std::collections::BTreeMap;

use crate::types::AttrValue;

/// A non-fatal problem found while reading attribute arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgIssue {
    /// Stable diagnostic code the issue maps to.
    pub code: &'static str,
    pub message: String,
}

pub(crate) fn read_str(
    args: &BTreeMap<String, AttrValue>,
    key: &str,
    issues: &mut Vec<ArgIssue>,
) -> Option<String> {
    match args.get(key) {
        None => None,
        Some(AttrValue::Str(s)) => Some(s.clone()),
        Some(other) => {
            issues.push(ArgIssue {
                code: crate::diagnostics::codes::GEN002,
                message: format!("argument '{key}' expects a string, found {other}"),
            });
            None
        }
    }
}

pub(crate) fn read_bool(
    args: &BTreeMap<String, AttrValue>,
    key: &str,
    issues: &mut Vec<ArgIssue>,
) -> Option<bool> {
    match args.get(key) {
        None => None,
        Some(AttrValue::Bool(b)) => Some(*b),
        Some(other) => {
            issues.push(ArgIssue {
                code: crate::diagnostics::codes::GEN002,
                message: format!("argument '{key}' expects a bool, found {other}"),
            });
            None
        }
    }
}

pub(crate) fn read_type_ref(
    args: &BTreeMap<String, AttrValue>,
    key: &str,
    issues: &mut Vec<ArgIssue>,
) -> Option<String> {
    match args.get(key) {
        None => None,
        Some(AttrValue::TypeRef(t)) => Some(t.clone()),
        Some(other) => {
            issues.push(ArgIssue {
                code: crate::diagnostics::codes::GEN002,
                message: format!("argument '{key}' expects a type reference, found {other}"),
            });
            None
        }
    }
}

pub(crate) fn flag_unknown_args(
    args: &BTreeMap<String, AttrValue>,
    known: &[&str],
    issues: &mut Vec<ArgIssue>,
) {
    for key in args.keys() {
        if !known.contains(&key.as_str()) {
            issues.push(ArgIssue {
                code: crate::diagnostics::codes::GEN001,
                message: format!("unknown attribute argument '{key}'"),
            });
        }
    }
}
