//! Declaration identity: qualified names, kinds, and opaque source locations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Namespace-qualified declaration name.
///
/// Ordering is lexicographic on `(namespace, name)`. This ordering is the
/// documented tie-break wherever the pipeline must choose between otherwise
/// equal candidates (cross-reference ambiguity, output merge order), so it
/// must stay stable across releases.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    /// Enclosing namespace, `None` for global declarations.
    pub namespace: Option<String>,
    /// Simple declaration name.
    pub name: String,
}

impl QualifiedName {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }

    /// A name with no enclosing namespace.
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}.{}", ns, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Syntactic kind of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclKind {
    Class,
    Interface,
    Record,
    Method,
}

impl DeclKind {
    /// Type-like kinds can anchor generated artifacts; method-like kinds
    /// only ever appear as referenced members.
    pub fn is_type_like(&self) -> bool {
        !matches!(self, DeclKind::Method)
    }
}

/// Opaque source location supplied by the host.
///
/// The pipeline never interprets the contents; it is carried on diagnostics
/// so the host can map them back to its own reporting surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRef(pub String);

impl SourceRef {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    /// Location for synthesized diagnostics with no host counterpart.
    pub fn none() -> Self {
        Self(String::new())
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "<unknown>")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
