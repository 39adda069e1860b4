//! Diagnostics: severity-tagged values attached to a specific root.
//!
//! Diagnostics never abort the pipeline. Each stage returns them alongside
//! its result instead of writing into a shared sink, which keeps per-root
//! isolation and makes parallel execution safe without locking.

pub mod codes;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{QualifiedName, SourceRef};

/// Diagnostic severity. An `Error` scoped to a root suppresses emission for
/// that root only; member-scoped errors skip just the member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A single finding about one root declaration.
///
/// `member` is set when the finding concerns a single member rather than the
/// declaration as a whole; the validator uses this to scope suppression.
// `code` is a &'static str from the `codes` table: diagnostics serialize out
// for host reporting surfaces but do not round-trip back in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Stable code from [`codes`].
    pub code: &'static str,
    pub severity: Severity,
    /// Human-readable message citing the exact declaration name and the
    /// unmet condition.
    pub message: String,
    /// The root declaration this finding concerns.
    pub root: QualifiedName,
    /// Member the finding is scoped to, if any.
    pub member: Option<String>,
    /// Host-supplied location, forwarded verbatim.
    pub location: SourceRef,
}

impl Diagnostic {
    pub fn error(
        code: &'static str,
        root: QualifiedName,
        location: SourceRef,
        message: impl Into<String>,
    ) -> Self {
        Self::new(code, Severity::Error, root, location, message)
    }

    pub fn warning(
        code: &'static str,
        root: QualifiedName,
        location: SourceRef,
        message: impl Into<String>,
    ) -> Self {
        Self::new(code, Severity::Warning, root, location, message)
    }

    pub fn info(
        code: &'static str,
        root: QualifiedName,
        location: SourceRef,
        message: impl Into<String>,
    ) -> Self {
        Self::new(code, Severity::Info, root, location, message)
    }

    fn new(
        code: &'static str,
        severity: Severity,
        root: QualifiedName,
        location: SourceRef,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
            root,
            member: None,
            location,
        }
    }

    /// Scope this diagnostic to a single member.
    pub fn for_member(mut self, member: impl Into<String>) -> Self {
        self.member = Some(member.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// True when this is an error about the root itself rather than one of
    /// its members. Only these suppress emission for the root.
    pub fn blocks_root(&self) -> bool {
        self.is_error() && self.member.is_none()
    }

    /// Normalization key for deterministic output ordering.
    pub fn sort_key(&self) -> (QualifiedName, &'static str, Option<String>, String) {
        (
            self.root.clone(),
            self.code,
            self.member.clone(),
            self.message.clone(),
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} ({})",
            self.severity, self.code, self.message, self.location
        )
    }
}
