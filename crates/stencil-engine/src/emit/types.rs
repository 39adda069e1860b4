//! Emission output types.

use serde::{Deserialize, Serialize};

/// Pre-assembly description of one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Deterministic identifier, `{AnchorName}{Suffix}`.
    pub hint_name: String,
    /// Namespace wrapper; `None` emits at global scope.
    pub namespace: Option<String>,
    /// The generated type's declaration line.
    pub type_decl: String,
    /// Rendered blocks in the order they must appear.
    pub blocks: Vec<String>,
}

/// Final output artifact handed to the host.
///
/// Re-emission of identical content under the same hint name is a no-op for
/// downstream consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionUnit {
    pub hint_name: String,
    pub text: String,
}
