//! The variant contract.

use stencil_core::Diagnostic;

use crate::crossref::JoinRule;
use crate::emit::Renderer;
use crate::provider::Declaration;
use crate::resolver::{RecordRole, ResolvedMetadata, Resolution};
use crate::validate::ValidateContext;

/// One pattern's parameterization of the pipeline.
///
/// Implementations must be stateless: `resolve` and `validate` are called
/// from parallel contexts and their results are cached by decision key, so
/// any hidden state would break both.
pub trait PatternVariant: Send + Sync {
    /// Stable variant id (`"builder"`, `"decorator"`, `"mediator"`,
    /// `"singleton"`). Used as a cache partition key.
    fn id(&self) -> &'static str;

    /// Cheap structural test: does this declaration belong to the variant,
    /// and as which role? Purely syntactic, mirroring the scanner.
    fn classify(&self, decl: &Declaration) -> Option<RecordRole>;

    /// Full semantic resolution of a classified declaration.
    fn resolve(&self, decl: &Declaration, role: RecordRole) -> Resolution;

    /// Correlation rule for the variant's satellite/anchor families.
    fn join_rule(&self) -> &dyn JoinRule;

    /// Rule set applied to one root after cross-referencing.
    fn validate(&self, root: &ResolvedMetadata, ctx: &ValidateContext<'_>) -> Vec<Diagnostic>;

    /// Default renderer for the variant's artifacts.
    fn renderer(&self) -> &dyn Renderer;
}
