//! stencil-engine: attribute-driven, incremental code-generation pipeline.
//!
//! The engine turns a host's declaration set into generated companion source
//! artifacts plus diagnostics, in five stages behind one driver:
//! - Scanner: structural filter to attributed declarations
//! - Resolver: semantic metadata records with stable decision keys
//! - Cross-Referencer: satellite-to-anchor join over complete sets
//! - Validator: per-variant rule sets, severity-tagged diagnostics
//! - Emitter: deterministic text artifacts, one per eligible root
//!
//! The driver memoizes each stage by decision key so that editing one
//! declaration does not regenerate unrelated output. Hosts plug in through
//! the `provider` module and never see the stages directly.

pub mod crossref;
pub mod driver;
pub mod emit;
pub mod provider;
pub mod resolver;
pub mod scanner;
pub mod validate;
pub mod variants;

pub use driver::{IncrementalCache, PipelineDriver, PipelineOutput, PipelineStats};
pub use emit::EmissionUnit;
pub use provider::{
    AttributeUsage, CtorDecl, Declaration, DeclarationProvider, InMemoryProvider, MemberDecl,
    MethodDecl, ParamDecl, Visibility,
};
pub use resolver::{MemberMeta, RecordRole, ResolvedMetadata, Resolution, VariantPayload};
pub use variants::{PatternVariant, VariantRegistry};
