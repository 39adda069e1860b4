//! stencil-core: shared foundation for the stencil generation engine.
//!
//! This crate provides the value types the pipeline is built from:
//! - Types: qualified names, declaration kinds, attribute values, decision keys
//! - Diagnostics: severity-tagged, per-root, with stable codes
//! - Errors: one enum per subsystem, `thiserror` only
//! - Config: one versioned configuration struct per pattern variant

pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod types;

pub use config::{
    BuilderConfig, DecoratorConfig, MediatorConfig, SingletonConfig, SingletonStrategy,
};
pub use diagnostics::{codes, Diagnostic, Severity};
pub use errors::{EmitError, PipelineError, ProviderError, StencilErrorCode};
pub use types::{
    AttrValue, DeclKind, DecisionKey, KeyWriter, QualifiedName, SourceRef,
};
