//! Error handling for stencil.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.
//!
//! Per-root failures are never errors — they are [`crate::Diagnostic`]
//! values. These enums cover the host boundary: a provider that cannot hand
//! over the declaration set, a renderer collaborator that fails outright.

pub mod emit_error;
pub mod error_code;
pub mod pipeline_error;
pub mod provider_error;

pub use emit_error::EmitError;
pub use error_code::StencilErrorCode;
pub use pipeline_error::PipelineError;
pub use provider_error::ProviderError;
