//! Emission errors.

use super::error_code::{self, StencilErrorCode};

/// Errors raised by a renderer collaborator.
///
/// The driver converts these into a `GEN003` diagnostic for the affected
/// root and keeps going; they never abort the pass.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("Renderer failed for {root}: {message}")]
    RendererFailed { root: String, message: String },
}

impl StencilErrorCode for EmitError {
    fn error_code(&self) -> &'static str {
        error_code::EMIT_ERROR
    }
}
