//! Pipeline errors.
//! Aggregates subsystem errors via `From` conversions.

use super::error_code::StencilErrorCode;
use super::{EmitError, ProviderError};

/// Errors that abort a whole pipeline pass.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Emit error: {0}")]
    Emit(#[from] EmitError),
}

impl StencilErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Provider(e) => e.error_code(),
            Self::Emit(e) => e.error_code(),
        }
    }
}
