//! Declaration provider errors.

use super::error_code::{self, StencilErrorCode};

/// Errors raised by a host's declaration provider.
///
/// These abort the whole pass — without a declaration set there is nothing
/// to scope a per-root diagnostic to.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Declaration set unavailable: {0}")]
    Unavailable(String),

    #[error("Host symbol table inconsistent at {name}: {message}")]
    Inconsistent { name: String, message: String },
}

impl StencilErrorCode for ProviderError {
    fn error_code(&self) -> &'static str {
        error_code::PROVIDER_ERROR
    }
}
