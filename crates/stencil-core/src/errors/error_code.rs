//! Stable error codes for host-boundary failures.

/// Code constants, one per failure class.
pub const PROVIDER_ERROR: &str = "STN-PROVIDER";
pub const EMIT_ERROR: &str = "STN-EMIT";

/// Maps every subsystem error to a stable code for host reporting surfaces.
pub trait StencilErrorCode {
    fn error_code(&self) -> &'static str;
}
