//! Declaration provider — the narrow interface a host implements.
//!
//! The pipeline depends only on this module's descriptor model, never on a
//! concrete compiler. Any host with a syntax tree and a symbol table (a
//! parser, a language server, a build-time codegen tool) can feed it.

pub mod memory;
pub mod types;

pub use memory::InMemoryProvider;
pub use types::{
    AttributeUsage, CtorDecl, Declaration, MemberDecl, MethodDecl, ParamDecl, Visibility,
};

use stencil_core::ProviderError;

/// Source of the declaration set for one pipeline pass.
///
/// The returned set must be complete: cross-referencing is defined over the
/// full anchor and satellite sets, and collision checks consult every
/// declared type name.
pub trait DeclarationProvider {
    fn declarations(&self) -> Result<Vec<Declaration>, ProviderError>;
}
