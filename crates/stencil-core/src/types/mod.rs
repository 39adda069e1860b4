//! Core value types shared by every pipeline stage.

pub mod collections;
pub mod identity;
pub mod key;
pub mod value;

pub use identity::{DeclKind, QualifiedName, SourceRef};
pub use key::{DecisionKey, KeyWriter};
pub use value::AttrValue;
