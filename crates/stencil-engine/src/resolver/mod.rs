//! Symbol resolution — from raw declarations to immutable metadata records.
//!
//! Resolution is referentially transparent: a declaration's syntax plus the
//! declaration set fully determines the result, which is what makes the
//! driver's equality-based caching sound. Each resolution returns
//! `(Option<ResolvedMetadata>, Vec<Diagnostic>)`; a `None` with an Error
//! diagnostic marks a root that failed to resolve, and never aborts any
//! other root.
//!
//! Variant-specific rules live in `crate::variants`; this module owns the
//! record model and the member-descriptor machinery shared across variants.

pub mod members;
pub mod types;

pub use members::resolve_members;
pub use types::{
    CollectionMeta, MemberMeta, MethodSig, ParamSig, RecordRole, ResolvedMetadata, Resolution,
    VariantPayload,
};
