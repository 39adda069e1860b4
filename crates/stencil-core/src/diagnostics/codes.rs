//! Stable diagnostic codes.
//!
//! Codes are part of the public contract: hosts key suppressions and
//! documentation on them, so existing codes are never renumbered.

// ---- Pipeline-generic (GEN) ----

/// Declaration carries an attribute the engine recognizes but an argument
/// name it does not.
pub const GEN001: &str = "GEN001";
/// Attribute argument has the wrong literal type (e.g. string where a bool
/// is required); the documented default is used instead.
pub const GEN002: &str = "GEN002";
/// The renderer collaborator failed for a root; that root is skipped.
pub const GEN003: &str = "GEN003";

// ---- Builder (BLD) ----

/// The annotated symbol could not be resolved in the host semantic model.
pub const BLD001: &str = "BLD001";
/// A referenced validator method is missing or does not have the required
/// static single-parameter shape.
pub const BLD002: &str = "BLD002";
/// Conflicting attribute combination on one member (required with ignored,
/// collection overrides on a non-collection member); the harmless reading
/// wins.
pub const BLD003: &str = "BLD003";
/// The generated builder name collides with an existing type in the same
/// namespace; emission proceeds under the colliding name.
pub const BLD004: &str = "BLD004";
/// The annotated type has no settable, non-ignored members; nothing to emit.
pub const BLD005: &str = "BLD005";
/// A member's type is not supported and the member is skipped as opaque.
pub const BLD006: &str = "BLD006";

// ---- Decorator (DEC) ----

/// The annotated symbol could not be resolved in the host semantic model.
pub const DEC001: &str = "DEC001";
/// A decorator class declares a target interface it does not implement, or
/// implements no marker-attributed interface at all.
pub const DEC002: &str = "DEC002";
/// A decorator class implements more than one marker-attributed interface;
/// the lexicographically least anchor was chosen.
pub const DEC003: &str = "DEC003";
/// A decorator class lacks a constructor taking the decorated interface as
/// its first parameter.
pub const DEC004: &str = "DEC004";
/// The generated factory name collides with an existing type in the same
/// namespace; emission proceeds under the colliding name.
pub const DEC005: &str = "DEC005";

// ---- Mediator (MED) ----

/// The annotated symbol could not be resolved in the host semantic model.
pub const MED001: &str = "MED001";
/// A handler references a request type with no resolved request record.
pub const MED002: &str = "MED002";
/// A handler attribute omits the request type argument.
pub const MED003: &str = "MED003";
/// More than one handler targets the same request; the lexicographically
/// least handler is dispatched.
pub const MED004: &str = "MED004";
/// The generated dispatcher name collides with an existing type in the same
/// namespace; emission proceeds under the colliding name.
pub const MED005: &str = "MED005";

// ---- Singleton (SIN) ----

/// The annotated symbol could not be resolved in the host semantic model.
pub const SIN001: &str = "SIN001";
/// The annotated class lacks the generation-required shape: a partial class
/// with a private parameterless constructor.
pub const SIN002: &str = "SIN002";
/// The strategy argument names an unknown strategy; the default is used.
pub const SIN003: &str = "SIN003";
