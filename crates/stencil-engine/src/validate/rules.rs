//! Shared validation rules, parameterized by variant diagnostic codes.

use stencil_core::{codes, Diagnostic};

use crate::resolver::{MemberMeta, ResolvedMetadata};

use super::types::ValidateContext;

/// Generated-name collision with an existing type in the root's namespace.
/// Warning only: emission proceeds under the colliding name, never renamed.
pub fn name_collision(
    code: &'static str,
    root: &ResolvedMetadata,
    ctx: &ValidateContext<'_>,
    generated_name: &str,
) -> Option<Diagnostic> {
    if !ctx.type_exists(&root.identity.namespace, generated_name) {
        return None;
    }
    Some(Diagnostic::warning(
        code,
        root.identity.clone(),
        root.location.clone(),
        format!(
            "generated type '{}' collides with an existing type in namespace '{}'; emission proceeds with the colliding name",
            generated_name,
            root.identity
                .namespace
                .as_deref()
                .unwrap_or("<global>")
        ),
    ))
}

/// A member flagged both required and ignored. Ignored wins.
pub fn required_ignored_conflict(
    root: &ResolvedMetadata,
    member: &MemberMeta,
) -> Option<Diagnostic> {
    if !(member.required && member.ignored) {
        return None;
    }
    Some(
        Diagnostic::warning(
            codes::BLD003,
            root.identity.clone(),
            root.location.clone(),
            format!(
                "member '{}' of '{}' is flagged both required and ignored; ignored wins",
                member.name, root.identity
            ),
        )
        .for_member(&member.name),
    )
}

/// A referenced validator must resolve to a static single-parameter method
/// on the root whose parameter type matches the member and which returns
/// `bool`. Mismatch is an Error scoped to the member: only that member is
/// skipped.
pub fn validator_shape(root: &ResolvedMetadata, member: &MemberMeta) -> Option<Diagnostic> {
    let validator = member.validator.as_deref()?;

    let failure = match root.find_method(validator) {
        None => Some(format!(
            "member '{}' of '{}' references validator '{}' which does not exist",
            member.name, root.identity, validator
        )),
        Some(method) if !method.is_static => Some(format!(
            "validator '{}' for member '{}' of '{}' must be static",
            validator, member.name, root.identity
        )),
        Some(method)
            if method.params.len() != 1 || method.params[0].type_name != member.type_name =>
        {
            Some(format!(
                "validator '{}' for member '{}' of '{}' must take exactly one '{}' parameter",
                validator, member.name, root.identity, member.type_name
            ))
        }
        Some(method) if method.return_type.as_deref() != Some("bool") => Some(format!(
            "validator '{}' for member '{}' of '{}' must return bool",
            validator, member.name, root.identity
        )),
        Some(_) => None,
    };

    failure.map(|message| {
        Diagnostic::error(
            codes::BLD002,
            root.identity.clone(),
            root.location.clone(),
            message,
        )
        .for_member(&member.name)
    })
}

/// No usable members at all: Warning, and no artifact for this root.
pub fn empty_root(code: &'static str, root: &ResolvedMetadata) -> Option<Diagnostic> {
    if root.usable_members().next().is_some() {
        return None;
    }
    Some(Diagnostic::warning(
        code,
        root.identity.clone(),
        root.location.clone(),
        format!(
            "'{}' has no settable, non-ignored members; nothing to generate",
            root.identity
        ),
    ))
}
