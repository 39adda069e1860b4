//! Member descriptor resolution.
//!
//! Reads the member-level annotations (`Required`, `Ignore`, `Validate`,
//! `CollectionMethods`) into [`MemberMeta`] descriptors, preserving declared
//! order. Unsupported member types are skipped as opaque with a Warning;
//! nothing here is fatal for the root.

use heck::ToUpperCamelCase;

use stencil_core::types::AttrValue;
use stencil_core::{codes, Diagnostic};

use crate::provider::{Declaration, MemberDecl};

use super::types::{CollectionMeta, MemberMeta};

/// Member-level annotation names.
pub const REQUIRED: &str = "Required";
pub const IGNORE: &str = "Ignore";
pub const VALIDATE: &str = "Validate";
pub const COLLECTION_METHODS: &str = "CollectionMethods";

/// Resolve all members of `decl` into descriptors plus non-fatal diagnostics.
pub fn resolve_members(decl: &Declaration) -> (Vec<MemberMeta>, Vec<Diagnostic>) {
    let mut members = Vec::with_capacity(decl.members.len());
    let mut diagnostics = Vec::new();

    for member in &decl.members {
        if !supported_type(&member.type_name) {
            diagnostics.push(
                Diagnostic::warning(
                    codes::BLD006,
                    decl.id.clone(),
                    decl.location.clone(),
                    format!(
                        "member '{}' of '{}' has unsupported type '{}' and is skipped",
                        member.name, decl.id, member.type_name
                    ),
                )
                .for_member(&member.name),
            );
            continue;
        }

        let collection = resolve_collection(decl, member, &mut diagnostics);
        let validator = resolve_validator(decl, member, &mut diagnostics);

        members.push(MemberMeta {
            name: member.name.clone(),
            type_name: member.type_name.clone(),
            required: member.has_attribute(REQUIRED),
            ignored: member.has_attribute(IGNORE),
            nullable: member.is_nullable,
            has_setter: member.has_setter,
            collection,
            validator,
        });
    }

    (members, diagnostics)
}

/// A type is opaque to generation when its name is empty or carries
/// pointer/by-ref sigils the setter templates cannot express.
fn supported_type(type_name: &str) -> bool {
    !type_name.is_empty() && !type_name.contains('*') && !type_name.contains('&')
}

fn resolve_collection(
    decl: &Declaration,
    member: &MemberDecl,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<CollectionMeta> {
    let overrides = member.attribute(COLLECTION_METHODS);

    if !member.is_collection {
        if overrides.is_some() {
            diagnostics.push(
                Diagnostic::warning(
                    codes::BLD003,
                    decl.id.clone(),
                    decl.location.clone(),
                    format!(
                        "member '{}' of '{}' is not a collection but carries CollectionMethods",
                        member.name, decl.id
                    ),
                )
                .for_member(&member.name),
            );
        }
        return None;
    }

    let element_type = match &member.element_type {
        Some(e) if supported_type(e) => e.clone(),
        _ => {
            diagnostics.push(
                Diagnostic::warning(
                    codes::BLD006,
                    decl.id.clone(),
                    decl.location.clone(),
                    format!(
                        "collection member '{}' of '{}' has no resolvable element type and is skipped",
                        member.name, decl.id
                    ),
                )
                .for_member(&member.name),
            );
            return None;
        }
    };

    let element_pascal = simple_name(&element_type).to_upper_camel_case();
    let member_pascal = member.name.to_upper_camel_case();

    let named = |key: &str, default: String| -> String {
        overrides
            .and_then(|o| o.args.get(key))
            .and_then(AttrValue::as_str)
            .map(str::to_string)
            .unwrap_or(default)
    };

    Some(CollectionMeta {
        add_name: named("Add", format!("Add{element_pascal}")),
        add_range_name: named("AddRange", format!("Add{element_pascal}Range")),
        clear_name: named("Clear", format!("Clear{member_pascal}")),
        count_name: named("Count", format!("{member_pascal}Count")),
        element_type,
    })
}

fn resolve_validator(
    decl: &Declaration,
    member: &MemberDecl,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<String> {
    let attribute = member.attribute(VALIDATE)?;
    match attribute.args.get("Method").and_then(AttrValue::as_str) {
        Some(method) => Some(method.to_string()),
        None => {
            diagnostics.push(
                Diagnostic::warning(
                    codes::GEN002,
                    decl.id.clone(),
                    decl.location.clone(),
                    format!(
                        "Validate on member '{}' of '{}' is missing the 'Method' argument and is ignored",
                        member.name, decl.id
                    ),
                )
                .for_member(&member.name),
            );
            None
        }
    }
}

/// Last path segment of a possibly qualified type name.
fn simple_name(type_name: &str) -> &str {
    type_name.rsplit('.').next().unwrap_or(type_name)
}
