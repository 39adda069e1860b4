//! Builder variant — fluent builders for annotated classes and records.
//!
//! Anchor schema: `GenerateBuilder(Name, ValidateOnBuild)` on a class or
//! record; member annotations `Required`, `Ignore`, `Validate(Method)`,
//! `CollectionMethods(Add, AddRange, Clear, Count)`. No satellites.

use heck::{ToLowerCamelCase, ToUpperCamelCase};

use stencil_core::config::BuilderConfig;
use stencil_core::{codes, Diagnostic, EmitError};

use crate::crossref::JoinRule;
use crate::emit::{Artifact, Renderer};
use crate::provider::Declaration;
use crate::resolver::{
    resolve_members, MemberMeta, RecordRole, ResolvedMetadata, Resolution, VariantPayload,
};
use crate::validate::{rules, RootPlan, ValidateContext};

use super::traits::PatternVariant;
use super::{arg_issue_diagnostics, method_sigs, NoSatellites};

/// Anchor attribute name.
pub const GENERATE_BUILDER: &str = "GenerateBuilder";

pub struct BuilderVariant;

impl PatternVariant for BuilderVariant {
    fn id(&self) -> &'static str {
        "builder"
    }

    fn classify(&self, decl: &Declaration) -> Option<RecordRole> {
        use stencil_core::types::DeclKind;
        let anchor_kind = matches!(decl.kind, DeclKind::Class | DeclKind::Record);
        (anchor_kind && decl.has_attribute(GENERATE_BUILDER)).then_some(RecordRole::Anchor)
    }

    fn resolve(&self, decl: &Declaration, _role: RecordRole) -> Resolution {
        if let Some(reason) = &decl.resolution_failure {
            return Resolution::failed(vec![Diagnostic::error(
                codes::BLD001,
                decl.id.clone(),
                decl.location.clone(),
                format!("symbol '{}' could not be resolved: {}", decl.id, reason),
            )]);
        }

        let Some(attribute) = decl.attribute(GENERATE_BUILDER) else {
            return Resolution::default();
        };
        let (config, issues) = BuilderConfig::from_args(&attribute.args);
        let mut diagnostics = arg_issue_diagnostics(decl, issues);

        let (members, member_diagnostics) = resolve_members(decl);
        diagnostics.extend(member_diagnostics);

        let meta = ResolvedMetadata::new(
            decl.id.clone(),
            decl.kind,
            RecordRole::Anchor,
            self.id(),
            members,
            method_sigs(decl),
            VariantPayload::Builder { config },
            decl.location.clone(),
        );
        Resolution::ok(meta, diagnostics)
    }

    fn join_rule(&self) -> &dyn JoinRule {
        &NoSatellites
    }

    fn validate(&self, root: &ResolvedMetadata, ctx: &ValidateContext<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for member in &root.members {
            diagnostics.extend(rules::required_ignored_conflict(root, member));
            diagnostics.extend(rules::validator_shape(root, member));
        }

        let VariantPayload::Builder { config } = &root.payload else {
            return diagnostics;
        };
        let generated = config.effective_name(&root.identity.name);
        diagnostics.extend(rules::name_collision(codes::BLD004, root, ctx, &generated));
        diagnostics.extend(rules::empty_root(codes::BLD005, root));

        diagnostics
    }

    fn renderer(&self) -> &dyn Renderer {
        &BuilderRenderer
    }
}

/// Default builder renderer: backing fields, fluent setters, collection
/// helpers, and a `Build()` with required guards and validator calls.
pub struct BuilderRenderer;

impl Renderer for BuilderRenderer {
    fn render(
        &self,
        root: &ResolvedMetadata,
        _satellites: &[&ResolvedMetadata],
        plan: &RootPlan,
    ) -> Result<Option<Artifact>, EmitError> {
        let VariantPayload::Builder { config } = &root.payload else {
            return Ok(None);
        };

        let members: Vec<&MemberMeta> = root
            .usable_members()
            .filter(|m| plan.member_allowed(&m.name))
            .collect();
        if members.is_empty() {
            return Ok(None);
        }

        let builder_name = config.effective_name(&root.identity.name);
        let anchor = &root.identity.name;

        let mut blocks = Vec::with_capacity(members.len() + 2);
        blocks.push(render_fields(&members));
        for member in &members {
            blocks.push(render_setter(&builder_name, member));
        }
        blocks.push(render_build(anchor, config, &members));

        Ok(Some(Artifact {
            hint_name: builder_name.clone(),
            namespace: root.identity.namespace.clone(),
            type_decl: format!("public sealed class {builder_name}"),
            blocks,
        }))
    }
}

fn field_name(member: &MemberMeta) -> String {
    format!("_{}", member.name.to_lower_camel_case())
}

fn render_fields(members: &[&MemberMeta]) -> String {
    let mut out = String::new();
    for member in members {
        let field = field_name(member);
        if member.collection.is_some() {
            out.push_str(&format!(
                "private {} {} = new {}();\n",
                member.type_name, field, member.type_name
            ));
        } else {
            out.push_str(&format!("private {} {};\n", member.type_name, field));
            if member.guarded() {
                out.push_str(&format!("private bool {field}Set;\n"));
            }
        }
    }
    out.trim_end().to_string()
}

fn render_setter(builder_name: &str, member: &MemberMeta) -> String {
    let field = field_name(member);
    match &member.collection {
        Some(collection) => {
            let element = &collection.element_type;
            format!(
                "public {builder_name} {add}({element} value)\n{{\n    {field}.Add(value);\n    return this;\n}}\n\n\
                 public {builder_name} {add_range}(IEnumerable<{element}> values)\n{{\n    {field}.AddRange(values);\n    return this;\n}}\n\n\
                 public {builder_name} {clear}()\n{{\n    {field}.Clear();\n    return this;\n}}\n\n\
                 public int {count} => {field}.Count;",
                add = collection.add_name,
                add_range = collection.add_range_name,
                clear = collection.clear_name,
                count = collection.count_name,
            )
        }
        None => {
            let pascal = member.name.to_upper_camel_case();
            let mut body = format!("    {field} = value;\n");
            if member.guarded() {
                body.push_str(&format!("    {field}Set = true;\n"));
            }
            body.push_str("    return this;");
            format!(
                "public {builder_name} With{pascal}({} value)\n{{\n{body}\n}}",
                member.type_name
            )
        }
    }
}

fn render_build(anchor: &str, config: &BuilderConfig, members: &[&MemberMeta]) -> String {
    let mut out = format!("public {anchor} Build()\n{{\n");

    for member in members {
        if member.guarded() && member.collection.is_none() {
            let field = field_name(member);
            out.push_str(&format!(
                "    if (!{field}Set)\n    {{\n        throw new InvalidOperationException(\"Required member '{}' was not set.\");\n    }}\n",
                member.name
            ));
        }
    }

    if config.effective_validate_on_build() {
        for member in members {
            if let Some(validator) = &member.validator {
                let field = field_name(member);
                out.push_str(&format!(
                    "    if (!{anchor}.{validator}({field}))\n    {{\n        throw new InvalidOperationException(\"Member '{}' failed validation by '{validator}'.\");\n    }}\n",
                    member.name
                ));
            }
        }
    }

    out.push_str(&format!("    return new {anchor}\n    {{\n"));
    for member in members {
        out.push_str(&format!(
            "        {} = {},\n",
            member.name,
            field_name(member)
        ));
    }
    out.push_str("    };\n}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{AttributeUsage, MemberDecl, MethodDecl, ParamDecl};
    use stencil_core::types::{DeclKind, QualifiedName};

    fn user_decl() -> Declaration {
        let mut decl = Declaration::new(QualifiedName::new("App", "User"), DeclKind::Class);
        decl.attributes.push(AttributeUsage::new(GENERATE_BUILDER));
        decl.members.push(
            MemberDecl::new("Email", "string").with_attribute(AttributeUsage::new("Required")),
        );
        decl.members.push(
            MemberDecl::new("Age", "int").with_attribute(
                AttributeUsage::new("Validate")
                    .with_arg("Method", stencil_core::AttrValue::Str("ValidateAge".into())),
            ),
        );
        decl.methods.push(
            MethodDecl::new("ValidateAge")
                .statik()
                .with_param(ParamDecl::new("value", "int"))
                .returning("bool"),
        );
        decl
    }

    #[test]
    fn scenario_two_metadata_shape() {
        let variant = BuilderVariant;
        let decl = user_decl();
        let role = variant.classify(&decl).unwrap();
        let resolution = variant.resolve(&decl, role);
        let meta = resolution.meta.unwrap();

        assert_eq!(meta.members.len(), 2);
        assert!(meta.members[0].required);
        assert_eq!(meta.members[1].validator.as_deref(), Some("ValidateAge"));
        assert!(resolution.diagnostics.is_empty());
    }

    #[test]
    fn rendered_builder_guards_required_and_validated_members() {
        let variant = BuilderVariant;
        let decl = user_decl();
        let resolution = variant.resolve(&decl, RecordRole::Anchor);
        let meta = resolution.meta.unwrap();
        let plan = RootPlan::new(meta.identity.clone());

        let artifact = BuilderRenderer.render(&meta, &[], &plan).unwrap().unwrap();
        assert_eq!(artifact.hint_name, "UserBuilder");
        let text = artifact.blocks.join("\n");
        assert!(text.contains("if (!_emailSet)"));
        assert!(text.contains("User.ValidateAge(_age)"));
        assert!(text.contains("WithEmail"));
        assert!(text.contains("WithAge"));
    }

    #[test]
    fn skipped_member_not_rendered() {
        let variant = BuilderVariant;
        let decl = user_decl();
        let meta = variant.resolve(&decl, RecordRole::Anchor).meta.unwrap();
        let mut plan = RootPlan::new(meta.identity.clone());
        plan.skipped_members.insert("Age".to_string());

        let artifact = BuilderRenderer.render(&meta, &[], &plan).unwrap().unwrap();
        let text = artifact.blocks.join("\n");
        assert!(!text.contains("WithAge"));
        assert!(text.contains("WithEmail"));
    }

    #[test]
    fn validate_on_build_false_drops_validator_calls() {
        let variant = BuilderVariant;
        let mut decl = user_decl();
        decl.attributes[0] = AttributeUsage::new(GENERATE_BUILDER)
            .with_arg("ValidateOnBuild", stencil_core::AttrValue::Bool(false));
        let meta = variant.resolve(&decl, RecordRole::Anchor).meta.unwrap();
        let plan = RootPlan::new(meta.identity.clone());

        let artifact = BuilderRenderer.render(&meta, &[], &plan).unwrap().unwrap();
        let text = artifact.blocks.join("\n");
        assert!(!text.contains("ValidateAge(_age)"));
    }
}
