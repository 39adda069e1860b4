//! Decorator variant — factory methods for decorator classes.
//!
//! Anchor schema: `GenerateDecoratorFactory(FactoryName)` marker on an
//! interface. Satellite schema: `Decorator(Target)` on a class implementing
//! the marked interface, whose first constructor parameter is that
//! interface. The generated factory exposes one extension-style method per
//! decorator taking the remaining constructor parameters in declared order.

use stencil_core::config::DecoratorConfig;
use stencil_core::types::DeclKind;
use stencil_core::{codes, Diagnostic, EmitError};

use crate::crossref::JoinRule;
use crate::emit::{Artifact, Renderer};
use crate::provider::Declaration;
use crate::resolver::{
    ParamSig, RecordRole, ResolvedMetadata, Resolution, VariantPayload,
};
use crate::validate::{rules, RootPlan, ValidateContext};

use super::traits::PatternVariant;
use super::{arg_issue_diagnostics, method_sigs};

/// Anchor marker attribute name.
pub const GENERATE_DECORATOR_FACTORY: &str = "GenerateDecoratorFactory";
/// Satellite attribute name.
pub const DECORATOR: &str = "Decorator";

pub struct DecoratorVariant;

impl PatternVariant for DecoratorVariant {
    fn id(&self) -> &'static str {
        "decorator"
    }

    fn classify(&self, decl: &Declaration) -> Option<RecordRole> {
        match decl.kind {
            DeclKind::Interface if decl.has_attribute(GENERATE_DECORATOR_FACTORY) => {
                Some(RecordRole::Anchor)
            }
            DeclKind::Class if decl.has_attribute(DECORATOR) => Some(RecordRole::Satellite),
            _ => None,
        }
    }

    fn resolve(&self, decl: &Declaration, role: RecordRole) -> Resolution {
        if let Some(reason) = &decl.resolution_failure {
            return Resolution::failed(vec![Diagnostic::error(
                codes::DEC001,
                decl.id.clone(),
                decl.location.clone(),
                format!("symbol '{}' could not be resolved: {}", decl.id, reason),
            )]);
        }
        match role {
            RecordRole::Anchor => self.resolve_anchor(decl),
            RecordRole::Satellite => self.resolve_satellite(decl),
        }
    }

    fn join_rule(&self) -> &dyn JoinRule {
        &DecoratorJoinRule
    }

    fn validate(&self, root: &ResolvedMetadata, ctx: &ValidateContext<'_>) -> Vec<Diagnostic> {
        let VariantPayload::DecoratorAnchor { config } = &root.payload else {
            return Vec::new();
        };
        let factory = config.effective_factory_name(&root.identity.name);
        rules::name_collision(codes::DEC005, root, ctx, &factory)
            .into_iter()
            .collect()
    }

    fn renderer(&self) -> &dyn Renderer {
        &DecoratorRenderer
    }
}

impl DecoratorVariant {
    fn resolve_anchor(&self, decl: &Declaration) -> Resolution {
        let Some(attribute) = decl.attribute(GENERATE_DECORATOR_FACTORY) else {
            return Resolution::default();
        };
        let (config, issues) = DecoratorConfig::from_args(&attribute.args);
        let diagnostics = arg_issue_diagnostics(decl, issues);

        let meta = ResolvedMetadata::new(
            decl.id.clone(),
            decl.kind,
            RecordRole::Anchor,
            self.id(),
            Vec::new(),
            method_sigs(decl),
            VariantPayload::DecoratorAnchor { config },
            decl.location.clone(),
        );
        Resolution::ok(meta, diagnostics)
    }

    fn resolve_satellite(&self, decl: &Declaration) -> Resolution {
        let Some(attribute) = decl.attribute(DECORATOR) else {
            return Resolution::default();
        };
        let declared_target = attribute
            .args
            .get("Target")
            .and_then(stencil_core::AttrValue::as_type_ref)
            .map(str::to_string);

        // The decorated interface must be the first constructor parameter;
        // the factory forwards the remaining parameters in declared order.
        let interface_first_ctor = decl.constructors.iter().find(|ctor| {
            ctor.params
                .first()
                .is_some_and(|p| decl.implements_interface(&p.type_name))
        });
        let Some(ctor) = interface_first_ctor else {
            return Resolution::failed(vec![Diagnostic::error(
                codes::DEC004,
                decl.id.clone(),
                decl.location.clone(),
                format!(
                    "decorator '{}' has no constructor taking a decorated interface as its first parameter",
                    decl.id
                ),
            )]);
        };

        let extra_ctor_params = ctor.params[1..]
            .iter()
            .map(|p| ParamSig {
                name: p.name.clone(),
                type_name: p.type_name.clone(),
            })
            .collect();

        let meta = ResolvedMetadata::new(
            decl.id.clone(),
            decl.kind,
            RecordRole::Satellite,
            self.id(),
            Vec::new(),
            method_sigs(decl),
            VariantPayload::DecoratorSatellite {
                declared_target,
                implements: decl.implements.clone(),
                extra_ctor_params,
            },
            decl.location.clone(),
        );
        Resolution::ok(meta, Vec::new())
    }
}

/// Satellite matches an anchor iff it implements the anchor's interface and
/// any declared target agrees. Marker presence is implied by membership in
/// the anchor set.
struct DecoratorJoinRule;

impl JoinRule for DecoratorJoinRule {
    fn matches(&self, satellite: &ResolvedMetadata, anchor: &ResolvedMetadata) -> bool {
        let VariantPayload::DecoratorSatellite {
            declared_target,
            implements,
            ..
        } = &satellite.payload
        else {
            return false;
        };
        let implemented = implements.iter().any(|i| i == &anchor.identity.name);
        let target_agrees = declared_target
            .as_deref()
            .map_or(true, |t| t == anchor.identity.name);
        implemented && target_agrees
    }

    fn unmatched_satellite(&self, satellite: &ResolvedMetadata) -> Option<Diagnostic> {
        let VariantPayload::DecoratorSatellite { declared_target, .. } = &satellite.payload else {
            return None;
        };
        let message = match declared_target {
            Some(target) => format!(
                "decorator '{}' declares target '{}' but does not implement it, or '{}' carries no GenerateDecoratorFactory marker",
                satellite.identity, target, target
            ),
            None => format!(
                "decorator '{}' implements no interface marked with GenerateDecoratorFactory",
                satellite.identity
            ),
        };
        Some(Diagnostic::error(
            codes::DEC002,
            satellite.identity.clone(),
            satellite.location.clone(),
            message,
        ))
    }

    fn ambiguous_satellite(
        &self,
        satellite: &ResolvedMetadata,
        chosen: &ResolvedMetadata,
        candidates: usize,
    ) -> Option<Diagnostic> {
        Some(Diagnostic::info(
            codes::DEC003,
            satellite.identity.clone(),
            satellite.location.clone(),
            format!(
                "decorator '{}' matches {} marked interfaces; '{}' chosen by lexicographic order",
                satellite.identity, candidates, chosen.identity
            ),
        ))
    }
}

/// Default decorator renderer: one static extension-style factory method per
/// correlated decorator, in lexicographic decorator order.
pub struct DecoratorRenderer;

impl Renderer for DecoratorRenderer {
    fn render(
        &self,
        root: &ResolvedMetadata,
        satellites: &[&ResolvedMetadata],
        _plan: &RootPlan,
    ) -> Result<Option<Artifact>, EmitError> {
        let VariantPayload::DecoratorAnchor { config } = &root.payload else {
            return Ok(None);
        };
        // Empty satellite set is not an error; there is simply no artifact.
        if satellites.is_empty() {
            return Ok(None);
        }

        let interface = &root.identity.name;
        let factory = config.effective_factory_name(interface);

        let blocks = satellites
            .iter()
            .map(|satellite| render_factory_method(interface, satellite))
            .collect();

        Ok(Some(Artifact {
            hint_name: factory.clone(),
            namespace: root.identity.namespace.clone(),
            type_decl: format!("public static class {factory}"),
            blocks,
        }))
    }
}

fn render_factory_method(interface: &str, satellite: &ResolvedMetadata) -> String {
    let decorator = &satellite.identity.name;
    let extra_params = match &satellite.payload {
        VariantPayload::DecoratorSatellite {
            extra_ctor_params, ..
        } => extra_ctor_params.as_slice(),
        _ => &[],
    };

    let mut signature = format!("public static {interface} With{decorator}(this {interface} inner");
    let mut arguments = String::from("inner");
    for param in extra_params {
        signature.push_str(&format!(", {} {}", param.type_name, param.name));
        arguments.push_str(&format!(", {}", param.name));
    }
    signature.push(')');

    format!("{signature}\n{{\n    return new {decorator}({arguments});\n}}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{AttributeUsage, CtorDecl, ParamDecl};
    use stencil_core::types::QualifiedName;

    fn repo_interface() -> Declaration {
        let mut decl = Declaration::new(QualifiedName::new("App", "IRepository"), DeclKind::Interface);
        decl.attributes
            .push(AttributeUsage::new(GENERATE_DECORATOR_FACTORY));
        decl
    }

    fn retry_decorator() -> Declaration {
        let mut decl = Declaration::new(QualifiedName::new("App", "RetryDecorator"), DeclKind::Class);
        decl.attributes.push(AttributeUsage::new(DECORATOR));
        decl.implements.push("IRepository".to_string());
        decl.constructors.push(CtorDecl::public(vec![
            ParamDecl::new("inner", "IRepository"),
            ParamDecl::new("maxRetries", "int"),
            ParamDecl::new("policy", "string"),
        ]));
        decl
    }

    #[test]
    fn satellite_keeps_non_interface_ctor_params_in_order() {
        let variant = DecoratorVariant;
        let decl = retry_decorator();
        let meta = variant.resolve(&decl, RecordRole::Satellite).meta.unwrap();
        let VariantPayload::DecoratorSatellite {
            extra_ctor_params, ..
        } = &meta.payload
        else {
            panic!("wrong payload");
        };
        assert_eq!(extra_ctor_params.len(), 2);
        assert_eq!(extra_ctor_params[0].type_name, "int");
        assert_eq!(extra_ctor_params[1].type_name, "string");
    }

    #[test]
    fn satellite_without_interface_ctor_fails_resolution() {
        let variant = DecoratorVariant;
        let mut decl = retry_decorator();
        decl.constructors.clear();
        decl.constructors
            .push(CtorDecl::public(vec![ParamDecl::new("maxRetries", "int")]));

        let resolution = variant.resolve(&decl, RecordRole::Satellite);
        assert!(resolution.meta.is_none());
        assert_eq!(resolution.diagnostics[0].code, codes::DEC004);
    }

    #[test]
    fn scenario_three_factory_method() {
        let variant = DecoratorVariant;
        let anchor = variant
            .resolve(&repo_interface(), RecordRole::Anchor)
            .meta
            .unwrap();
        let satellite = variant
            .resolve(&retry_decorator(), RecordRole::Satellite)
            .meta
            .unwrap();
        let plan = RootPlan::new(anchor.identity.clone());

        let artifact = DecoratorRenderer
            .render(&anchor, &[&satellite], &plan)
            .unwrap()
            .unwrap();
        assert_eq!(artifact.hint_name, "RepositoryDecoratorFactory");
        assert_eq!(artifact.blocks.len(), 1);
        assert!(artifact.blocks[0]
            .contains("WithRetryDecorator(this IRepository inner, int maxRetries, string policy)"));
        assert!(artifact.blocks[0].contains("new RetryDecorator(inner, maxRetries, policy)"));
    }

    #[test]
    fn empty_satellite_set_emits_nothing() {
        let variant = DecoratorVariant;
        let anchor = variant
            .resolve(&repo_interface(), RecordRole::Anchor)
            .meta
            .unwrap();
        let plan = RootPlan::new(anchor.identity.clone());
        assert!(DecoratorRenderer.render(&anchor, &[], &plan).unwrap().is_none());
    }
}
