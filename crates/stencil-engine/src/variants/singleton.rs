//! Singleton variant — instance accessors for annotated partial classes.
//!
//! Anchor schema: `Singleton(Strategy)` on a partial class with a private
//! parameterless constructor. The generated partial supplies the accessor
//! for the chosen strategy. The generator itself holds no global state —
//! only its output does.

use stencil_core::config::{SingletonConfig, SingletonStrategy};
use stencil_core::types::DeclKind;
use stencil_core::{codes, Diagnostic, EmitError};

use crate::crossref::JoinRule;
use crate::emit::{Artifact, Renderer};
use crate::provider::{Declaration, Visibility};
use crate::resolver::{RecordRole, ResolvedMetadata, Resolution, VariantPayload};
use crate::validate::{RootPlan, ValidateContext};

use super::traits::PatternVariant;
use super::{arg_issue_diagnostics, method_sigs, NoSatellites};

/// Anchor attribute name.
pub const SINGLETON: &str = "Singleton";

pub struct SingletonVariant;

impl PatternVariant for SingletonVariant {
    fn id(&self) -> &'static str {
        "singleton"
    }

    fn classify(&self, decl: &Declaration) -> Option<RecordRole> {
        (decl.kind == DeclKind::Class && decl.has_attribute(SINGLETON)).then_some(RecordRole::Anchor)
    }

    fn resolve(&self, decl: &Declaration, _role: RecordRole) -> Resolution {
        if let Some(reason) = &decl.resolution_failure {
            return Resolution::failed(vec![Diagnostic::error(
                codes::SIN001,
                decl.id.clone(),
                decl.location.clone(),
                format!("symbol '{}' could not be resolved: {}", decl.id, reason),
            )]);
        }

        // Generation requires a partial class with a private parameterless
        // constructor; anything else is fatal for this root only.
        let private_parameterless = decl
            .constructors
            .iter()
            .any(|ctor| ctor.visibility == Visibility::Private && ctor.params.is_empty());
        if !decl.is_partial || !private_parameterless {
            return Resolution::failed(vec![Diagnostic::error(
                codes::SIN002,
                decl.id.clone(),
                decl.location.clone(),
                format!(
                    "'{}' must be a partial class with a private parameterless constructor to generate a singleton",
                    decl.id
                ),
            )]);
        }

        let Some(attribute) = decl.attribute(SINGLETON) else {
            return Resolution::default();
        };
        let (config, issues) = SingletonConfig::from_args(&attribute.args);
        let diagnostics = arg_issue_diagnostics(decl, issues);

        let meta = ResolvedMetadata::new(
            decl.id.clone(),
            decl.kind,
            RecordRole::Anchor,
            self.id(),
            Vec::new(),
            method_sigs(decl),
            VariantPayload::Singleton { config },
            decl.location.clone(),
        );
        Resolution::ok(meta, diagnostics)
    }

    fn join_rule(&self) -> &dyn JoinRule {
        &NoSatellites
    }

    fn validate(&self, _root: &ResolvedMetadata, _ctx: &ValidateContext<'_>) -> Vec<Diagnostic> {
        // The generated members live inside the annotated partial class, so
        // there is no new type name to collide and no member set to check.
        Vec::new()
    }

    fn renderer(&self) -> &dyn Renderer {
        &SingletonRenderer
    }
}

/// Default singleton renderer: one strategy-specific accessor block inside a
/// partial class continuation.
pub struct SingletonRenderer;

impl Renderer for SingletonRenderer {
    fn render(
        &self,
        root: &ResolvedMetadata,
        _satellites: &[&ResolvedMetadata],
        _plan: &RootPlan,
    ) -> Result<Option<Artifact>, EmitError> {
        let VariantPayload::Singleton { config } = &root.payload else {
            return Ok(None);
        };

        let name = &root.identity.name;
        let block = match config.effective_strategy() {
            SingletonStrategy::Lazy => format!(
                "private static readonly Lazy<{name}> _instance =\n    new Lazy<{name}>(() => new {name}());\n\npublic static {name} Instance => _instance.Value;"
            ),
            SingletonStrategy::DoubleChecked => format!(
                "private static volatile {name} _instance;\nprivate static readonly object _gate = new object();\n\npublic static {name} Instance\n{{\n    get\n    {{\n        if (_instance == null)\n        {{\n            lock (_gate)\n            {{\n                if (_instance == null)\n                {{\n                    _instance = new {name}();\n                }}\n            }}\n        }}\n        return _instance;\n    }}\n}}"
            ),
            SingletonStrategy::Eager => format!(
                "private static readonly {name} _instance = new {name}();\n\npublic static {name} Instance => _instance;"
            ),
        };

        Ok(Some(Artifact {
            hint_name: format!("{name}Singleton"),
            namespace: root.identity.namespace.clone(),
            type_decl: format!("partial class {name}"),
            blocks: vec![block],
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{AttributeUsage, CtorDecl};
    use stencil_core::types::QualifiedName;
    use stencil_core::AttrValue;

    fn service_decl() -> Declaration {
        let mut decl =
            Declaration::new(QualifiedName::new("App", "ConfigurationService"), DeclKind::Class);
        decl.is_partial = true;
        decl.constructors.push(CtorDecl::private(Vec::new()));
        decl.attributes.push(AttributeUsage::new(SINGLETON));
        decl
    }

    #[test]
    fn missing_ctor_shape_is_fatal_for_root() {
        let variant = SingletonVariant;
        let mut decl = service_decl();
        decl.constructors.clear();

        let resolution = variant.resolve(&decl, RecordRole::Anchor);
        assert!(resolution.meta.is_none());
        assert_eq!(resolution.diagnostics[0].code, codes::SIN002);
        assert!(resolution.diagnostics[0].blocks_root());
    }

    #[test]
    fn non_partial_class_is_fatal_for_root() {
        let variant = SingletonVariant;
        let mut decl = service_decl();
        decl.is_partial = false;

        let resolution = variant.resolve(&decl, RecordRole::Anchor);
        assert!(resolution.meta.is_none());
    }

    #[test]
    fn lazy_strategy_is_the_default_rendering() {
        let variant = SingletonVariant;
        let meta = variant.resolve(&service_decl(), RecordRole::Anchor).meta.unwrap();
        let plan = RootPlan::new(meta.identity.clone());

        let artifact = SingletonRenderer.render(&meta, &[], &plan).unwrap().unwrap();
        assert_eq!(artifact.hint_name, "ConfigurationServiceSingleton");
        assert!(artifact.blocks[0].contains("Lazy<ConfigurationService>"));
        assert!(artifact.type_decl.contains("partial class"));
    }

    #[test]
    fn double_checked_strategy_renders_lock() {
        let variant = SingletonVariant;
        let mut decl = service_decl();
        decl.attributes[0] = AttributeUsage::new(SINGLETON)
            .with_arg("Strategy", AttrValue::Str("DoubleChecked".into()));
        let meta = variant.resolve(&decl, RecordRole::Anchor).meta.unwrap();
        let plan = RootPlan::new(meta.identity.clone());

        let artifact = SingletonRenderer.render(&meta, &[], &plan).unwrap().unwrap();
        assert!(artifact.blocks[0].contains("lock (_gate)"));
    }
}
