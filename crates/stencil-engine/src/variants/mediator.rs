//! Mediator variant — dispatchers wiring request records to handlers.
//!
//! Anchor schema: `Request(Response, DispatcherName)` on a record or class.
//! Satellite schema: `RequestHandler(RequestType)` on a handler class. A
//! request admits at most one handler; unmatched handlers are reported,
//! never silently dropped.

use stencil_core::config::MediatorConfig;
use stencil_core::types::DeclKind;
use stencil_core::{codes, Diagnostic, EmitError};

use crate::crossref::JoinRule;
use crate::emit::{Artifact, Renderer};
use crate::provider::Declaration;
use crate::resolver::{RecordRole, ResolvedMetadata, Resolution, VariantPayload};
use crate::validate::{rules, RootPlan, ValidateContext};

use super::traits::PatternVariant;
use super::{arg_issue_diagnostics, method_sigs};

/// Anchor attribute name.
pub const REQUEST: &str = "Request";
/// Satellite attribute name.
pub const REQUEST_HANDLER: &str = "RequestHandler";

pub struct MediatorVariant;

impl PatternVariant for MediatorVariant {
    fn id(&self) -> &'static str {
        "mediator"
    }

    fn classify(&self, decl: &Declaration) -> Option<RecordRole> {
        match decl.kind {
            DeclKind::Record | DeclKind::Class if decl.has_attribute(REQUEST) => {
                Some(RecordRole::Anchor)
            }
            DeclKind::Class if decl.has_attribute(REQUEST_HANDLER) => Some(RecordRole::Satellite),
            _ => None,
        }
    }

    fn resolve(&self, decl: &Declaration, role: RecordRole) -> Resolution {
        if let Some(reason) = &decl.resolution_failure {
            return Resolution::failed(vec![Diagnostic::error(
                codes::MED001,
                decl.id.clone(),
                decl.location.clone(),
                format!("symbol '{}' could not be resolved: {}", decl.id, reason),
            )]);
        }
        match role {
            RecordRole::Anchor => self.resolve_request(decl),
            RecordRole::Satellite => self.resolve_handler(decl),
        }
    }

    fn join_rule(&self) -> &dyn JoinRule {
        &MediatorJoinRule
    }

    fn validate(&self, root: &ResolvedMetadata, ctx: &ValidateContext<'_>) -> Vec<Diagnostic> {
        let VariantPayload::MediatorRequest { config } = &root.payload else {
            return Vec::new();
        };
        let dispatcher = config.effective_dispatcher_name(&root.identity.name);
        rules::name_collision(codes::MED005, root, ctx, &dispatcher)
            .into_iter()
            .collect()
    }

    fn renderer(&self) -> &dyn Renderer {
        &MediatorRenderer
    }
}

impl MediatorVariant {
    fn resolve_request(&self, decl: &Declaration) -> Resolution {
        let Some(attribute) = decl.attribute(REQUEST) else {
            return Resolution::default();
        };
        let (config, issues) = MediatorConfig::from_args(&attribute.args);
        let diagnostics = arg_issue_diagnostics(decl, issues);

        let meta = ResolvedMetadata::new(
            decl.id.clone(),
            decl.kind,
            RecordRole::Anchor,
            self.id(),
            Vec::new(),
            method_sigs(decl),
            VariantPayload::MediatorRequest { config },
            decl.location.clone(),
        );
        Resolution::ok(meta, diagnostics)
    }

    fn resolve_handler(&self, decl: &Declaration) -> Resolution {
        let Some(attribute) = decl.attribute(REQUEST_HANDLER) else {
            return Resolution::default();
        };
        let request_type = attribute
            .args
            .get(MediatorConfig::HANDLER_REQUEST_TYPE)
            .and_then(stencil_core::AttrValue::as_type_ref)
            .map(str::to_string);

        if request_type.is_none() {
            return Resolution::failed(vec![Diagnostic::error(
                codes::MED003,
                decl.id.clone(),
                decl.location.clone(),
                format!(
                    "handler '{}' omits the RequestType argument on RequestHandler",
                    decl.id
                ),
            )]);
        }

        let meta = ResolvedMetadata::new(
            decl.id.clone(),
            decl.kind,
            RecordRole::Satellite,
            self.id(),
            Vec::new(),
            method_sigs(decl),
            VariantPayload::MediatorHandler { request_type },
            decl.location.clone(),
        );
        Resolution::ok(meta, Vec::new())
    }
}

/// A handler matches the request record its `RequestType` names. The name
/// may be simple or namespace-qualified.
struct MediatorJoinRule;

impl JoinRule for MediatorJoinRule {
    fn matches(&self, satellite: &ResolvedMetadata, anchor: &ResolvedMetadata) -> bool {
        let VariantPayload::MediatorHandler {
            request_type: Some(request_type),
        } = &satellite.payload
        else {
            return false;
        };
        request_type == &anchor.identity.name || request_type == &anchor.identity.to_string()
    }

    fn exclusive_anchor(&self) -> bool {
        true
    }

    fn unmatched_satellite(&self, satellite: &ResolvedMetadata) -> Option<Diagnostic> {
        let VariantPayload::MediatorHandler {
            request_type: Some(request_type),
        } = &satellite.payload
        else {
            return None;
        };
        Some(Diagnostic::error(
            codes::MED002,
            satellite.identity.clone(),
            satellite.location.clone(),
            format!(
                "handler '{}' references request type '{}' which has no Request record",
                satellite.identity, request_type
            ),
        ))
    }

    fn crowded_anchor(
        &self,
        anchor: &ResolvedMetadata,
        kept: &ResolvedMetadata,
        candidates: usize,
    ) -> Option<Diagnostic> {
        Some(Diagnostic::warning(
            codes::MED004,
            anchor.identity.clone(),
            anchor.location.clone(),
            format!(
                "request '{}' has {} handlers; dispatching to '{}' by lexicographic order",
                anchor.identity, candidates, kept.identity
            ),
        ))
    }
}

/// Default mediator renderer: a static dispatcher per request with exactly
/// one handler.
pub struct MediatorRenderer;

impl Renderer for MediatorRenderer {
    fn render(
        &self,
        root: &ResolvedMetadata,
        satellites: &[&ResolvedMetadata],
        _plan: &RootPlan,
    ) -> Result<Option<Artifact>, EmitError> {
        let VariantPayload::MediatorRequest { config } = &root.payload else {
            return Ok(None);
        };
        // A request with no handler produces no dispatcher. The reverse
        // case (handler with no request) is an Error from the join.
        let Some(handler) = satellites.first() else {
            return Ok(None);
        };

        let request = &root.identity.name;
        let dispatcher = config.effective_dispatcher_name(request);
        let handler_name = &handler.identity.name;

        let block = match &config.response_type {
            Some(response) => format!(
                "public static {response} Dispatch({request} request, {handler_name} handler)\n{{\n    return handler.Handle(request);\n}}"
            ),
            None => format!(
                "public static void Dispatch({request} request, {handler_name} handler)\n{{\n    handler.Handle(request);\n}}"
            ),
        };

        Ok(Some(Artifact {
            hint_name: dispatcher.clone(),
            namespace: root.identity.namespace.clone(),
            type_decl: format!("public static class {dispatcher}"),
            blocks: vec![block],
        }))
    }
}
