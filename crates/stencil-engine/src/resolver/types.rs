//! Resolved metadata records.
//!
//! Records are immutable and compared by value; re-resolution produces a new
//! record whose decision key is checked against the cached one. No record
//! ever holds a reference to another record — cross-references live in a
//! side table keyed by identity.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use stencil_core::config::{BuilderConfig, DecoratorConfig, MediatorConfig, SingletonConfig};
use stencil_core::types::{DeclKind, DecisionKey, KeyWriter, QualifiedName, SourceRef};
use stencil_core::Diagnostic;

/// Whether a record anchors generated output or decorates another record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordRole {
    Anchor,
    Satellite,
}

/// Collection member details with effective method names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionMeta {
    pub element_type: String,
    pub add_name: String,
    pub add_range_name: String,
    pub clear_name: String,
    pub count_name: String,
}

/// One member descriptor of a resolved record, in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberMeta {
    pub name: String,
    pub type_name: String,
    pub required: bool,
    pub ignored: bool,
    pub nullable: bool,
    pub has_setter: bool,
    pub collection: Option<CollectionMeta>,
    /// Name of the validator method referenced by the member, if any.
    pub validator: Option<String>,
}

impl MemberMeta {
    /// A member participates in generation when it is settable and not
    /// ignored. Ignored wins over required by documented precedence.
    pub fn usable(&self) -> bool {
        self.has_setter && !self.ignored
    }

    /// Required-and-usable members get a runtime guard in generated code.
    pub fn guarded(&self) -> bool {
        self.required && self.usable()
    }

    fn write_key(&self, writer: &mut KeyWriter) {
        writer
            .str_field(&self.name)
            .str_field(&self.type_name)
            .bool_field(self.required)
            .bool_field(self.ignored)
            .bool_field(self.nullable)
            .bool_field(self.has_setter)
            .opt_str_field(self.validator.as_deref());
        match &self.collection {
            Some(c) => {
                writer
                    .bool_field(true)
                    .str_field(&c.element_type)
                    .str_field(&c.add_name)
                    .str_field(&c.add_range_name)
                    .str_field(&c.clear_name)
                    .str_field(&c.count_name);
            }
            None => {
                writer.bool_field(false);
            }
        }
    }
}

/// A parameter signature kept for rendering and shape checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSig {
    pub name: String,
    pub type_name: String,
}

impl ParamSig {
    fn write_key(&self, writer: &mut KeyWriter) {
        writer.str_field(&self.name).str_field(&self.type_name);
    }
}

/// A method signature kept for validator/factory shape checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSig {
    pub name: String,
    pub is_static: bool,
    pub params: Vec<ParamSig>,
    pub return_type: Option<String>,
}

impl MethodSig {
    fn write_key(&self, writer: &mut KeyWriter) {
        writer
            .str_field(&self.name)
            .bool_field(self.is_static)
            .opt_str_field(self.return_type.as_deref());
        writer.u64_field(self.params.len() as u64);
        for param in &self.params {
            param.write_key(writer);
        }
    }
}

/// Pattern-specific portion of a resolved record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariantPayload {
    Builder {
        config: BuilderConfig,
    },
    DecoratorAnchor {
        config: DecoratorConfig,
    },
    DecoratorSatellite {
        /// Target interface declared via `Target = typeof(X)`, if any.
        declared_target: Option<String>,
        /// Interfaces the satellite implements, as written.
        implements: Vec<String>,
        /// Constructor parameters after the leading interface parameter.
        extra_ctor_params: Vec<ParamSig>,
    },
    MediatorRequest {
        config: MediatorConfig,
    },
    MediatorHandler {
        request_type: Option<String>,
    },
    Singleton {
        config: SingletonConfig,
    },
}

impl VariantPayload {
    fn write_key(&self, writer: &mut KeyWriter) {
        match self {
            VariantPayload::Builder { config } => {
                writer.tag("builder");
                config.write_key(writer);
            }
            VariantPayload::DecoratorAnchor { config } => {
                writer.tag("dec-anchor");
                config.write_key(writer);
            }
            VariantPayload::DecoratorSatellite {
                declared_target,
                implements,
                extra_ctor_params,
            } => {
                writer.tag("dec-satellite");
                writer.opt_str_field(declared_target.as_deref());
                writer.u64_field(implements.len() as u64);
                for interface in implements {
                    writer.str_field(interface);
                }
                writer.u64_field(extra_ctor_params.len() as u64);
                for param in extra_ctor_params {
                    param.write_key(writer);
                }
            }
            VariantPayload::MediatorRequest { config } => {
                writer.tag("med-request");
                config.write_key(writer);
            }
            VariantPayload::MediatorHandler { request_type } => {
                writer.tag("med-handler");
                writer.opt_str_field(request_type.as_deref());
            }
            VariantPayload::Singleton { config } => {
                writer.tag("singleton");
                config.write_key(writer);
            }
        }
    }
}

/// Immutable semantic record for one declaration under one variant.
// `variant` is a &'static str id, so records serialize out but do not
// round-trip back in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedMetadata {
    pub identity: QualifiedName,
    pub kind: DeclKind,
    pub role: RecordRole,
    /// Owning variant id (`"builder"`, `"decorator"`, …).
    pub variant: &'static str,
    /// Member descriptors in declared order.
    pub members: Vec<MemberMeta>,
    /// Method signatures for shape checks.
    pub methods: Vec<MethodSig>,
    pub payload: VariantPayload,
    pub location: SourceRef,
    /// Stable hash of every field above; computed once at construction.
    pub decision_key: DecisionKey,
}

impl ResolvedMetadata {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        identity: QualifiedName,
        kind: DeclKind,
        role: RecordRole,
        variant: &'static str,
        members: Vec<MemberMeta>,
        methods: Vec<MethodSig>,
        payload: VariantPayload,
        location: SourceRef,
    ) -> Self {
        let mut writer = KeyWriter::new();
        writer
            .str_field(variant)
            .opt_str_field(identity.namespace.as_deref())
            .str_field(&identity.name)
            .str_field(match role {
                RecordRole::Anchor => "anchor",
                RecordRole::Satellite => "satellite",
            });
        writer.u64_field(members.len() as u64);
        for member in &members {
            member.write_key(&mut writer);
        }
        writer.u64_field(methods.len() as u64);
        for method in &methods {
            method.write_key(&mut writer);
        }
        payload.write_key(&mut writer);
        let decision_key = writer.finish();

        Self {
            identity,
            kind,
            role,
            variant,
            members,
            methods,
            payload,
            location,
            decision_key,
        }
    }

    /// Members that participate in generation, declared order preserved.
    pub fn usable_members(&self) -> impl Iterator<Item = &MemberMeta> {
        self.members.iter().filter(|m| m.usable())
    }

    pub fn find_method(&self, name: &str) -> Option<&MethodSig> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// Result of resolving one declaration under one variant.
#[derive(Debug, Default)]
pub struct Resolution {
    pub meta: Option<Arc<ResolvedMetadata>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    pub fn ok(meta: ResolvedMetadata, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            meta: Some(Arc::new(meta)),
            diagnostics,
        }
    }

    pub fn failed(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            meta: None,
            diagnostics,
        }
    }
}
