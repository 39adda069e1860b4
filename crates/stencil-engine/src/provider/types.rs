//! Host-facing declaration descriptors.
//!
//! These are flat value types with no back-references. The content hash of a
//! declaration covers every semantically relevant field, so two textually
//! identical declarations hash equal regardless of their position in the
//! host's enumeration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use stencil_core::types::{AttrValue, DeclKind, KeyWriter, QualifiedName, SourceRef};

/// One attribute written on a declaration or member.
///
/// Arguments are keyed by name in a `BTreeMap` so iteration order — and
/// therefore every derived hash — is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeUsage {
    pub name: String,
    pub args: BTreeMap<String, AttrValue>,
}

impl AttributeUsage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: BTreeMap::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: AttrValue) -> Self {
        self.args.insert(key.into(), value);
        self
    }

    fn write_key(&self, writer: &mut KeyWriter) {
        writer.str_field(&self.name);
        writer.u64_field(self.args.len() as u64);
        for (key, value) in &self.args {
            writer.str_field(key);
            value.write_key(writer);
        }
    }
}

/// Member visibility as declared in the host language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Internal,
    Protected,
    Private,
}

impl Visibility {
    fn key_tag(&self) -> &'static str {
        match self {
            Visibility::Public => "pub",
            Visibility::Internal => "int",
            Visibility::Protected => "pro",
            Visibility::Private => "pri",
        }
    }
}

/// A property-like member of a type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDecl {
    pub name: String,
    pub type_name: String,
    pub has_setter: bool,
    pub is_collection: bool,
    /// Element type for collection members.
    pub element_type: Option<String>,
    pub is_nullable: bool,
    pub attributes: SmallVec<[AttributeUsage; 2]>,
}

impl MemberDecl {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            has_setter: true,
            is_collection: false,
            element_type: None,
            is_nullable: false,
            attributes: SmallVec::new(),
        }
    }

    pub fn collection(mut self, element_type: impl Into<String>) -> Self {
        self.is_collection = true;
        self.element_type = Some(element_type.into());
        self
    }

    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    pub fn without_setter(mut self) -> Self {
        self.has_setter = false;
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeUsage) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeUsage> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    fn write_key(&self, writer: &mut KeyWriter) {
        writer
            .str_field(&self.name)
            .str_field(&self.type_name)
            .bool_field(self.has_setter)
            .bool_field(self.is_collection)
            .opt_str_field(self.element_type.as_deref())
            .bool_field(self.is_nullable);
        writer.u64_field(self.attributes.len() as u64);
        for attribute in &self.attributes {
            attribute.write_key(writer);
        }
    }
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    pub type_name: String,
    pub has_default: bool,
}

impl ParamDecl {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            has_default: false,
        }
    }

    fn write_key(&self, writer: &mut KeyWriter) {
        writer
            .str_field(&self.name)
            .str_field(&self.type_name)
            .bool_field(self.has_default);
    }
}

/// A method of a type declaration, as far as shape checks need it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    pub is_static: bool,
    pub params: Vec<ParamDecl>,
    pub return_type: Option<String>,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_static: false,
            params: Vec::new(),
            return_type: None,
        }
    }

    pub fn statik(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }

    pub fn returning(mut self, type_name: impl Into<String>) -> Self {
        self.return_type = Some(type_name.into());
        self
    }

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

/// A constructor of a type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtorDecl {
    pub visibility: Visibility,
    pub params: Vec<ParamDecl>,
}

impl CtorDecl {
    pub fn public(params: Vec<ParamDecl>) -> Self {
        Self {
            visibility: Visibility::Public,
            params,
        }
    }

    pub fn private(params: Vec<ParamDecl>) -> Self {
        Self {
            visibility: Visibility::Private,
            params,
        }
    }

    fn write_key(&self, writer: &mut KeyWriter) {
        writer.str_field(self.visibility.key_tag());
        writer.u64_field(self.params.len() as u64);
        for param in &self.params {
            param.write_key(writer);
        }
    }
}

/// One declaration in the host's compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub id: QualifiedName,
    pub kind: DeclKind,
    pub is_partial: bool,
    /// Names of implemented interfaces, as written.
    pub implements: Vec<String>,
    /// Properties in declared order. Emission preserves this order.
    pub members: Vec<MemberDecl>,
    pub methods: Vec<MethodDecl>,
    pub constructors: Vec<CtorDecl>,
    pub attributes: SmallVec<[AttributeUsage; 2]>,
    pub location: SourceRef,
    /// Set when the host's semantic model could not fully resolve this
    /// symbol. Resolution of such a declaration always fails with an Error
    /// diagnostic; other declarations are unaffected.
    pub resolution_failure: Option<String>,
}

impl Declaration {
    pub fn new(id: QualifiedName, kind: DeclKind) -> Self {
        Self {
            id,
            kind,
            is_partial: false,
            implements: Vec::new(),
            members: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            attributes: SmallVec::new(),
            location: SourceRef::none(),
            resolution_failure: None,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeUsage> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// True when the declaration or any of its members carries an attribute.
    pub fn has_any_attribute(&self) -> bool {
        !self.attributes.is_empty() || self.members.iter().any(|m| !m.attributes.is_empty())
    }

    pub fn find_method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn implements_interface(&self, interface: &str) -> bool {
        self.implements.iter().any(|i| i == interface)
    }

    /// Hash of every semantically relevant field. This is the incremental
    /// identity: position in the declaration set does not participate.
    pub fn content_hash(&self) -> u64 {
        let mut writer = KeyWriter::new();
        writer
            .opt_str_field(self.id.namespace.as_deref())
            .str_field(&self.id.name)
            .str_field(kind_tag(self.kind))
            .bool_field(self.is_partial);
        writer.u64_field(self.implements.len() as u64);
        for interface in &self.implements {
            writer.str_field(interface);
        }
        writer.u64_field(self.members.len() as u64);
        for member in &self.members {
            member.write_key(&mut writer);
        }
        writer.u64_field(self.methods.len() as u64);
        for method in &self.methods {
            method.write_key(&mut writer);
        }
        writer.u64_field(self.constructors.len() as u64);
        for ctor in &self.constructors {
            ctor.write_key(&mut writer);
        }
        writer.u64_field(self.attributes.len() as u64);
        for attribute in &self.attributes {
            attribute.write_key(&mut writer);
        }
        writer.opt_str_field(self.resolution_failure.as_deref());
        writer.finish().0
    }
}

fn kind_tag(kind: DeclKind) -> &'static str {
    match kind {
        DeclKind::Class => "class",
        DeclKind::Interface => "interface",
        DeclKind::Record => "record",
        DeclKind::Method => "method",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_hash_ignores_nothing_semantic() {
        let mut a = Declaration::new(QualifiedName::new("App", "User"), DeclKind::Class);
        a.members.push(MemberDecl::new("Email", "string"));
        let mut b = a.clone();
        assert_eq!(a.content_hash(), b.content_hash());

        b.members[0].is_nullable = true;
        assert_ne!(a.content_hash(), b.content_hash());

        // Location is not semantic; the hash does not move with it.
        let before = a.content_hash();
        a.location = SourceRef::new("User.cs:3");
        assert_eq!(a.content_hash(), before);
    }

    #[test]
    fn attribute_arg_order_does_not_matter() {
        let attr_ab = AttributeUsage::new("GenerateBuilder")
            .with_arg("Name", AttrValue::Str("X".into()))
            .with_arg("ValidateOnBuild", AttrValue::Bool(false));
        let attr_ba = AttributeUsage::new("GenerateBuilder")
            .with_arg("ValidateOnBuild", AttrValue::Bool(false))
            .with_arg("Name", AttrValue::Str("X".into()));

        let mut a = Declaration::new(QualifiedName::new("App", "User"), DeclKind::Class);
        a.attributes.push(attr_ab);
        let mut b = Declaration::new(QualifiedName::new("App", "User"), DeclKind::Class);
        b.attributes.push(attr_ba);
        assert_eq!(a.content_hash(), b.content_hash());
    }
}
