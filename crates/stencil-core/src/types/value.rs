//! Literal attribute argument values.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::key::KeyWriter;

/// A literal value written in an attribute argument position.
///
/// `TypeRef` carries the textual name from a `typeof(X)`-style argument;
/// resolution against the declaration set happens in the resolver, never here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttrValue {
    Str(String),
    Int(i64),
    Bool(bool),
    TypeRef(String),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_type_ref(&self) -> Option<&str> {
        match self {
            AttrValue::TypeRef(t) => Some(t),
            _ => None,
        }
    }

    /// Fold the value into a decision key.
    pub fn write_key(&self, writer: &mut KeyWriter) {
        match self {
            AttrValue::Str(s) => {
                writer.tag("s").str_field(s);
            }
            AttrValue::Int(i) => {
                writer.tag("i").u64_field(*i as u64);
            }
            AttrValue::Bool(b) => {
                writer.tag("b").bool_field(*b);
            }
            AttrValue::TypeRef(t) => {
                writer.tag("t").str_field(t);
            }
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Str(s) => write!(f, "\"{}\"", s),
            AttrValue::Int(i) => write!(f, "{}", i),
            AttrValue::Bool(b) => write!(f, "{}", b),
            AttrValue::TypeRef(t) => write!(f, "typeof({})", t),
        }
    }
}
