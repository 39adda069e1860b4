//! Builder variant configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{AttrValue, KeyWriter};

use super::{flag_unknown_args, read_bool, read_str, ArgIssue};

/// Configuration read from a `GenerateBuilder` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Override for the generated type name. Default: `{Anchor}Builder`.
    pub name: Option<String>,
    /// Whether `Build()` runs member validators. Default: true.
    pub validate_on_build: Option<bool>,
}

impl BuilderConfig {
    pub const ARGS: &'static [&'static str] = &["Name", "ValidateOnBuild"];

    pub fn from_args(args: &BTreeMap<String, AttrValue>) -> (Self, Vec<ArgIssue>) {
        let mut issues = Vec::new();
        flag_unknown_args(args, Self::ARGS, &mut issues);
        let config = Self {
            name: read_str(args, "Name", &mut issues),
            validate_on_build: read_bool(args, "ValidateOnBuild", &mut issues),
        };
        (config, issues)
    }

    /// Returns the effective generated type name.
    pub fn effective_name(&self, anchor_name: &str) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("{anchor_name}Builder"))
    }

    /// Returns whether `Build()` validates, defaulting to true.
    pub fn effective_validate_on_build(&self) -> bool {
        self.validate_on_build.unwrap_or(true)
    }

    pub fn write_key(&self, writer: &mut KeyWriter) {
        writer
            .opt_str_field(self.name.as_deref())
            .bool_field(self.effective_validate_on_build());
    }
}
