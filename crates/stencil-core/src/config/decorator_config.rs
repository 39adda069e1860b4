//! Decorator variant configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{AttrValue, KeyWriter};

use super::{flag_unknown_args, read_str, ArgIssue};

/// Configuration read from a `GenerateDecoratorFactory` marker attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoratorConfig {
    /// Override for the generated factory type name.
    /// Default: `{Interface}DecoratorFactory` with a leading `I` trimmed.
    pub factory_name: Option<String>,
}

impl DecoratorConfig {
    pub const ARGS: &'static [&'static str] = &["FactoryName"];

    pub fn from_args(args: &BTreeMap<String, AttrValue>) -> (Self, Vec<ArgIssue>) {
        let mut issues = Vec::new();
        flag_unknown_args(args, Self::ARGS, &mut issues);
        let config = Self {
            factory_name: read_str(args, "FactoryName", &mut issues),
        };
        (config, issues)
    }

    /// Returns the effective factory name. `IRepository` → `RepositoryDecoratorFactory`.
    pub fn effective_factory_name(&self, interface_name: &str) -> String {
        if let Some(name) = &self.factory_name {
            return name.clone();
        }
        let base = trim_interface_prefix(interface_name);
        format!("{base}DecoratorFactory")
    }

    pub fn write_key(&self, writer: &mut KeyWriter) {
        writer.opt_str_field(self.factory_name.as_deref());
    }
}

/// Trim a conventional `I` interface prefix (`IFoo` → `Foo`).
/// A lone `I` or a prefix not followed by an uppercase letter is kept.
fn trim_interface_prefix(name: &str) -> &str {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some('I'), Some(second)) if second.is_uppercase() => &name[1..],
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interface_prefix_trimmed() {
        let config = DecoratorConfig::default();
        assert_eq!(
            config.effective_factory_name("IRepository"),
            "RepositoryDecoratorFactory"
        );
        assert_eq!(config.effective_factory_name("Widget"), "WidgetDecoratorFactory");
        assert_eq!(config.effective_factory_name("Item"), "ItemDecoratorFactory");
    }

    #[test]
    fn explicit_name_wins() {
        let mut args = BTreeMap::new();
        args.insert(
            "FactoryName".to_string(),
            AttrValue::Str("Decorators".to_string()),
        );
        let (config, issues) = DecoratorConfig::from_args(&args);
        assert!(issues.is_empty());
        assert_eq!(config.effective_factory_name("IRepository"), "Decorators");
    }
}
