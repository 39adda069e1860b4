//! Singleton variant configuration.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{AttrValue, KeyWriter};

use super::{flag_unknown_args, read_str, ArgIssue};

/// Instance-construction strategy for generated singletons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SingletonStrategy {
    /// Host runtime's lazy-initialization primitive.
    #[default]
    Lazy,
    /// Double-checked locking over a volatile field.
    DoubleChecked,
    /// Eager static initialization.
    Eager,
}

impl SingletonStrategy {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "Lazy" => Some(Self::Lazy),
            "DoubleChecked" => Some(Self::DoubleChecked),
            "Eager" => Some(Self::Eager),
            _ => None,
        }
    }
}

impl fmt::Display for SingletonStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lazy => write!(f, "Lazy"),
            Self::DoubleChecked => write!(f, "DoubleChecked"),
            Self::Eager => write!(f, "Eager"),
        }
    }
}

/// Configuration read from a `Singleton` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingletonConfig {
    /// Construction strategy. Default: [`SingletonStrategy::Lazy`].
    pub strategy: Option<SingletonStrategy>,
}

impl SingletonConfig {
    pub const ARGS: &'static [&'static str] = &["Strategy"];

    pub fn from_args(args: &BTreeMap<String, AttrValue>) -> (Self, Vec<ArgIssue>) {
        let mut issues = Vec::new();
        flag_unknown_args(args, Self::ARGS, &mut issues);
        let strategy = match read_str(args, "Strategy", &mut issues) {
            Some(raw) => match SingletonStrategy::parse(&raw) {
                Some(s) => Some(s),
                None => {
                    issues.push(ArgIssue {
                        code: crate::diagnostics::codes::SIN003,
                        message: format!(
                            "unknown singleton strategy '{raw}', using {}",
                            SingletonStrategy::default()
                        ),
                    });
                    None
                }
            },
            None => None,
        };
        (Self { strategy }, issues)
    }

    /// Returns the effective strategy, defaulting to `Lazy`.
    pub fn effective_strategy(&self) -> SingletonStrategy {
        self.strategy.unwrap_or_default()
    }

    pub fn write_key(&self, writer: &mut KeyWriter) {
        writer.str_field(&self.effective_strategy().to_string());
    }
}
