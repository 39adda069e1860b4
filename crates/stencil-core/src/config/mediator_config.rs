//! Mediator variant configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{AttrValue, KeyWriter};

use super::{flag_unknown_args, read_str, read_type_ref, ArgIssue};

/// Configuration read from a `Request` attribute on a request record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediatorConfig {
    /// Response type name from `Response = typeof(X)`. `None` for
    /// fire-and-forget requests.
    pub response_type: Option<String>,
    /// Override for the generated dispatcher type name.
    /// Default: `{Request}Dispatcher`.
    pub dispatcher_name: Option<String>,
}

impl MediatorConfig {
    pub const ARGS: &'static [&'static str] = &["Response", "DispatcherName"];

    /// Argument name a handler uses to declare its request type.
    pub const HANDLER_REQUEST_TYPE: &'static str = "RequestType";

    pub fn from_args(args: &BTreeMap<String, AttrValue>) -> (Self, Vec<ArgIssue>) {
        let mut issues = Vec::new();
        flag_unknown_args(args, Self::ARGS, &mut issues);
        let config = Self {
            response_type: read_type_ref(args, "Response", &mut issues),
            dispatcher_name: read_str(args, "DispatcherName", &mut issues),
        };
        (config, issues)
    }

    /// Returns the effective dispatcher type name.
    pub fn effective_dispatcher_name(&self, request_name: &str) -> String {
        self.dispatcher_name
            .clone()
            .unwrap_or_else(|| format!("{request_name}Dispatcher"))
    }

    pub fn write_key(&self, writer: &mut KeyWriter) {
        writer
            .opt_str_field(self.response_type.as_deref())
            .opt_str_field(self.dispatcher_name.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_type_read_from_type_ref() {
        let mut args = BTreeMap::new();
        args.insert(
            "Response".to_string(),
            AttrValue::TypeRef("UserDto".to_string()),
        );
        let (config, issues) = MediatorConfig::from_args(&args);
        assert!(issues.is_empty());
        assert_eq!(config.response_type.as_deref(), Some("UserDto"));
        assert_eq!(
            config.effective_dispatcher_name("GetUser"),
            "GetUserDispatcher"
        );
    }
}
