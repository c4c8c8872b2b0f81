//! Heterogeneous configuration values.
//!
//! Routing configuration arrives as a tree of maps, lists and scalars, with
//! handlers mixed in when the tree is built in code. `ConfigValue` models one
//! node of that tree; `ConfigMap` is one routing scope's directives.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::handler::Handler;

/// Directives of a single routing scope, keyed by directive name.
pub type ConfigMap = BTreeMap<String, ConfigValue>;

/// A single configuration value.
#[derive(Debug, Clone, Default)]
pub enum ConfigValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<ConfigValue>),
    Map(ConfigMap),
    Handler(Handler),
}

impl ConfigValue {
    /// Human-readable type name, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::List(_) => "list",
            ConfigValue::Map(_) => "map",
            ConfigValue::Handler(_) => "handler",
        }
    }

    /// Returns true for values that carry no directive.
    ///
    /// `Null`, `false`, the empty string and empty collections are empty.
    /// Numbers never are.
    pub fn is_empty(&self) -> bool {
        match self {
            ConfigValue::Null => true,
            ConfigValue::Bool(b) => !b,
            ConfigValue::String(s) => s.is_empty(),
            ConfigValue::List(items) => items.is_empty(),
            ConfigValue::Map(map) => map.is_empty(),
            ConfigValue::Integer(_) | ConfigValue::Float(_) | ConfigValue::Handler(_) => false,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ConfigMap> {
        match self {
            ConfigValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// String form of a scalar, `None` for everything else.
    pub fn scalar_string(&self) -> Option<String> {
        match self {
            ConfigValue::Bool(b) => Some(b.to_string()),
            ConfigValue::Integer(i) => Some(i.to_string()),
            ConfigValue::Float(f) => Some(f.to_string()),
            ConfigValue::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Renders the value for an error message: scalars print as themselves,
    /// anything else prints as its type name.
    pub fn render(&self) -> String {
        self.scalar_string()
            .unwrap_or_else(|| self.type_name().to_string())
    }

    /// Flattens a scalar or a list of scalars into strings.
    ///
    /// Non-scalar list elements are skipped.
    pub fn string_list(&self) -> Vec<String> {
        match self {
            ConfigValue::List(items) => items.iter().filter_map(Self::scalar_string).collect(),
            other => other.scalar_string().into_iter().collect(),
        }
    }
}

impl PartialEq for ConfigValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ConfigValue::Null, ConfigValue::Null) => true,
            (ConfigValue::Bool(a), ConfigValue::Bool(b)) => a == b,
            (ConfigValue::Integer(a), ConfigValue::Integer(b)) => a == b,
            (ConfigValue::Float(a), ConfigValue::Float(b)) => a == b,
            (ConfigValue::String(a), ConfigValue::String(b)) => a == b,
            (ConfigValue::List(a), ConfigValue::List(b)) => a == b,
            (ConfigValue::Map(a), ConfigValue::Map(b)) => a == b,
            (ConfigValue::Handler(a), ConfigValue::Handler(b)) => a.same_as(b),
            _ => false,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConfigValue::Null => serializer.serialize_unit(),
            ConfigValue::Bool(b) => serializer.serialize_bool(*b),
            ConfigValue::Integer(i) => serializer.serialize_i64(*i),
            ConfigValue::Float(f) => serializer.serialize_f64(*f),
            ConfigValue::String(s) => serializer.serialize_str(s),
            ConfigValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ConfigValue::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            ConfigValue::Handler(handler) => {
                serializer.serialize_str(&format!("<handler {}>", handler.label()))
            }
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Integer(i)
    }
}

impl From<f64> for ConfigValue {
    fn from(f: f64) -> Self {
        ConfigValue::Float(f)
    }
}

impl From<Handler> for ConfigValue {
    fn from(handler: Handler) -> Self {
        ConfigValue::Handler(handler)
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(map: ConfigMap) -> Self {
        ConfigValue::Map(map)
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(items: Vec<T>) -> Self {
        ConfigValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for ConfigValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => ConfigValue::Null,
            Value::Bool(b) => ConfigValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ConfigValue::Integer(i),
                None => ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => ConfigValue::String(s),
            Value::Array(items) => ConfigValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                ConfigValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<toml::Value> for ConfigValue {
    fn from(value: toml::Value) -> Self {
        use toml::Value;

        match value {
            Value::String(s) => ConfigValue::String(s),
            Value::Integer(i) => ConfigValue::Integer(i),
            Value::Float(f) => ConfigValue::Float(f),
            Value::Boolean(b) => ConfigValue::Bool(b),
            Value::Datetime(dt) => ConfigValue::String(dt.to_string()),
            Value::Array(items) => ConfigValue::List(items.into_iter().map(Into::into).collect()),
            Value::Table(table) => {
                ConfigValue::Map(table.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_emptiness() {
        assert!(ConfigValue::Null.is_empty());
        assert!(ConfigValue::from("").is_empty());
        assert!(ConfigValue::from(false).is_empty());
        assert!(ConfigValue::List(vec![]).is_empty());
        assert!(ConfigValue::Map(ConfigMap::new()).is_empty());

        assert!(!ConfigValue::from(0i64).is_empty());
        assert!(!ConfigValue::from("0").is_empty());
        assert!(!ConfigValue::from(vec!["a"]).is_empty());
    }

    #[test]
    fn test_render_uses_type_name_for_non_scalars() {
        assert_eq!(ConfigValue::from("GET").render(), "GET");
        assert_eq!(ConfigValue::from(42i64).render(), "42");
        assert_eq!(ConfigValue::Null.render(), "null");
        assert_eq!(ConfigValue::from(vec!["GET", "POST"]).render(), "list");
        assert_eq!(ConfigValue::from(json!({"a": 1})).render(), "map");
    }

    #[test]
    fn test_string_list_flattens_scalars() {
        assert_eq!(ConfigValue::from("foo").string_list(), vec!["foo"]);
        assert_eq!(
            ConfigValue::from(json!(["foo", 1, {"skip": true}, "bar"])).string_list(),
            vec!["foo", "1", "bar"]
        );
        assert!(ConfigValue::Null.string_list().is_empty());
    }

    #[test]
    fn test_from_toml_table() {
        let table: toml::Value = toml::from_str(
            r#"
            prefix = "v1"
            tld = ["com", "net"]
            "#,
        )
        .unwrap();

        let value = ConfigValue::from(table);
        let map = value.as_map().unwrap();
        assert_eq!(map["prefix"], ConfigValue::from("v1"));
        assert_eq!(map["tld"], ConfigValue::from(vec!["com", "net"]));
    }
}
