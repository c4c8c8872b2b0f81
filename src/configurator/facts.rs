//! Route-fact extraction.
//!
//! A route definition names its method, path and action either through a
//! compact `route` string (`"GET POST /users list"`) or through explicit
//! `method`, `path` and `action` fields. Facts found in the string win;
//! explicit fields fill whatever the string left empty.
//!
//! # Token Classification
//! ```text
//! token is a method or ANY   → append to methods (any position)
//! expecting Path             → path,   then expect Action
//! expecting Action           → action, then Exhausted
//! Exhausted                  → ignored
//! ```
//! A string without a single method token only counts when the definition
//! carries an explicit `method`: its path and action are then taken as usual.
//! Otherwise nothing is taken from it.

use crate::config::{ConfigMap, ConfigValue};
use crate::http::HttpMethod;

/// Method token that expands to every supported method.
pub const ANY_METHOD: &str = "ANY";

/// Resolved `(method, path, action)` of one route definition.
///
/// `ConfigValue::Null` marks a fact nobody supplied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteFacts {
    pub method: ConfigValue,
    pub path: ConfigValue,
    pub action: ConfigValue,
}

impl RouteFacts {
    /// True when every fact is present and non-empty.
    pub fn is_complete(&self) -> bool {
        !self.method.is_empty() && !self.path.is_empty() && !self.action.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Path,
    Action,
    Exhausted,
}

/// State machine over the whitespace-separated tokens of a `route` string.
#[derive(Debug)]
pub struct RouteTokens {
    methods: Vec<String>,
    path: Option<String>,
    action: Option<String>,
    expect: Expect,
}

impl Default for RouteTokens {
    fn default() -> Self {
        Self {
            methods: Vec::new(),
            path: None,
            action: None,
            expect: Expect::Path,
        }
    }
}

impl RouteTokens {
    /// Classify every token of `route`.
    pub fn parse(route: &str) -> Self {
        let mut tokens = Self::default();
        for token in route.split_whitespace() {
            tokens.feed(token);
        }
        tokens
    }

    fn feed(&mut self, token: &str) {
        if is_method_token(token) {
            self.methods.push(token.to_string());
            return;
        }

        match self.expect {
            Expect::Path => {
                self.path = Some(token.to_string());
                self.expect = Expect::Action;
            }
            Expect::Action => {
                self.action = Some(token.to_string());
                self.expect = Expect::Exhausted;
            }
            Expect::Exhausted => {
                tracing::trace!(token = %token, "Ignoring surplus route token");
            }
        }
    }

    /// Scalar for one method, list for several, `Null` for none.
    pub fn method(&self) -> ConfigValue {
        match self.methods.as_slice() {
            [] => ConfigValue::Null,
            [single] => ConfigValue::String(single.clone()),
            many => ConfigValue::from(many.to_vec()),
        }
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Whether the string is a compact route at all.
    pub fn has_methods(&self) -> bool {
        !self.methods.is_empty()
    }
}

fn is_method_token(token: &str) -> bool {
    token == ANY_METHOD || HttpMethod::is_valid(token)
}

/// Extract the route facts of one definition.
pub fn gather_route_facts(definition: &ConfigMap) -> RouteFacts {
    let mut facts = RouteFacts::default();

    if let Some(route) = definition.get("route").and_then(ConfigValue::as_str) {
        let tokens = RouteTokens::parse(route);
        let explicit_method = definition.get("method").is_some_and(|m| !m.is_empty());
        if tokens.has_methods() || explicit_method {
            if tokens.has_methods() {
                facts.method = tokens.method();
            }
            facts.path = tokens.path().map(ConfigValue::from).unwrap_or_default();
            facts.action = tokens.action().map(ConfigValue::from).unwrap_or_default();
        } else {
            tracing::debug!(route = %route, "Route string has no method token");
        }
    }

    if facts.method.is_null() {
        facts.method = field(definition, "method");
    }
    if contains_any(&facts.method) {
        facts.method = ConfigValue::from(HttpMethod::all());
    }
    if facts.path.is_null() {
        facts.path = field(definition, "path");
    }
    if facts.action.is_null() {
        facts.action = field(definition, "action");
    }

    facts
}

fn field(definition: &ConfigMap, key: &str) -> ConfigValue {
    definition.get(key).cloned().unwrap_or_default()
}

fn contains_any(method: &ConfigValue) -> bool {
    match method {
        ConfigValue::String(m) => m == ANY_METHOD,
        ConfigValue::List(items) => items.iter().any(|m| m.as_str() == Some(ANY_METHOD)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn definition(value: serde_json::Value) -> ConfigMap {
        match ConfigValue::from(value) {
            ConfigValue::Map(map) => map,
            other => panic!("expected a map, got {}", other.type_name()),
        }
    }

    #[test]
    fn test_facts_from_route_string() {
        let facts = gather_route_facts(&definition(json!({
            "route": "GET   POST    /foo/bar",
            "action": "yolo",
        })));

        assert_eq!(facts.method, ConfigValue::from(vec!["GET", "POST"]));
        assert_eq!(facts.path, ConfigValue::from("/foo/bar"));
        assert_eq!(facts.action, ConfigValue::from("yolo"));
        assert!(facts.is_complete());
    }

    #[test]
    fn test_facts_from_route_string_without_method() {
        let facts = gather_route_facts(&definition(json!({
            "route": "/foo/bar",
            "action": "yolo",
        })));

        assert_eq!(facts.method, ConfigValue::Null);
        assert_eq!(facts.path, ConfigValue::Null);
        assert_eq!(facts.action, ConfigValue::from("yolo"));
        assert!(!facts.is_complete());
    }

    #[test]
    fn test_facts_from_path_only_string_with_method_field() {
        let facts = gather_route_facts(&definition(json!({
            "route": "/foo",
            "method": "GET",
            "action": "show",
        })));

        assert_eq!(facts.method, ConfigValue::from("GET"));
        assert_eq!(facts.path, ConfigValue::from("/foo"));
        assert_eq!(facts.action, ConfigValue::from("show"));
        assert!(facts.is_complete());

        let facts = gather_route_facts(&definition(json!({
            "route": "/foo show",
            "method": ["GET", "HEAD"],
            "action": "ignored",
        })));
        assert_eq!(facts.path, ConfigValue::from("/foo"));
        assert_eq!(facts.action, ConfigValue::from("show"));
    }

    #[test]
    fn test_facts_from_explicit_fields() {
        let facts = gather_route_facts(&definition(json!({
            "method": ["GET", "POST"],
            "path": "/foo/bar",
            "action": "yolo",
        })));

        let compact = gather_route_facts(&definition(json!({
            "route": "GET POST /foo/bar",
            "action": "yolo",
        })));

        assert_eq!(facts, compact);
    }

    #[test]
    fn test_methods_in_any_position() {
        let tokens = RouteTokens::parse("GET /users POST list DELETE");
        assert_eq!(tokens.method(), ConfigValue::from(vec!["GET", "POST", "DELETE"]));
        assert_eq!(tokens.path(), Some("/users"));
        assert_eq!(tokens.action(), Some("list"));
    }

    #[test]
    fn test_surplus_tokens_are_ignored() {
        let tokens = RouteTokens::parse("PUT /a b c d");
        assert_eq!(tokens.method(), ConfigValue::from("PUT"));
        assert_eq!(tokens.path(), Some("/a"));
        assert_eq!(tokens.action(), Some("b"));
    }

    #[test]
    fn test_action_in_string_wins_over_field() {
        let facts = gather_route_facts(&definition(json!({
            "route": "GET /users list",
            "action": "ignored",
        })));
        assert_eq!(facts.action, ConfigValue::from("list"));
    }

    #[test]
    fn test_method_only_string_falls_back_to_path_field() {
        let facts = gather_route_facts(&definition(json!({
            "route": "PATCH",
            "action": "update",
        })));
        assert_eq!(facts.method, ConfigValue::from("PATCH"));
        assert_eq!(facts.path, ConfigValue::Null);

        let facts = gather_route_facts(&definition(json!({
            "route": "PATCH",
            "path": "/users",
            "action": "update",
        })));
        assert_eq!(facts.path, ConfigValue::from("/users"));
    }

    #[test]
    fn test_any_expands_to_all_methods() {
        let all = ConfigValue::from(HttpMethod::all());

        let facts = gather_route_facts(&definition(json!({
            "route": "ANY /ping",
            "action": "ping",
        })));
        assert_eq!(facts.method, all);

        let facts = gather_route_facts(&definition(json!({
            "method": ["GET", "ANY"],
            "path": "/ping",
            "action": "ping",
        })));
        assert_eq!(facts.method, all);
    }

    #[test]
    fn test_non_string_route_is_ignored() {
        let facts = gather_route_facts(&definition(json!({
            "route": ["GET", "/ping"],
            "method": "GET",
            "path": "/ping",
            "action": "ping",
        })));
        assert_eq!(facts.method, ConfigValue::from("GET"));
        assert_eq!(facts.path, ConfigValue::from("/ping"));
    }
}
