//! Registered routes.

use serde::Serialize;

use crate::config::ConfigValue;
use crate::http::HttpMethod;

/// What a route invokes once matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Action {
    /// A method on the scope's bound controller. Serializes as
    /// `[controller, method]`.
    Controller(String, String),
    /// Any other action shape, kept as configured.
    Value(ConfigValue),
}

impl Action {
    /// Binds a string action to `controller`, if one is set.
    pub fn bind(controller: Option<&str>, action: ConfigValue) -> Self {
        match (controller, action) {
            (Some(controller), ConfigValue::String(method)) => {
                Action::Controller(controller.to_string(), method)
            }
            (_, action) => Action::Value(action),
        }
    }
}

/// A route as registered on a scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub methods: Vec<HttpMethod>,
    /// Full path, prefix included.
    pub path: String,
    pub action: Action,
}

/// Joins path segments with single slashes, always rooted at `/`.
pub fn join_path<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    let joined = segments
        .into_iter()
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    format!("/{}", joined)
}
