//! Shared fixtures for configurator integration tests.

#![allow(dead_code)]

use router_configurator::config::{ConfigMap, ConfigValue};
use router_configurator::http::HttpMethod;
use router_configurator::routing::{Action, Route};
use router_configurator::{Handler, RouterHandle};

/// Build a config map from a JSON literal.
pub fn node(value: serde_json::Value) -> ConfigMap {
    match ConfigValue::from(value) {
        ConfigValue::Map(map) => map,
        other => panic!("expected a map, got {}", other.type_name()),
    }
}

/// A handler that accepts everything.
pub fn allow_all() -> Handler {
    Handler::new("allow_all", |_| ConfigValue::Bool(true))
}

/// Puts `handler` under `key` in the `index`-th entry of `list`.
pub fn set_handler(config: &mut ConfigMap, list: &str, index: usize, key: &str, handler: &Handler) {
    let Some(ConfigValue::List(entries)) = config.get_mut(list) else {
        panic!("{} is not a list", list);
    };
    let Some(ConfigValue::Map(entry)) = entries.get_mut(index) else {
        panic!("{}[{}] is not a map", list, index);
    };
    entry.insert(key.to_string(), ConfigValue::Handler(handler.clone()));
}

/// Router that only records the calls it receives.
#[derive(Debug, Default)]
pub struct RecordingRouter {
    pub calls: Vec<String>,
    pub children: Vec<RecordingRouter>,
}

impl RecordingRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The operation names, without arguments.
    pub fn operations(&self) -> Vec<&str> {
        self.calls
            .iter()
            .map(|call| call.split('(').next().unwrap_or_default())
            .collect()
    }
}

impl RouterHandle for RecordingRouter {
    fn add_filter(&mut self, name: &str, _handler: Handler) {
        self.calls.push(format!("add_filter({})", name));
    }

    fn enable_filter(&mut self, name: &str) {
        self.calls.push(format!("enable_filter({})", name));
    }

    fn add_resolver(&mut self, name: &str, _handler: Handler) {
        self.calls.push(format!("add_resolver({})", name));
    }

    fn add_prefix(&mut self, prefix: &str) {
        self.calls.push(format!("add_prefix({})", prefix));
    }

    fn restrict_protocol(&mut self, value: &ConfigValue) {
        self.calls.push(format!("restrict_protocol({})", value));
    }

    fn restrict_tld(&mut self, value: &ConfigValue) {
        self.calls.push(format!("restrict_tld({})", value));
    }

    fn restrict_domain(&mut self, value: &ConfigValue) {
        self.calls.push(format!("restrict_domain({})", value));
    }

    fn restrict_subdomain(&mut self, value: &ConfigValue) {
        self.calls.push(format!("restrict_subdomain({})", value));
    }

    fn restrict_host(&mut self, value: &ConfigValue) {
        self.calls.push(format!("restrict_host({})", value));
    }

    fn set_controller(&mut self, name: &str, override_existing: bool) {
        self.calls
            .push(format!("set_controller({}, {})", name, override_existing));
    }

    fn route(&mut self, methods: &[HttpMethod], path: &str, action: ConfigValue) -> Route {
        let names: Vec<&str> = methods.iter().map(HttpMethod::as_str).collect();
        self.calls
            .push(format!("route({} {} {})", names.join("|"), path, action));
        Route {
            methods: methods.to_vec(),
            path: path.to_string(),
            action: Action::Value(action),
        }
    }

    fn group(&mut self) -> &mut dyn RouterHandle {
        self.calls.push("group()".to_string());
        self.children.push(RecordingRouter::new());
        let index = self.children.len() - 1;
        &mut self.children[index]
    }
}
