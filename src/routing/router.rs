//! Routing scopes.
//!
//! # Responsibilities
//! - Define the registration surface the configurator drives (`RouterHandle`)
//! - Provide an in-memory scope tree implementing it (`Router`)
//!
//! # Design Decisions
//! - Child scopes copy the parent's state when created; later changes to the
//!   parent do not reach existing children
//! - Prefixes compose by path joining, restrictions by union
//! - A scope-local controller is kept unless the caller asks to override it;
//!   an inherited one is always replaced

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::ConfigValue;
use crate::handler::Handler;
use crate::http::HttpMethod;
use crate::routing::restrictions::{extend_unique, Restrictions};
use crate::routing::route::{join_path, Action, Route};

/// Registration operations of one routing scope.
pub trait RouterHandle {
    fn add_filter(&mut self, name: &str, handler: Handler);

    fn enable_filter(&mut self, name: &str);

    fn add_resolver(&mut self, name: &str, handler: Handler);

    fn add_prefix(&mut self, prefix: &str);

    fn restrict_protocol(&mut self, value: &ConfigValue);

    fn restrict_tld(&mut self, value: &ConfigValue);

    fn restrict_domain(&mut self, value: &ConfigValue);

    fn restrict_subdomain(&mut self, value: &ConfigValue);

    fn restrict_host(&mut self, value: &ConfigValue);

    fn set_controller(&mut self, name: &str, override_existing: bool);

    fn route(&mut self, methods: &[HttpMethod], path: &str, action: ConfigValue) -> Route;

    /// Create a child scope owned by this one and return it.
    fn group(&mut self) -> &mut dyn RouterHandle;
}

#[derive(Debug, Clone, PartialEq)]
enum ControllerBinding {
    Inherited(String),
    Local(String),
}

impl ControllerBinding {
    fn name(&self) -> &str {
        match self {
            ControllerBinding::Inherited(name) | ControllerBinding::Local(name) => name,
        }
    }
}

/// In-memory routing scope.
#[derive(Debug, Clone, Default)]
pub struct Router {
    prefix: String,
    controller: Option<ControllerBinding>,
    restrictions: Restrictions,
    filters: BTreeMap<String, Handler>,
    enabled_filters: Vec<String>,
    resolvers: BTreeMap<String, Handler>,
    routes: Vec<Route>,
    children: Vec<Router>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn controller(&self) -> Option<&str> {
        self.controller.as_ref().map(ControllerBinding::name)
    }

    pub fn restrictions(&self) -> &Restrictions {
        &self.restrictions
    }

    pub fn filters(&self) -> &BTreeMap<String, Handler> {
        &self.filters
    }

    pub fn enabled_filters(&self) -> &[String] {
        &self.enabled_filters
    }

    pub fn resolvers(&self) -> &BTreeMap<String, Handler> {
        &self.resolvers
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Nested scopes, in creation order.
    pub fn children(&self) -> &[Router] {
        &self.children
    }

    fn child(&self) -> Router {
        Router {
            prefix: self.prefix.clone(),
            controller: self
                .controller
                .as_ref()
                .map(|c| ControllerBinding::Inherited(c.name().to_string())),
            restrictions: self.restrictions.clone(),
            filters: self.filters.clone(),
            enabled_filters: self.enabled_filters.clone(),
            resolvers: self.resolvers.clone(),
            routes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Serializable view of this scope and its children.
    pub fn snapshot(&self) -> ScopeSnapshot {
        ScopeSnapshot {
            prefix: self.prefix.clone(),
            controller: self.controller().map(str::to_string),
            restrictions: self.restrictions.clone(),
            filters: self.filters.keys().cloned().collect(),
            enabled_filters: self.enabled_filters.clone(),
            resolvers: self.resolvers.keys().cloned().collect(),
            routes: self.routes.clone(),
            groups: self.children.iter().map(Router::snapshot).collect(),
        }
    }
}

impl RouterHandle for Router {
    fn add_filter(&mut self, name: &str, handler: Handler) {
        tracing::debug!(filter = %name, "Filter registered");
        self.filters.insert(name.to_string(), handler);
    }

    fn enable_filter(&mut self, name: &str) {
        if !self.enabled_filters.iter().any(|f| f == name) {
            tracing::debug!(filter = %name, "Filter enabled");
            self.enabled_filters.push(name.to_string());
        }
    }

    fn add_resolver(&mut self, name: &str, handler: Handler) {
        tracing::debug!(resolver = %name, "Resolver registered");
        self.resolvers.insert(name.to_string(), handler);
    }

    fn add_prefix(&mut self, prefix: &str) {
        let trimmed = prefix.trim_matches('/');
        if trimmed.is_empty() {
            return;
        }
        self.prefix = if self.prefix.is_empty() {
            trimmed.to_string()
        } else {
            format!("{}/{}", self.prefix.trim_end_matches('/'), trimmed)
        };
        tracing::debug!(prefix = %self.prefix, "Prefix added");
    }

    fn restrict_protocol(&mut self, value: &ConfigValue) {
        extend_unique(&mut self.restrictions.protocols, value);
    }

    fn restrict_tld(&mut self, value: &ConfigValue) {
        extend_unique(&mut self.restrictions.tlds, value);
    }

    fn restrict_domain(&mut self, value: &ConfigValue) {
        extend_unique(&mut self.restrictions.domains, value);
    }

    fn restrict_subdomain(&mut self, value: &ConfigValue) {
        extend_unique(&mut self.restrictions.subdomains, value);
    }

    fn restrict_host(&mut self, value: &ConfigValue) {
        extend_unique(&mut self.restrictions.hosts, value);
    }

    fn set_controller(&mut self, name: &str, override_existing: bool) {
        if let Some(ControllerBinding::Local(existing)) = &self.controller {
            if !override_existing {
                tracing::debug!(
                    existing = %existing,
                    ignored = %name,
                    "Controller already bound on this scope"
                );
                return;
            }
        }
        tracing::debug!(controller = %name, "Controller bound");
        self.controller = Some(ControllerBinding::Local(name.to_string()));
    }

    fn route(&mut self, methods: &[HttpMethod], path: &str, action: ConfigValue) -> Route {
        let route = Route {
            methods: methods.to_vec(),
            path: join_path([self.prefix.as_str(), path]),
            action: Action::bind(self.controller(), action),
        };
        tracing::debug!(
            methods = ?route.methods,
            path = %route.path,
            "Route registered"
        );
        self.routes.push(route.clone());
        route
    }

    fn group(&mut self) -> &mut dyn RouterHandle {
        let child = self.child();
        self.children.push(child);
        let index = self.children.len() - 1;
        &mut self.children[index]
    }
}

/// Point-in-time view of a scope tree, as printed by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScopeSnapshot {
    pub prefix: String,
    pub controller: Option<String>,
    pub restrictions: Restrictions,
    pub filters: Vec<String>,
    pub enabled_filters: Vec<String>,
    pub resolvers: Vec<String>,
    pub routes: Vec<Route>,
    pub groups: Vec<ScopeSnapshot>,
}
