//! Config tree processing.
//!
//! # Processing Order
//! ```text
//! filters → filter → resolvers → prefix → protocol → tld → domain
//!     → subdomain → host → controller → routes → groups
//! ```
//! Each step reads one key and is a no-op when the key is absent or null.
//! `groups` recurse into child scopes created by the router.
//!
//! # Design Decisions
//! - No inheritance logic here; child scopes compose through the router
//! - Not atomic: entries registered before a failing entry stay registered
//! - Nesting depth is bounded by `ProcessorOptions::max_depth`

use crate::config::{ConfigMap, ConfigValue, ProcessorOptions};
use crate::configurator::error::{ConfigError, ConfigResult};
use crate::configurator::facts::{gather_route_facts, RouteFacts};
use crate::handler::{Handler, HandlerRegistry};
use crate::http::HttpMethod;
use crate::routing::RouterHandle;

/// Applies a config tree to a router.
pub trait RouterConfigurator {
    fn process_config(
        &self,
        router: &mut dyn RouterHandle,
        config: &ConfigMap,
    ) -> ConfigResult<()>;
}

/// Registration kinds that take a `{name, <handler>}` list.
#[derive(Debug, Clone, Copy)]
enum HandlerKind {
    Filter,
    Resolver,
}

impl HandlerKind {
    fn list_key(self) -> &'static str {
        match self {
            HandlerKind::Filter => "filters",
            HandlerKind::Resolver => "resolvers",
        }
    }

    fn handler_key(self) -> &'static str {
        match self {
            HandlerKind::Filter => "filter",
            HandlerKind::Resolver => "resolver",
        }
    }
}

/// The default `RouterConfigurator`.
#[derive(Debug, Clone, Default)]
pub struct ConfigProcessor {
    handlers: HandlerRegistry,
    options: ProcessorOptions,
}

impl ConfigProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handlers that string `filter` / `resolver` fields may name.
    pub fn with_handlers(mut self, handlers: HandlerRegistry) -> Self {
        self.handlers = handlers;
        self
    }

    pub fn with_options(mut self, options: ProcessorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ProcessorOptions {
        &self.options
    }

    fn process_scope(
        &self,
        router: &mut dyn RouterHandle,
        config: &ConfigMap,
        depth: usize,
    ) -> ConfigResult<()> {
        tracing::trace!(depth, directives = config.len(), "Processing routing scope");

        self.process_filters(router, config)?;
        self.process_enabled_filters(router, config)?;
        self.process_resolvers(router, config)?;
        self.process_prefix(router, config)?;
        self.process_protocol(router, config);
        self.process_tld(router, config);
        self.process_domain(router, config);
        self.process_subdomain(router, config);
        self.process_host(router, config);
        self.process_controller(router, config)?;
        self.process_routes(router, config)?;
        self.process_groups_at(router, config, depth)
    }

    /// Registers every `{name, filter}` entry of `filters`.
    pub fn process_filters(
        &self,
        router: &mut dyn RouterHandle,
        config: &ConfigMap,
    ) -> ConfigResult<()> {
        for entry in handler_list(config, HandlerKind::Filter)? {
            let (name, handler) = self.handler_entry(entry, HandlerKind::Filter)?;
            router.add_filter(&name, handler);
        }
        Ok(())
    }

    /// Enables the filter name(s) given by `filter`.
    pub fn process_enabled_filters(
        &self,
        router: &mut dyn RouterHandle,
        config: &ConfigMap,
    ) -> ConfigResult<()> {
        let names = match present(config, "filter") {
            None => return Ok(()),
            Some(ConfigValue::List(items)) => items.as_slice(),
            Some(single) => std::slice::from_ref(single),
        };

        for name in names {
            let name = name.scalar_string().ok_or_else(|| {
                ConfigError::invalid(format!(
                    "Routing \"filter\" must name filters, received \"{}\".",
                    name.type_name()
                ))
            })?;
            router.enable_filter(&name);
        }
        Ok(())
    }

    /// Registers every `{name, resolver}` entry of `resolvers`.
    pub fn process_resolvers(
        &self,
        router: &mut dyn RouterHandle,
        config: &ConfigMap,
    ) -> ConfigResult<()> {
        for entry in handler_list(config, HandlerKind::Resolver)? {
            let (name, handler) = self.handler_entry(entry, HandlerKind::Resolver)?;
            router.add_resolver(&name, handler);
        }
        Ok(())
    }

    pub fn process_prefix(
        &self,
        router: &mut dyn RouterHandle,
        config: &ConfigMap,
    ) -> ConfigResult<()> {
        if let Some(prefix) = string_directive(config, "prefix")? {
            router.add_prefix(&prefix);
        }
        Ok(())
    }

    pub fn process_protocol(&self, router: &mut dyn RouterHandle, config: &ConfigMap) {
        if let Some(protocol) = non_empty(config, "protocol") {
            router.restrict_protocol(protocol);
        }
    }

    pub fn process_tld(&self, router: &mut dyn RouterHandle, config: &ConfigMap) {
        if let Some(tld) = non_empty(config, "tld") {
            router.restrict_tld(tld);
        }
    }

    pub fn process_domain(&self, router: &mut dyn RouterHandle, config: &ConfigMap) {
        if let Some(domain) = non_empty(config, "domain") {
            router.restrict_domain(domain);
        }
    }

    pub fn process_subdomain(&self, router: &mut dyn RouterHandle, config: &ConfigMap) {
        if let Some(subdomain) = non_empty(config, "subdomain") {
            router.restrict_subdomain(subdomain);
        }
    }

    pub fn process_host(&self, router: &mut dyn RouterHandle, config: &ConfigMap) {
        if let Some(host) = non_empty(config, "host") {
            router.restrict_host(host);
        }
    }

    /// Binds `controller` without overriding one already bound on the scope.
    pub fn process_controller(
        &self,
        router: &mut dyn RouterHandle,
        config: &ConfigMap,
    ) -> ConfigResult<()> {
        if let Some(controller) = string_directive(config, "controller")? {
            router.set_controller(&controller, false);
        }
        Ok(())
    }

    /// Registers every definition of `routes`.
    pub fn process_routes(
        &self,
        router: &mut dyn RouterHandle,
        config: &ConfigMap,
    ) -> ConfigResult<()> {
        let Some(routes) = present(config, "routes") else {
            return Ok(());
        };
        let routes = routes.as_list().ok_or_else(|| {
            ConfigError::invalid("Routing config \"routes\" must be a list.")
        })?;

        for definition in routes {
            let definition = definition.as_map().ok_or_else(|| {
                ConfigError::invalid(format!(
                    "Routing \"routes\" must consist of maps, received \"{}\".",
                    definition.type_name()
                ))
            })?;

            let facts = gather_route_facts(definition);
            if !facts.is_complete() {
                return Err(incomplete_route(&facts));
            }

            let methods = parse_methods(&facts.method)?;
            let path = facts.path.as_str().ok_or_else(|| {
                ConfigError::invalid(format!(
                    "Route \"path\" must be a string, received \"{}\".",
                    facts.path.type_name()
                ))
            })?;

            router.route(&methods, path, facts.action.clone());
        }
        Ok(())
    }

    /// Processes every map of `groups` against a fresh child scope.
    pub fn process_groups(
        &self,
        router: &mut dyn RouterHandle,
        config: &ConfigMap,
    ) -> ConfigResult<()> {
        self.process_groups_at(router, config, 0)
    }

    fn process_groups_at(
        &self,
        router: &mut dyn RouterHandle,
        config: &ConfigMap,
        depth: usize,
    ) -> ConfigResult<()> {
        let Some(groups) = present(config, "groups") else {
            return Ok(());
        };
        let groups = groups.as_list().ok_or_else(|| {
            ConfigError::invalid("Routing config \"groups\" must be a list.")
        })?;

        for group in groups {
            let group = group.as_map().ok_or_else(|| {
                ConfigError::invalid(format!(
                    "Routing \"groups\" must consist of maps, received \"{}\".",
                    group.type_name()
                ))
            })?;

            let child_depth = depth + 1;
            if child_depth > self.options.max_depth {
                return Err(ConfigError::invalid(format!(
                    "Routing \"groups\" nest deeper than the allowed {} levels.",
                    self.options.max_depth
                )));
            }

            self.process_scope(router.group(), group, child_depth)?;
        }
        Ok(())
    }

    fn handler_entry(
        &self,
        entry: &ConfigValue,
        kind: HandlerKind,
    ) -> ConfigResult<(String, Handler)> {
        let entry = entry.as_map().ok_or_else(|| {
            ConfigError::invalid(format!(
                "Routing \"{}\" must consist of maps, received \"{}\".",
                kind.list_key(),
                entry.type_name()
            ))
        })?;

        let name = entry
            .get("name")
            .filter(|name| !name.is_empty())
            .and_then(ConfigValue::scalar_string)
            .ok_or_else(|| {
                ConfigError::invalid(format!(
                    "Routing \"{}\" entries must have a \"name\".",
                    kind.list_key()
                ))
            })?;

        let handler = entry
            .get(kind.handler_key())
            .and_then(|value| self.handlers.resolve(value))
            .ok_or_else(|| {
                ConfigError::invalid(format!(
                    "Routing \"{}\" entry \"{}\" must have an invocable \"{}\".",
                    kind.list_key(),
                    name,
                    kind.handler_key()
                ))
            })?;

        Ok((name, handler))
    }
}

impl RouterConfigurator for ConfigProcessor {
    fn process_config(
        &self,
        router: &mut dyn RouterHandle,
        config: &ConfigMap,
    ) -> ConfigResult<()> {
        self.process_scope(router, config, 0)
    }
}

fn handler_list(config: &ConfigMap, kind: HandlerKind) -> ConfigResult<&[ConfigValue]> {
    let Some(entries) = present(config, kind.list_key()) else {
        return Ok(&[][..]);
    };
    entries.as_list().ok_or_else(|| {
        ConfigError::invalid(format!(
            "Routing config \"{}\" must be a list.",
            kind.list_key()
        ))
    })
}

/// The value at `key`, unless it is absent or null.
fn present<'a>(config: &'a ConfigMap, key: &str) -> Option<&'a ConfigValue> {
    config.get(key).filter(|value| !value.is_null())
}

fn non_empty<'a>(config: &'a ConfigMap, key: &str) -> Option<&'a ConfigValue> {
    config.get(key).filter(|value| !value.is_empty())
}

/// A non-empty scalar directive in string form.
fn string_directive(config: &ConfigMap, key: &str) -> ConfigResult<Option<String>> {
    let Some(value) = non_empty(config, key) else {
        return Ok(None);
    };
    value.scalar_string().map(Some).ok_or_else(|| {
        ConfigError::invalid(format!(
            "Routing config \"{}\" must be a string, received \"{}\".",
            key,
            value.type_name()
        ))
    })
}

fn incomplete_route(facts: &RouteFacts) -> ConfigError {
    ConfigError::invalid(format!(
        "Route must provide a \"method\", \"path\" and an \"action\". \
         Received method: \"{}\", path: \"{}\", action: \"{}\".",
        facts.method.render(),
        facts.path.render(),
        facts.action.render()
    ))
}

fn parse_methods(method: &ConfigValue) -> ConfigResult<Vec<HttpMethod>> {
    let tokens = match method {
        ConfigValue::List(items) => items.as_slice(),
        single => std::slice::from_ref(single),
    };

    tokens
        .iter()
        .map(|token| {
            token
                .as_str()
                .ok_or_else(|| {
                    ConfigError::invalid(format!(
                        "Route methods must be strings, received \"{}\".",
                        token.type_name()
                    ))
                })?
                .parse::<HttpMethod>()
                .map_err(|e| ConfigError::invalid(format!("Route method rejected: {}.", e)))
        })
        .collect()
}
