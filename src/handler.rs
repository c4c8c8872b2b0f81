//! Invocable handlers for route filters and parameter resolvers.
//!
//! # Responsibilities
//! - Wrap a callable behind a single `invoke` operation
//! - Resolve handler names found in configuration files
//!
//! # Design Decisions
//! - A configuration value is invocable when it is a `Handler`, or a string
//!   naming a handler known to the `HandlerRegistry`
//! - Handlers compare by identity, not by behavior

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::config::ConfigValue;

type HandlerFn = dyn Fn(&[ConfigValue]) -> ConfigValue + Send + Sync;

/// A named, shareable callable.
#[derive(Clone)]
pub struct Handler {
    label: String,
    func: Arc<HandlerFn>,
}

impl Handler {
    /// Create a new handler from a closure.
    pub fn new<F>(label: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[ConfigValue]) -> ConfigValue + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            func: Arc::new(func),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn invoke(&self, args: &[ConfigValue]) -> ConfigValue {
        (self.func)(args)
    }

    /// True when both handles point at the same callable.
    pub fn same_as(&self, other: &Handler) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.func) as *const (),
            Arc::as_ptr(&other.func) as *const (),
        )
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").field("label", &self.label).finish()
    }
}

/// Named handlers that configuration files can refer to by string.
#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    handlers: BTreeMap<String, Handler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, handler: Handler) {
        let name = name.into();
        tracing::debug!(handler = %name, "Handler registered");
        self.handlers.insert(name, handler);
    }

    pub fn get(&self, name: &str) -> Option<&Handler> {
        self.handlers.get(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Turn a configuration value into a handler, if it is invocable.
    pub fn resolve(&self, value: &ConfigValue) -> Option<Handler> {
        match value {
            ConfigValue::Handler(handler) => Some(handler.clone()),
            ConfigValue::String(name) => self.get(name).cloned(),
            _ => None,
        }
    }
}
