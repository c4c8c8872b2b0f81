//! Declarative router configuration.
//!
//! Translates a nested config tree (routes, filters, resolvers, prefixes,
//! host restrictions, controllers and nested groups) into registration calls
//! on a router.

pub mod config;
pub mod configurator;
pub mod handler;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::{ConfigMap, ConfigValue};
pub use configurator::{ConfigError, ConfigProcessor, RouterConfigurator};
pub use handler::{Handler, HandlerRegistry};
pub use routing::{Router, RouterHandle};
