//! Configurator subsystem.
//!
//! # Data Flow
//! ```text
//! ConfigMap (one scope)
//!     → processor.rs (fixed sequence of directive steps)
//!     → facts.rs (route string / explicit fields → RouteFacts)
//!     → RouterHandle calls
//!     → groups: router.group() → recurse with the group's map
//! ```
//!
//! # Design Decisions
//! - One error kind, always propagated to the caller
//! - Handlers are validated while processing, never called

pub mod error;
pub mod facts;
pub mod processor;

pub use error::{ConfigError, ConfigResult};
pub use facts::{gather_route_facts, RouteFacts, RouteTokens};
pub use processor::{ConfigProcessor, RouterConfigurator};
