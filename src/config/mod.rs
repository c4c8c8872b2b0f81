//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! routing file (TOML/JSON)
//!     → loader.rs (parse into a ConfigValue tree)
//!     → ConfigMap (root scope, immutable)
//!     → configurator (translate into router calls)
//!
//! settings file (TOML)
//!     → loader.rs (deserialize)
//!     → Settings (processor limits, log level)
//! ```
//!
//! # Design Decisions
//! - Routing trees stay untyped until the configurator walks them, so the
//!   same tree can be built in code with handlers mixed in
//! - Settings have defaults for every field to allow minimal files

pub mod loader;
pub mod schema;
pub mod value;

pub use loader::LoadError;
pub use schema::{ObservabilityConfig, ProcessorOptions, Settings};
pub use value::{ConfigMap, ConfigValue};
