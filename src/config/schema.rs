//! Tool settings.
//!
//! These settings tune the configurator itself, not the routes it builds.
//! All types derive Serde traits for deserialization from a settings file.

use serde::{Deserialize, Serialize};

/// Root settings for the configurator.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Config processing limits.
    pub processor: ProcessorOptions,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Options for `ConfigProcessor`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ProcessorOptions {
    /// Deepest allowed `groups` nesting. The root scope is depth 0.
    pub max_depth: usize,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
