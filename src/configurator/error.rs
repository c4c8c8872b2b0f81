//! Configurator error definitions.

use thiserror::Error;

/// Errors raised while translating a config tree into router calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A directive has the wrong shape or is missing a mandatory part.
    #[error("Invalid routing configuration: {0}")]
    InvalidConfiguration(String),
}

impl ConfigError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ConfigError::InvalidConfiguration(message.into())
    }
}

/// Result type for configurator operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
