//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::Settings;
use crate::config::value::{ConfigMap, ConfigValue};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// File extension is neither `.toml` nor `.json`.
    #[error("Unsupported config format: {0:?}")]
    UnsupportedFormat(String),

    /// The document root is not a map of directives.
    #[error("Routing config root must be a map, received \"{0}\"")]
    NotAMap(&'static str),
}

/// Load a routing config tree from a `.toml` or `.json` file.
pub fn load_routing_file(path: &Path) -> Result<ConfigMap, LoadError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let content = fs::read_to_string(path)?;
    let map = match extension.as_str() {
        "toml" => parse_toml(&content)?,
        "json" => parse_json(&content)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    tracing::debug!(path = ?path, directives = map.len(), "Routing config loaded");
    Ok(map)
}

/// Parse a routing config tree from TOML text.
pub fn parse_toml(content: &str) -> Result<ConfigMap, LoadError> {
    let value: toml::Value = toml::from_str(content)?;
    into_root_map(value.into())
}

/// Parse a routing config tree from JSON text.
pub fn parse_json(content: &str) -> Result<ConfigMap, LoadError> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    into_root_map(value.into())
}

/// Load tool settings from a TOML file.
pub fn load_settings(path: &Path) -> Result<Settings, LoadError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

fn into_root_map(value: ConfigValue) -> Result<ConfigMap, LoadError> {
    match value {
        ConfigValue::Map(map) => Ok(map),
        other => Err(LoadError::NotAMap(other.type_name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_groups() {
        let map = parse_toml(
            r#"
            prefix = "api"

            [[routes]]
            route = "GET /users"
            action = "list"

            [[groups]]
            protocol = "https"
            "#,
        )
        .unwrap();

        assert_eq!(map["prefix"], ConfigValue::from("api"));
        assert_eq!(map["routes"].as_list().unwrap().len(), 1);
        assert!(map["groups"].as_list().unwrap()[0].as_map().is_some());
    }

    #[test]
    fn test_parse_json_rejects_non_map_root() {
        let err = parse_json(r#"["GET /"]"#).unwrap_err();
        assert!(matches!(err, LoadError::NotAMap("list")));
    }

    #[test]
    fn test_parse_json_syntax_error() {
        assert!(matches!(parse_json("{"), Err(LoadError::Json(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let path = std::env::temp_dir().join("router-configurator-loader-test.yaml");
        fs::write(&path, "prefix: v1\n").unwrap();

        let err = load_routing_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ref ext) if ext == "yaml"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file() {
        let err = load_routing_file(Path::new("/nonexistent/routes.toml")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
