//! Generator configuration
//!
//! Every setting has a default matching the stock `protoc-gen-connect-gateway`
//! output, so a config file is optional. When present it is a TOML file,
//! usually `connect-gateway.toml` next to the schema:
//!
//! ```toml
//! comment_width = 97
//! package_suffix = "connect"
//! filename_extension = ".connect.gw.go"
//! generator_name = "protoc-gen-connect-gateway"
//! connect_gateway_import_path = "go.vallahaye.net/connect-gateway"
//! runtime_import_path = "github.com/grpc-ecosystem/grpc-gateway/v2/runtime"
//! ```
//!
//! `CONNECT_GATEWAY_COMMENT_WIDTH` and `CONNECT_GATEWAY_GENERATOR_NAME` override
//! the corresponding fields via [`GeneratorConfig::apply_env`].

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::generator::{GoPackages, COMMENT_WIDTH};
use crate::schema::GoImportPath;

/// File name looked for next to a schema when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "connect-gateway.toml";

/// Settings that shape the generated output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Column budget for wrapped doc comments
    pub comment_width: usize,
    /// Appended to the schema's Go package name to form the output package
    pub package_suffix: String,
    /// Extension of generated files
    pub filename_extension: String,
    /// Name written into the `Code generated by` header
    pub generator_name: String,
    /// Import path of the connect-gateway runtime
    pub connect_gateway_import_path: String,
    /// Import path of the grpc-gateway runtime providing `ServeMux`
    pub runtime_import_path: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            comment_width: COMMENT_WIDTH,
            package_suffix: "connect".to_string(),
            filename_extension: ".connect.gw.go".to_string(),
            generator_name: "protoc-gen-connect-gateway".to_string(),
            connect_gateway_import_path: "go.vallahaye.net/connect-gateway".to_string(),
            runtime_import_path: "github.com/grpc-ecosystem/grpc-gateway/v2/runtime".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Go packages the generated code refers to.
    pub fn go_packages(&self) -> GoPackages {
        GoPackages::new(
            GoImportPath::new(self.connect_gateway_import_path.clone()),
            GoImportPath::new(self.runtime_import_path.clone()),
        )
    }

    /// Apply `CONNECT_GATEWAY_*` environment overrides.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn apply_env(mut self) -> Self {
        if let Ok(val) = env::var("CONNECT_GATEWAY_COMMENT_WIDTH") {
            match val.trim().parse::<usize>() {
                Ok(width) if width > 0 => self.comment_width = width,
                _ => tracing::warn!(value = %val, "ignoring invalid CONNECT_GATEWAY_COMMENT_WIDTH"),
            }
        }
        if let Ok(name) = env::var("CONNECT_GATEWAY_GENERATOR_NAME") {
            if !name.trim().is_empty() {
                self.generator_name = name.trim().to_string();
            }
        }
        self
    }
}

/// Load generator configuration from a TOML file
///
/// # Returns
///
/// `Ok(Some(config))` if the file exists and parses,
/// `Ok(None)` if it doesn't exist (not an error),
/// `Err` if it exists but fails to parse.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<GeneratorConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path).with_context(|| {
        format!("Failed to read generator config: {}", config_path.display())
    })?;

    let config: GeneratorConfig = toml::from_str(&contents).with_context(|| {
        format!("Failed to parse generator config: {}", config_path.display())
    })?;

    Ok(Some(config))
}

/// Resolve the config path
///
/// Priority:
/// 1. Explicitly provided path, if it exists
/// 2. `connect-gateway.toml` next to the schema
/// 3. None
pub fn resolve_config_path(explicit_path: Option<&Path>, schema_path: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }
    let candidate = schema_path.parent()?.join(DEFAULT_CONFIG_FILE);
    candidate.exists().then_some(candidate)
}

/// Resolve, load and env-override the configuration for a schema, falling back to defaults.
pub fn config_for_schema(
    explicit_path: Option<&Path>,
    schema_path: &Path,
) -> anyhow::Result<GeneratorConfig> {
    let config = match resolve_config_path(explicit_path, schema_path) {
        Some(path) => load_config(&path)?.unwrap_or_default(),
        None => GeneratorConfig::default(),
    };
    Ok(config.apply_env())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use std::fs;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.comment_width, 97);
        assert_eq!(config.package_suffix, "connect");
        assert_eq!(config.filename_extension, ".connect.gw.go");
    }

    #[test]
    fn test_load_config_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("nope.toml")).unwrap().is_none());
    }

    #[test]
    fn test_load_config_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "package_suffix = \"gw\"\ncomment_width = 80\n").unwrap();
        let config = load_config(&path).unwrap().unwrap();
        assert_eq!(config.package_suffix, "gw");
        assert_eq!(config.comment_width, 80);
        assert_eq!(config.filename_extension, ".connect.gw.go");
    }

    #[test]
    fn test_load_config_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "comment_width = \"wide\"").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse generator config"));
    }

    #[test]
    fn test_resolve_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("greeter.yaml");
        assert!(resolve_config_path(None, &schema).is_none());

        let auto = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&auto, "").unwrap();
        assert_eq!(resolve_config_path(None, &schema), Some(auto.clone()));

        let explicit = dir.path().join("custom.toml");
        fs::write(&explicit, "").unwrap();
        assert_eq!(resolve_config_path(Some(&explicit), &schema), Some(explicit));

        let missing = dir.path().join("missing.toml");
        assert_eq!(resolve_config_path(Some(&missing), &schema), Some(auto));
    }
}
