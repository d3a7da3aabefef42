//! Builder configuration.
//!
//! Defaults match the apiserver-builder layout. A project can override them
//! with an `apiregister.toml` file that sits alongside the universe snapshot,
//! and individual values can be overridden again from the environment:
//!
//! | Variable                          | Field                 |
//! |-----------------------------------|-----------------------|
//! | `APIREGISTER_METADATA_PACKAGE`    | `metadata_package`    |
//! | `APIREGISTER_METADATA_ALIAS`      | `metadata_alias`      |
//! | `APIREGISTER_CONTROLLER_MARKER`   | `controller_marker`   |
//! | `APIREGISTER_UNVERSIONED_OPT_OUT` | `unversioned_opt_out` |
//!
//! ```toml
//! metadata_package = "k8s.io/apimachinery/pkg/apis/meta/v1"
//! metadata_alias = "metav1"
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "apiregister.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Shared object-metadata package whose types are used in versioned form
    pub metadata_package: String,
    /// Import alias for `metadata_package`
    pub metadata_alias: String,
    /// Path segment at which a controller package path is cut to find the repo root
    pub controller_marker: String,
    /// Comment marker that suppresses the unversioned companion of a struct
    pub unversioned_opt_out: String,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        BuilderConfig {
            metadata_package: "k8s.io/apimachinery/pkg/apis/meta/v1".to_string(),
            metadata_alias: "metav1".to_string(),
            controller_marker: "/pkg/controller".to_string(),
            unversioned_opt_out: "+genregister:unversioned=false".to_string(),
        }
    }
}

impl BuilderConfig {
    /// Apply `APIREGISTER_*` environment overrides on top of `self`.
    pub fn with_env_overrides(mut self) -> Self {
        let overrides: [(&str, &mut String); 4] = [
            ("APIREGISTER_METADATA_PACKAGE", &mut self.metadata_package),
            ("APIREGISTER_METADATA_ALIAS", &mut self.metadata_alias),
            ("APIREGISTER_CONTROLLER_MARKER", &mut self.controller_marker),
            ("APIREGISTER_UNVERSIONED_OPT_OUT", &mut self.unversioned_opt_out),
        ];
        for (var, field) in overrides {
            if let Ok(value) = env::var(var) {
                if !value.is_empty() {
                    *field = value;
                }
            }
        }
        self
    }
}

/// Load a configuration file.
///
/// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but
/// cannot be read or parsed.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<BuilderConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read builder config: {}", config_path.display()))?;

    let config: BuilderConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse builder config: {}", config_path.display()))?;

    Ok(Some(config))
}

/// Resolve the config file path.
///
/// Priority:
/// 1. Explicitly provided path (via CLI)
/// 2. `apiregister.toml` alongside the universe snapshot
/// 3. None (defaults)
pub fn resolve_config_path(explicit_path: Option<&Path>, universe_path: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }
    let candidate = universe_path.parent()?.join(CONFIG_FILE_NAME);
    if candidate.exists() {
        Some(candidate)
    } else {
        None
    }
}

/// Resolve, load and env-override the configuration for a run.
pub fn load_builder_config(
    explicit_path: Option<&Path>,
    universe_path: &Path,
) -> anyhow::Result<BuilderConfig> {
    let config = match resolve_config_path(explicit_path, universe_path) {
        Some(path) => match load_config(&path)? {
            Some(config) => config,
            None if explicit_path.is_some() => {
                anyhow::bail!("Builder config not found: {}", path.display())
            }
            None => BuilderConfig::default(),
        },
        None => BuilderConfig::default(),
    };
    Ok(config.with_env_overrides())
}
