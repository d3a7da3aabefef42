use super::types::Package;
use super::Universe;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk form of a universe: the packages handed over by the declaration loader.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UniverseSnapshot {
    #[serde(default)]
    pub packages: Vec<Package>,
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false)
}

/// Parse a snapshot from a string; `yaml` selects the YAML parser, JSON otherwise.
pub fn parse_universe(content: &str, yaml: bool) -> anyhow::Result<Universe> {
    let snapshot: UniverseSnapshot = if yaml {
        serde_yaml::from_str(content).context("Failed to parse YAML universe snapshot")?
    } else {
        serde_json::from_str(content).context("Failed to parse JSON universe snapshot")?
    };
    Ok(Universe::new(snapshot.packages))
}

/// Load a universe snapshot (`.yaml`/`.yml` as YAML, anything else as JSON).
pub fn load_universe(path: &Path) -> anyhow::Result<Universe> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read universe snapshot: {}", path.display()))?;
    let universe = parse_universe(&content, is_yaml(path))
        .with_context(|| format!("Invalid universe snapshot: {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        packages = universe.packages().len(),
        declarations = universe.declarations().count(),
        "loaded declaration universe"
    );
    Ok(universe)
}
