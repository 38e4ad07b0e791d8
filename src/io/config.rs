//! Generator configuration files.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::sim::generator::GeneratorConfig;

/// Reads a JSON generator configuration. Missing fields take their defaults.
pub fn read_config(path: &Path) -> Result<GeneratorConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let config: GeneratorConfig = serde_json::from_str(&json)
        .with_context(|| format!("Failed to deserialize config from: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config: {}", path.display()))?;
    Ok(config)
}
