use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::license::policy::DEFAULT_FORBIDDEN;

/// Root configuration structure, deserialized from `.license-attest/config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// License policy rules.
    pub policy: PolicyConfig,
    /// Package registry lookups used by the npm and Python analyzers.
    pub registry: RegistryConfig,
}

/// Defines which licenses count as violations.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// License identifiers that are reported as violations when detected.
    pub forbidden: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            forbidden: DEFAULT_FORBIDDEN.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Query package registries for dependency licenses.
    pub enabled: bool,
    /// Per-request timeout in seconds. Lookups are never retried.
    pub timeout_secs: u64,
    pub npm_url: String,
    pub pypi_url: String,
    /// Also look up `devDependencies` of a `package.json`.
    pub include_dev_dependencies: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_secs: 3,
            npm_url: "https://registry.npmjs.org".to_string(),
            pypi_url: "https://pypi.org/pypi".to_string(),
            include_dev_dependencies: false,
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.license-attest/config.toml`
/// 3. `~/.config/license-attest/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".license-attest").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-attest")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("invalid config {}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(config)
}
