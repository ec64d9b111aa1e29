//! Configuration file handling
//!
//! The CLI reads engine settings from `swipe.toml`. Every key is optional;
//! missing keys keep their defaults.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use swipe_core::SwipeConfig;

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "swipe.toml";

/// Load the engine configuration
///
/// An explicit path must exist. Without one, `swipe.toml` in the working
/// directory is used when present and the defaults otherwise.
pub fn load(path: Option<&Path>) -> Result<SwipeConfig> {
    let config = match path {
        Some(path) => parse_file(path)?,
        None => {
            let fallback = Path::new(CONFIG_FILE);
            if fallback.exists() {
                parse_file(fallback)?
            } else {
                tracing::debug!("no {} found, using defaults", CONFIG_FILE);
                SwipeConfig::default()
            }
        }
    };

    config
        .validate()
        .context("Invalid swipe configuration")?;
    Ok(config)
}

fn parse_file(path: &Path) -> Result<SwipeConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = parse(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::debug!("loaded configuration from {}", path.display());
    Ok(config)
}

pub fn parse(content: &str) -> Result<SwipeConfig> {
    Ok(toml::from_str(content)?)
}

/// Serialize to TOML string
pub fn to_toml(config: &SwipeConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize swipe config")
}
