//! Configuration loader with XDG-compliant path resolution
//!
//! Loads configuration from multiple locations with layered priority:
//! 1. `/etc/mcp-hatchery/config.toml` (lowest priority)
//! 2. `~/.config/mcp-hatchery/config.toml`
//! 3. `~/.mcp-hatchery.toml`
//! 4. `./.mcp-hatchery.toml` (highest priority)

use std::path::PathBuf;

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use super::model::Config;

/// Application name used for XDG directories
const APP_NAME: &str = "mcp-hatchery";

/// Environment variable prefix
const ENV_PREFIX: &str = "MCP_HATCHERY_";

/// Get XDG config search paths in priority order (lowest to highest)
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from(format!("/etc/{}/config.toml", APP_NAME)));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(APP_NAME).join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(format!(".{}.toml", APP_NAME)));
    }

    paths.push(PathBuf::from(format!(".{}.toml", APP_NAME)));

    paths
}

/// Load configuration with XDG layering
///
/// Configurations are merged in priority order, with later files
/// overriding earlier ones. Environment variables with prefix
/// `MCP_HATCHERY_` override all file-based configuration.
///
/// # Arguments
/// * `override_path` - Optional path to a config file that takes highest priority
pub fn load_config(override_path: Option<&str>) -> Result<Config> {
    let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

    for path in config_paths() {
        if path.exists() {
            tracing::debug!("Loading config from: {}", path.display());
            figment = figment.merge(Toml::file(&path));
        }
    }

    if let Some(path) = override_path {
        let path = PathBuf::from(path);
        if path.exists() {
            tracing::debug!("Loading override config from: {}", path.display());
            figment = figment.merge(Toml::file(&path));
        } else {
            tracing::warn!("Override config not found: {}", path.display());
        }
    }

    // Format: MCP_HATCHERY_REMOTE__CLONE_TIMEOUT=60
    // Maps to: remote.clone_timeout = 60
    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    figment.extract().context("Failed to load configuration")
}

/// Find all existing config files (for introspection)
pub fn find_config_files() -> Vec<PathBuf> {
    config_paths().into_iter().filter(|p| p.exists()).collect()
}
