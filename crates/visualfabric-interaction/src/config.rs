//! Configuration file management for VisualFabric.
//!
//! Reads `~/.config/visualfabric/config.toml`. The `VISUALFABRIC_API_URL`
//! environment variable overrides the base URL from the file.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use visualfabric_core::config::ServiceConfig;
use visualfabric_core::{FabricError, Result};

/// Environment variable that overrides `base_url`.
pub const API_URL_ENV: &str = "VISUALFABRIC_API_URL";

/// Loads the service configuration.
///
/// Priority (highest first):
/// 1. `VISUALFABRIC_API_URL` for the base URL
/// 2. `~/.config/visualfabric/config.toml`
/// 3. Built-in defaults
pub fn load_service_config() -> Result<ServiceConfig> {
    let path = get_config_path()?;
    let config = load_from_file(&path)?;
    Ok(apply_base_url_override(config, env::var(API_URL_ENV).ok()))
}

/// Reads a config file, falling back to defaults when it does not exist.
pub fn load_from_file(path: &Path) -> Result<ServiceConfig> {
    if !path.exists() {
        tracing::debug!(
            "[Config] No configuration file at {}, using defaults",
            path.display()
        );
        return Ok(ServiceConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        FabricError::config(format!(
            "Failed to read configuration file at {}: {}",
            path.display(),
            e
        ))
    })?;

    toml::from_str(&content).map_err(|e| {
        FabricError::config(format!(
            "Failed to parse configuration file at {}: {}",
            path.display(),
            e
        ))
    })
}

/// Replaces the base URL when an override is set and non-blank.
pub fn apply_base_url_override(config: ServiceConfig, base_url: Option<String>) -> ServiceConfig {
    match base_url {
        Some(url) if !url.trim().is_empty() => {
            tracing::debug!("[Config] Base URL overridden to {}", url.trim());
            config.with_base_url(url.trim())
        }
        _ => config,
    }
}

/// Returns the path to the configuration file: ~/.config/visualfabric/config.toml
pub fn get_config_path() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| FabricError::config("Could not determine home directory"))?;
    Ok(home.join(".config").join("visualfabric").join("config.toml"))
}
