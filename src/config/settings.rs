use anyhow::Result;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

use super::SessionConfig;
use crate::core::confirm::normalize_extension;

const APP_NAME: &str = "SimpleFilePicker";
const CONFIG_FILE: &str = "config.json";

/// Returns the platform-specific configuration directory for the application.
pub fn get_config_directory() -> Option<PathBuf> {
    ProjectDirs::from("com", "simplefilepicker", APP_NAME)
        .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
}

/// Returns the full path to the configuration file.
pub fn get_config_file_path() -> Option<PathBuf> {
    get_config_directory().map(|dir| dir.join(CONFIG_FILE))
}

fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(p) => Ok(p.to_path_buf()),
        None => get_config_file_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory")),
    }
}

/// Loads the session configuration from `path`, or from the platform config
/// location when `path` is `None`.
///
/// A missing file is created with defaults. A corrupt file logs a warning and
/// falls back to defaults instead of failing the session.
pub fn load_config(path: Option<&Path>) -> Result<SessionConfig> {
    let config_path = resolve_path(path)?;

    if !config_path.exists() {
        tracing::info!(
            "Config file not found, creating default config at {:?}",
            config_path
        );
        let default_config = SessionConfig::default();
        save_config(&default_config, Some(&config_path))?;
        return Ok(default_config);
    }

    let config_content = fs::read_to_string(&config_path)?;
    match serde_json::from_str::<SessionConfig>(&config_content) {
        Ok(mut config) => {
            config.default_extension = normalize_extension(&config.default_extension);
            tracing::info!("Loaded config from {:?}", config_path);
            Ok(config)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse config file at {:?}: {}. Falling back to default config.",
                config_path,
                e
            );
            Ok(SessionConfig::default())
        }
    }
}

/// Saves the configuration to `path`, or to the platform config location.
pub fn save_config(config: &SessionConfig, path: Option<&Path>) -> Result<()> {
    let config_path = resolve_path(path)?;

    if let Some(config_dir) = config_path.parent() {
        if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            tracing::info!("Created config directory: {:?}", config_dir);
        }
    }

    let config_json = serde_json::to_string_pretty(config)?;
    fs::write(&config_path, config_json)?;
    tracing::info!("Saved config to {:?}", config_path);

    Ok(())
}

/// Exports the configuration to a user-chosen JSON file.
pub fn export_config(config: &SessionConfig, export_path: &Path) -> Result<()> {
    let config_json = serde_json::to_string_pretty(config)?;
    fs::write(export_path, config_json)?;
    tracing::info!("Exported config to {:?}", export_path);
    Ok(())
}

/// Imports a configuration from a user-chosen JSON file. Unlike
/// [`load_config`], a malformed file is an error here.
pub fn import_config(import_path: &Path) -> Result<SessionConfig> {
    let config_content = fs::read_to_string(import_path)?;
    let mut config: SessionConfig = serde_json::from_str(&config_content)?;
    config.default_extension = normalize_extension(&config.default_extension);
    tracing::info!("Imported config from {:?}", import_path);
    Ok(config)
}
