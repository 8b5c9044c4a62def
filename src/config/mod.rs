//! Configuration module
//!
//! Handles loading and validating settings from YAML files and environment variables.
//! Settings are built once in `main` and handed to the rest of the server by
//! reference; nothing reads them through global state.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

/// Environment variable naming an explicit settings file
pub const SETTINGS_PATH_ENV: &str = "CODESEARCH_SETTINGS_PATH";

/// Load settings from the first file found, or use defaults
pub fn load() -> Result<Settings> {
    let mut settings = match find_settings_file() {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(&path)?
        }
        None => {
            info!("No settings file found, using defaults");
            Settings::default()
        }
    };
    settings.merge_env();
    settings.validate()?;
    Ok(settings)
}

fn find_settings_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(SETTINGS_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/codesearch/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("codesearch-web/settings.yml"));
    }

    paths.into_iter().find(|p| p.exists())
}
