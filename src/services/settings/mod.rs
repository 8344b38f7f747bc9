//! Loads the day-view configuration from `config.toml`.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;

use crate::models::settings::DayViewConfig;

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "SalonDayView", "SalonDayView")
}

/// Platform config location, e.g. `~/.config/salondayview/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Load and validate the config at `path`. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<DayViewConfig, ConfigError> {
    if !path.exists() {
        log::debug!("No config at {}, using defaults", path.display());
        return Ok(DayViewConfig::default());
    }

    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: DayViewConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate().map_err(ConfigError::Invalid)?;

    log::info!("Loaded day-view config from {}", path.display());
    Ok(config)
}

/// Load from the default location, logging and falling back to defaults on any error.
pub fn load_or_default() -> DayViewConfig {
    let Some(path) = default_config_path() else {
        return DayViewConfig::default();
    };
    match load_config(&path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Failed to load config: {}, using defaults", e);
            DayViewConfig::default()
        }
    }
}
