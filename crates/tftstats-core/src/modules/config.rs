//! Configuration file loading.

use std::fs;
use std::path::{Path, PathBuf};
use tftstats_types::{AppConfig, ConfigError};

const DATA_DIR: &str = ".tftstats";
const CONFIG_FILE: &str = "tftstats.json";

/// Directory holding the configuration file.
///
/// `TFTSTATS_DATA_DIR` overrides the default `~/.tftstats`.
pub fn get_data_dir() -> Result<PathBuf, ConfigError> {
    if let Ok(custom_dir) = std::env::var("TFTSTATS_DATA_DIR") {
        return Ok(PathBuf::from(custom_dir));
    }
    let home = dirs::home_dir()
        .ok_or_else(|| ConfigError::NotFound { path: "home directory".to_string() })?;
    Ok(home.join(DATA_DIR))
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(get_data_dir()?.join(CONFIG_FILE))
}

/// Load configuration.
///
/// An explicit `path` must exist. Without one, a missing default file
/// yields the defaults. Environment overrides are applied last and the
/// result is validated.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => {
            let default_path = default_config_path()?;
            if default_path.exists() {
                read_config(&default_path)?
            } else {
                tracing::debug!(path = %default_path.display(), "no config file, using defaults");
                AppConfig::default()
            }
        },
    };

    apply_env_overrides(&mut config)?;
    config.validate()?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ConfigError::NotFound { path: path.display().to_string() },
        _ => ConfigError::ParseError { message: format!("{}: {}", path.display(), e) },
    })?;
    let config = serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(&e))?;
    tracing::info!(path = %path.display(), "loaded config");
    Ok(config)
}

fn apply_env_overrides(config: &mut AppConfig) -> Result<(), ConfigError> {
    apply_overrides(config, |name| std::env::var(name).ok())
}

/// Apply overrides read through `lookup`, which maps a variable name to its value.
fn apply_overrides(
    config: &mut AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(base_url) = lookup("TFTSTATS_BASE_URL") {
        config.client.base_url = base_url;
    }
    if let Some(stale) = lookup("TFTSTATS_STALE_TIME_MS") {
        config.cache.stale_time_ms = stale.parse().map_err(|_| ConfigError::ValidationError {
            field: "TFTSTATS_STALE_TIME_MS".to_string(),
            message: format!("'{}' is not a number of milliseconds", stale),
        })?;
    }
    Ok(())
}

/// Write `config` as pretty JSON, creating parent directories.
pub fn save_config(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::from_io_error(&e))?;
    }
    let content =
        serde_json::to_string_pretty(config).map_err(|e| ConfigError::from_json_error(&e))?;
    fs::write(path, content).map_err(|e| ConfigError::from_io_error(&e))
}
