//! Configuration loading and discovery for `pxfix.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::PxfixConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "pxfix.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse pxfix.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override the output size cap
    pub max_output: Option<u32>,
    /// Override preview scale
    pub preview_scale: Option<u32>,
}

/// Locate the pxfix.toml that applies to the current directory.
///
/// The nearest file in the current directory or one of its ancestors wins,
/// then `$XDG_CONFIG_HOME/pixelfix/pxfix.toml` (`~/.config` without XDG).
pub fn find_config() -> Option<PathBuf> {
    let user_config_dir = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")));
    discover_config(env::current_dir().ok().as_deref(), user_config_dir.as_deref())
}

/// Search `start` and its ancestors, then `user_config_dir/pixelfix`.
pub fn discover_config(start: Option<&Path>, user_config_dir: Option<&Path>) -> Option<PathBuf> {
    let project = start.into_iter().flat_map(Path::ancestors).map(Path::to_path_buf);
    let user = user_config_dir.map(|dir| dir.join("pixelfix"));
    project.chain(user).map(|dir| dir.join(CONFIG_FILE_NAME)).find(|path| path.is_file())
}

/// Load configuration from a pxfix.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("art/pxfix.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<PxfixConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            log::debug!("loading config from {}", p.display());
            load_config_file(&p)
        }
        None => Ok(PxfixConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<PxfixConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: PxfixConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. A lower
/// `max_output` also pulls the default output size down under the new cap.
pub fn merge_cli_overrides(config: &mut PxfixConfig, overrides: &CliOverrides) {
    if let Some(max_output) = overrides.max_output {
        let defaults = &mut config.defaults;
        defaults.max_output = max_output;
        if max_output > 0 {
            defaults.output_width = defaults.output_width.min(max_output);
            defaults.output_height = defaults.output_height.min(max_output);
        }
    }

    if let Some(scale) = overrides.preview_scale {
        config.defaults.preview_scale = scale;
    }
}
