//! Configuration module for pixelfix
//!
//! Provides types and loading for `pxfix.toml`.

pub mod loader;
pub mod schema;

pub use loader::{
    discover_config, find_config, load_config, merge_cli_overrides, CliOverrides, ConfigError,
    CONFIG_FILE_NAME,
};
pub use schema::*;
