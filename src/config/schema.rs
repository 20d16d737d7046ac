//! Configuration schema types for `pxfix.toml`
//!
//! Defines the structure and validation rules for pixelfix configuration.

use serde::{Deserialize, Serialize};

use crate::models::OutputDimensions;

/// Default settings applied when an image is opened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Output width used when the estimator finds no exact match
    #[serde(default = "default_output_side")]
    pub output_width: u32,
    /// Output height used when the estimator finds no exact match
    #[serde(default = "default_output_side")]
    pub output_height: u32,
    /// Upper bound for either output side
    #[serde(default = "default_max_output")]
    pub max_output: u32,
    /// Integer scale for the gridded preview image
    #[serde(default = "default_preview_scale")]
    pub preview_scale: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_width: default_output_side(),
            output_height: default_output_side(),
            max_output: default_max_output(),
            preview_scale: default_preview_scale(),
        }
    }
}

impl DefaultsConfig {
    /// Default output size, clamped into `1..=max_output`.
    pub fn output(&self) -> OutputDimensions {
        let max = self.max_output.max(1);
        let w = self.output_width.clamp(1, max);
        let h = self.output_height.clamp(1, max);
        OutputDimensions::new(w, h).unwrap_or(OutputDimensions::DEFAULT)
    }
}

fn default_output_side() -> u32 {
    32
}

fn default_max_output() -> u32 {
    256
}

fn default_preview_scale() -> u32 {
    8
}

/// Grid line colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// RGBA color of grid lines drawn over the source image
    #[serde(default = "default_grid_color")]
    pub grid_color: [u8; 4],
    /// RGBA color of cell lines drawn over the upscaled preview
    #[serde(default = "default_preview_color")]
    pub preview_color: [u8; 4],
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self { grid_color: default_grid_color(), preview_color: default_preview_color() }
    }
}

/// White at 60% opacity
fn default_grid_color() -> [u8; 4] {
    [255, 255, 255, 153]
}

/// Black at 30% opacity
fn default_preview_color() -> [u8; 4] {
    [0, 0, 0, 77]
}

/// Complete pxfix.toml configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PxfixConfig {
    /// Default settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Overlay colors
    #[serde(default)]
    pub overlay: OverlayConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "defaults.max_output")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pxfix.toml: '{}' {}", self.field, self.message)
    }
}

impl PxfixConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let defaults = &self.defaults;

        for (field, value) in [
            ("defaults.output_width", defaults.output_width),
            ("defaults.output_height", defaults.output_height),
            ("defaults.max_output", defaults.max_output),
            ("defaults.preview_scale", defaults.preview_scale),
        ] {
            if value == 0 {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: "must be a positive integer".to_string(),
                });
            }
        }

        if defaults.max_output > 0 {
            if defaults.output_width > defaults.max_output {
                errors.push(ConfigValidationError {
                    field: "defaults.output_width".to_string(),
                    message: format!("must not exceed max_output ({})", defaults.max_output),
                });
            }
            if defaults.output_height > defaults.max_output {
                errors.push(ConfigValidationError {
                    field: "defaults.output_height".to_string(),
                    message: format!("must not exceed max_output ({})", defaults.max_output),
                });
            }
        }

        if defaults.preview_scale > 64 {
            errors.push(ConfigValidationError {
                field: "defaults.preview_scale".to_string(),
                message: "must be at most 64".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_parse() {
        let config: PxfixConfig = toml::from_str("").unwrap();
        assert_eq!(config, PxfixConfig::default());
        assert_eq!(config.defaults.output_width, 32);
        assert_eq!(config.defaults.output_height, 32);
        assert_eq!(config.defaults.max_output, 256);
        assert_eq!(config.overlay.grid_color, [255, 255, 255, 153]);
        assert!(config.is_valid());
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
[defaults]
output_width = 64
output_height = 48
max_output = 128
preview_scale = 4

[overlay]
grid_color = [255, 0, 255, 200]
preview_color = [0, 0, 0, 255]
"#;
        let config: PxfixConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.defaults.output(), OutputDimensions::new(64, 48).unwrap());
        assert_eq!(config.defaults.preview_scale, 4);
        assert_eq!(config.overlay.grid_color, [255, 0, 255, 200]);
        assert!(config.is_valid());
    }

    #[test]
    fn test_partial_defaults_section() {
        let config: PxfixConfig = toml::from_str("[defaults]\noutput_width = 16").unwrap();
        assert_eq!(config.defaults.output_width, 16);
        assert_eq!(config.defaults.output_height, 32);
        assert_eq!(config.defaults.max_output, 256);
    }

    #[test]
    fn test_validate_zero_values() {
        let mut config = PxfixConfig::default();
        config.defaults.output_width = 0;
        config.defaults.preview_scale = 0;

        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.field == "defaults.output_width"));
        assert!(errors.iter().any(|e| e.field == "defaults.preview_scale"));
    }

    #[test]
    fn test_validate_output_above_max() {
        let mut config = PxfixConfig::default();
        config.defaults.max_output = 16;

        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].to_string().contains("must not exceed max_output (16)"));
    }

    #[test]
    fn test_defaults_output_clamps() {
        let defaults = DefaultsConfig { output_width: 500, output_height: 0, ..Default::default() };
        assert_eq!(defaults.output(), OutputDimensions::new(256, 1).unwrap());
    }
}
