//! YAML style files.
//!
//! A style file is a partial [`LayoutConfig`]: every section and every value
//! is optional and falls back to the built-in default.
//!
//! ```yaml
//! glyph:
//!   body_length: 36.0
//!   coil_loops: 3
//! sallen_key:
//!   feedback_clearance: 90.0
//! ```

use filterdraw_layout::LayoutConfig;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read style file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Loader for [`LayoutConfig`] style files.
pub struct StyleConfig;

impl StyleConfig {
    /// Load a style from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<LayoutConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse a style from YAML text. An empty document yields the defaults.
    pub fn parse(yaml: &str) -> Result<LayoutConfig, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(LayoutConfig::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// The default style as YAML.
    pub fn default_yaml() -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(&LayoutConfig::default())?)
    }
}
