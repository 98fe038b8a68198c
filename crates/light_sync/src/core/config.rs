//! # Light Sync Configuration
//!
//! Configuration for the pieces around light synchronization that a host
//! renderer tunes: where light assets are resolved from, which optional
//! light features are loaded, and how much geometry the software
//! acceleration scene may hold.
//!
//! ## Configuration Categories
//!
//! - **Asset Config**: search paths and feature toggles for light textures
//!   and IES profiles
//! - **Accel Config**: software acceleration scene limits
//! - **Light Sync Config**: top-level container plus the log level

use serde::{Serialize, Deserialize};
use std::path::PathBuf;

pub use crate::config::{Config, ConfigError};

/// # Asset Configuration
///
/// Controls how texture and IES file paths authored on lights are resolved
/// and whether those optional features are loaded at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directories tried, in order, for relative asset paths
    pub search_paths: Vec<PathBuf>,
    /// Whether light textures (rect/dome) are decoded
    pub enable_textures: bool,
    /// Whether IES profiles are parsed
    pub enable_ies: bool,
}

impl AssetConfig {
    /// Create a new asset configuration
    pub fn new() -> Self {
        Self {
            search_paths: vec![PathBuf::from(".")],
            enable_textures: true,
            enable_ies: true,
        }
    }

    /// Append a search path
    pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    /// Enable or disable light texture decoding
    pub fn with_textures(mut self, enabled: bool) -> Self {
        self.enable_textures = enabled;
        self
    }

    /// Enable or disable IES profile parsing
    pub fn with_ies(mut self, enabled: bool) -> Self {
        self.enable_ies = enabled;
        self
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Acceleration Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccelConfig {
    /// Maximum number of geometries the software scene holds before
    /// reporting resource exhaustion
    pub max_geometries: usize,
}

impl AccelConfig {
    /// Create a new acceleration configuration
    pub fn new() -> Self {
        Self { max_geometries: 4096 }
    }

    /// Set the geometry capacity
    pub fn with_max_geometries(mut self, max_geometries: usize) -> Self {
        self.max_geometries = max_geometries;
        self
    }
}

impl Default for AccelConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete Light Sync Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightSyncConfig {
    /// Default log level filter
    pub log_level: String,
    /// Asset resolution configuration
    pub assets: AssetConfig,
    /// Acceleration scene configuration
    pub accel: AccelConfig,
}

impl LightSyncConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            assets: AssetConfig::default(),
            accel: AccelConfig::default(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];
        if !LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!("unknown log level: {}", self.log_level)));
        }

        if self.accel.max_geometries == 0 {
            return Err(ConfigError::Invalid("max_geometries must be at least 1".to_string()));
        }

        if self.assets.search_paths.is_empty() {
            return Err(ConfigError::Invalid("at least one asset search path is required".to_string()));
        }

        Ok(())
    }
}

impl Default for LightSyncConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for LightSyncConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(LightSyncConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = LightSyncConfig::default().with_log_level("loud");
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = LightSyncConfig::default();
        config.accel = AccelConfig::new().with_max_geometries(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_partial_file_uses_defaults() {
        let parsed: LightSyncConfig = toml::from_str(
            "log_level = \"debug\"\n[assets]\nenable_ies = false\n",
        )
        .unwrap();

        assert_eq!(parsed.log_level, "debug");
        assert!(!parsed.assets.enable_ies);
        assert!(parsed.assets.enable_textures);
        assert_eq!(parsed.accel, AccelConfig::default());
    }

    #[test]
    fn test_save_and_load_ron() {
        let path = std::env::temp_dir().join(format!("light_sync_cfg_{}.ron", std::process::id()));
        let config = LightSyncConfig::default()
            .with_log_level("warn");

        config.save_to_file(&path).unwrap();
        let loaded = LightSyncConfig::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = LightSyncConfig::load_from_file("settings.yaml");
        assert!(result.is_err());
    }
}
