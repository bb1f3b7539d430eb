//! Vellum configuration system
//!
//! This crate provides centralized configuration management for Vellum,
//! loading settings from `vellum.toml` as an alternative to environment
//! variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Vellum
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VellumConfig {
    /// Document-level settings
    pub document: DocumentConfig,
    /// Default text colors
    pub colors: ColorsConfig,
    /// Font size settings
    pub font_sizes: FontSizesConfig,
    /// Registered font families, in fallback order
    pub fonts: Vec<FontFamilyConfig>,
}

/// Document-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DocumentConfig {
    /// Path to an extra global stylesheet applied after the built-in sheets
    pub stylesheet: Option<PathBuf>,
}

/// Default text color configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    /// Color for ordinary text
    pub base: String,
    /// Color for text inside links
    pub link: String,
}

/// Font size configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizesConfig {
    /// Root font size in points
    pub base: f32,
}

/// One registered font family
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FontFamilyConfig {
    /// Family name as referenced by `font-family`
    pub name: String,
    /// Selectable faces within the family
    pub faces: Vec<FontFaceConfig>,
}

/// One selectable face of a family
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FontFaceConfig {
    pub bold: bool,
    pub italic: bool,
    pub weight: Option<f32>,
    /// Backend font-resource name
    pub source: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            base: "black".to_string(),
            link: "blue".to_string(),
        }
    }
}

impl Default for FontSizesConfig {
    fn default() -> Self {
        Self { base: 12.0 }
    }
}

impl VellumConfig {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the vellum.toml configuration file
    ///
    /// # Returns
    /// * `Ok(VellumConfig)` - Successfully loaded configuration
    /// * `Err(String)` - Error message if loading failed
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Load configuration from the default location (vellum.toml in the
    /// current directory) or return default configuration if file doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_from_file("vellum.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// This allows for temporary overrides without modifying the config file.
    pub fn merge_with_env(&mut self) {
        if let Ok(path) = std::env::var("VELLUM_STYLESHEET") {
            self.document.stylesheet = Some(PathBuf::from(path));
        }
        if let Ok(color) = std::env::var("VELLUM_BASE_COLOR") {
            self.colors.base = color;
        }
        if let Ok(color) = std::env::var("VELLUM_LINK_COLOR") {
            self.colors.link = color;
        }
        if let Ok(val) = std::env::var("VELLUM_BASE_SIZE") {
            if let Ok(size) = val.parse::<f32>() {
                self.font_sizes.base = size;
            }
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// This is the recommended way to load configuration:
    /// 1. Load from vellum.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
