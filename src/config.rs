use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::style::{NodeStyle, StylePalette};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub viewer: ViewerConfig,
    #[serde(default)]
    pub palette: PaletteConfig,
}

/// Viewer-specific configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ViewerConfig {
    /// Analyze endpoint of the remote document-analysis service.
    #[serde(default = "default_analyze_url")]
    pub analyze_url: String,
    /// File extensions the upload widget accepts.
    #[serde(default = "default_accepted_extensions")]
    pub accepted_extensions: Vec<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            analyze_url: default_analyze_url(),
            accepted_extensions: default_accepted_extensions(),
            log_level: default_log_level(),
        }
    }
}

/// Optional adjustments to the built-in style palette
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaletteConfig {
    /// Per-type color overrides, keyed by style key (e.g. "person").
    #[serde(default)]
    pub overrides: HashMap<String, NodeStyle>,
    /// Extra type-string aliases, e.g. wallet = "account".
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

fn default_analyze_url() -> String {
    "http://localhost:8000/analyze".to_string()
}

fn default_accepted_extensions() -> Vec<String> {
    [".pdf", ".doc", ".docx", ".xlsx", ".xls"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before
    /// loading config. Looks for the config file in this order:
    /// 1. Path specified in CASEGRAPH_CONFIG environment variable
    /// 2. ./config.toml in current directory
    pub fn load() -> Result<Self> {
        // .env file is optional; ignore errors
        let _ = dotenv::dotenv();

        let config_path = std::env::var("CASEGRAPH_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.toml"));

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config =
            toml::from_str(&config_str).context("Failed to parse config.toml")?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration, falling back to built-in defaults when no config
    /// file exists. Pure data commands work without one.
    pub fn load_or_default() -> Result<Self> {
        let _ = dotenv::dotenv();

        let config_path = std::env::var("CASEGRAPH_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.toml"));

        if !config_path.exists() {
            log::debug!(
                "No config file at {}; using defaults",
                config_path.display()
            );
            return Ok(Config::default());
        }

        Self::load()
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if !self.viewer.analyze_url.starts_with("http://")
            && !self.viewer.analyze_url.starts_with("https://")
        {
            anyhow::bail!(
                "viewer.analyze_url must be an http(s) URL, got: {}",
                self.viewer.analyze_url
            );
        }

        for ext in &self.viewer.accepted_extensions {
            if !ext.starts_with('.') {
                anyhow::bail!(
                    "viewer.accepted_extensions entries must start with '.', got: {}",
                    ext
                );
            }
        }

        for (key, style) in &self.palette.overrides {
            if style.background.is_empty() || style.border.is_empty() {
                anyhow::bail!("palette.overrides.{} must set background and border", key);
            }
        }

        Ok(())
    }

    /// Build the style palette with configured overrides and aliases applied
    /// on top of the built-in one.
    pub fn build_palette(&self) -> StylePalette {
        let mut palette = StylePalette::default();
        for (key, style) in &self.palette.overrides {
            palette.insert(key, style.clone());
        }
        for (from, to) in &self.palette.aliases {
            palette.alias(from, to);
        }
        palette
    }
}
