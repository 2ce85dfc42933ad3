use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::convert::Base;

/// Colour overrides for the form, as `#rrggbb` or `#rgb` strings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ThemeConfig {
    /// kitty-style colour file (`key #rrggbb` per line) to load first
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub danger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_dim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactive: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_selected: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Base selected when the form opens
    #[serde(default)]
    pub default_base: Base,

    /// Start with the last used base and save it on quit
    #[serde(default)]
    pub remember_last_base: bool,

    /// Last used base (written on quit when remembering)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_base: Option<Base>,

    /// tracing filter used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Where logs go while the TUI owns the terminal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    #[serde(default)]
    pub theme: ThemeConfig,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_base: Base::default(),
            remember_last_base: false,
            last_base: None,
            log_level: default_log_level(),
            log_file: None,
            theme: ThemeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Default config file path (`<config_dir>/radixform/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("radixform").join("config.toml"))
    }

    /// Load config from the default path.
    ///
    /// Never fails: problems are returned as warnings for the caller to log
    /// once logging is up, and the defaults are used instead.
    pub fn load() -> (Self, Vec<String>) {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => (
                AppConfig::default(),
                vec!["Could not find config directory, using defaults".to_string()],
            ),
        }
    }

    /// Load config from `path`, or create it with defaults when missing
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();

        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match Self::parse(&content) {
                    Ok(config) => return (config, warnings),
                    Err(e) => warnings.push(format!(
                        "Failed to parse config {}: {}",
                        path.display(),
                        e
                    )),
                },
                Err(e) => warnings.push(format!(
                    "Failed to read config {}: {}",
                    path.display(),
                    e
                )),
            }
            // Keep the user's broken file around instead of overwriting it
            return (AppConfig::default(), warnings);
        }

        let config = AppConfig::default();
        if let Err(e) = config.save_to(path) {
            warnings.push(format!("Could not write default config: {:#}", e));
        }
        (config, warnings)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save config to `path`, creating its directory
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Could not create config directory {}", dir.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Base the form starts with
    pub fn initial_base(&self) -> Base {
        if self.remember_last_base {
            self.last_base.unwrap_or(self.default_base)
        } else {
            self.default_base
        }
    }
}
