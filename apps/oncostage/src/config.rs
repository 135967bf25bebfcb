//! # Configuration
//!
//! Optional TOML file with CLI defaults:
//!
//! ```toml
//! locale = "ar"
//! json_mode = false
//! catalog_snapshot = "guidelines-2025.onco"
//! ```
//!
//! Lookup order: `--config <path>`, then `ONCOSTAGE_CONFIG`, then
//! `oncostage.toml` in the working directory. No file means defaults.
//! Command-line flags override whatever the file sets.

use oncostage_core::{Locale, OncoError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "ONCOSTAGE_CONFIG";

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "oncostage.toml";

/// Largest config file accepted (64 KB).
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Display language for option text and labels.
    #[serde(default = "default_locale")]
    pub locale: Locale,

    /// Print JSON instead of text.
    #[serde(default)]
    pub json_mode: bool,

    /// Alternate guideline catalog snapshot to use instead of the built-in one.
    #[serde(default)]
    pub catalog_snapshot: Option<PathBuf>,
}

fn default_locale() -> Locale {
    Locale::En
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            json_mode: false,
            catalog_snapshot: None,
        }
    }
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, OncoError> {
        toml::from_str(content).map_err(|e| OncoError::ConfigError(e.to_string()))
    }

    /// Read and parse one file. Relative `catalog_snapshot` paths are
    /// resolved against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self, OncoError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            OncoError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(OncoError::ConfigError(format!(
                "'{}' exceeds {} bytes",
                path.display(),
                MAX_CONFIG_FILE_SIZE
            )));
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            OncoError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;

        let mut config: Self = toml::from_str(&content)
            .map_err(|e| OncoError::ConfigError(format!("{}: {}", path.display(), e)))?;
        if let (Some(snapshot), Some(dir)) = (&config.catalog_snapshot, path.parent())
            && snapshot.is_relative()
        {
            config.catalog_snapshot = Some(dir.join(snapshot));
        }
        Ok(config)
    }

    /// Config file to use, if any.
    ///
    /// An explicit or environment path is returned even when it does not
    /// exist, so that loading it reports the mistake.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
            return Some(PathBuf::from(path));
        }
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        local.is_file().then_some(local)
    }

    /// Locate and load the config, falling back to defaults when no file
    /// applies.
    pub fn load(explicit: Option<&Path>) -> Result<Self, OncoError> {
        match Self::locate(explicit) {
            Some(path) => {
                let config = Self::from_file(&path)?;
                tracing::debug!("Loaded configuration from {:?}", path);
                Ok(config)
            }
            None => {
                tracing::debug!("No configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
