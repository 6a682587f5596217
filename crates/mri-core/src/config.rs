//! Configuration types for mri.
//!
//! [`Config::load`] reads `~/.config/mri/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use crate::export::{ExportFormat, ExportOptions};
use crate::normalizer::NormalizeOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[import]
# default_source_name = "billing"
# default_unit        = "kWh"
# max_records         = 1000000

[export]
format = "csv"
# decimal_places = 3
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration, loaded from `~/.config/mri/config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// `[import]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportConfig {
    /// Source-system label used when the caller does not give one.
    #[serde(default)]
    pub default_source_name: Option<String>,
    /// Unit used when no unit column is mapped.
    #[serde(default)]
    pub default_unit: Option<String>,
    /// Refuse inputs with more records than this.
    #[serde(default)]
    pub max_records: Option<usize>,
}

impl ImportConfig {
    /// Normaliser options implied by this section. `date_format` comes from
    /// the mapping file, not from global config.
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            date_format: None,
            default_unit: self.default_unit.clone(),
        }
    }
}

/// `[export]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default)]
    pub decimal_places: Option<usize>,
}

impl ExportConfig {
    pub fn options(&self) -> ExportOptions {
        ExportOptions {
            decimal_places: self.decimal_places,
        }
    }
}

impl Config {
    /// Load from `~/.config/mri/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::from_path(&path)
    }

    /// Load an explicit file layered on top of the built-in defaults. The file
    /// must exist.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(true))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("mri")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
