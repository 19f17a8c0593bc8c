//! Configuration module for pubdiff
//!
//! Implements the configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (PUBDIFF_*)
//! 3. Project config (pubdiff.toml)
//! 4. Built-in defaults (lowest priority)

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PubdiffError, PubdiffResult};

/// Default config file name looked up at the project root
pub const CONFIG_FILE: &str = "pubdiff.toml";

/// Lock file location configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockConfig {
    /// Path of the lock file inside the repository
    #[serde(default = "default_lock_path")]
    pub path: String,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            path: default_lock_path(),
        }
    }
}

fn default_lock_path() -> String {
    "pubspec.lock".to_string()
}

/// Comparison configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DiffConfig {
    /// Base git revision to compare the working tree against
    #[serde(default)]
    pub base: Option<String>,
}

/// Report configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ReportConfig {
    /// Output format: text, markdown or json
    #[serde(default)]
    pub format: Option<String>,

    /// Warning line included in markdown reports when changes exist
    #[serde(default)]
    pub warning_text: Option<String>,

    /// Emit a report even when nothing changed
    #[serde(default)]
    pub always: bool,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Library names to track
    #[serde(default)]
    pub libraries: Vec<String>,

    #[serde(default)]
    pub lock: LockConfig,

    #[serde(default)]
    pub diff: DiffConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// The unknown key, as a dotted path into the document
    pub key: String,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> PubdiffResult<Self> {
        let (config, _warnings) = Self::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (unknown keys).
    pub fn load_with_warnings(path: &Path) -> PubdiffResult<(Self, Vec<ConfigWarning>)> {
        let content = fs::read_to_string(path)?;

        let mut unknown_keys: Vec<String> = Vec::new();
        let deserializer = toml::de::Deserializer::new(&content);

        let config: Self = serde_ignored::deserialize(deserializer, |key| {
            unknown_keys.push(key.to_string());
        })
        .map_err(|e| PubdiffError::InvalidConfig {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let warnings = unknown_keys
            .into_iter()
            .map(|key| ConfigWarning { key })
            .collect();

        Ok((config, warnings))
    }

    /// Load from the project config if present, else defaults.
    /// Environment overrides apply either way.
    pub fn load_or_default(project_root: &Path) -> PubdiffResult<(Self, Vec<ConfigWarning>)> {
        let config_path = project_root.join(CONFIG_FILE);
        if config_path.exists() {
            let (config, warnings) = Self::load_with_warnings(&config_path)?;
            return Ok((config.with_env_overrides(), warnings));
        }

        Ok((Self::default().with_env_overrides(), Vec::new()))
    }

    /// Apply environment variable overrides (PUBDIFF_* prefix)
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(libraries) = std::env::var("PUBDIFF_LIBRARIES") {
            self.libraries = libraries
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Ok(path) = std::env::var("PUBDIFF_LOCK_PATH") {
            self.lock.path = path;
        }

        if let Ok(base) = std::env::var("PUBDIFF_BASE") {
            self.diff.base = Some(base);
        }

        if let Ok(format) = std::env::var("PUBDIFF_FORMAT") {
            self.report.format = Some(format);
        }

        self
    }
}
