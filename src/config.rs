//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/categorytree/categorytree.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `CATEGORYTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, Limits};

/// Default bound for query file names, in bytes.
pub const DEFAULT_MAX_FILENAME_LEN: usize = 50;

/// Unified configuration for categorytree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Longest accepted query file name in bytes
    pub max_filename_len: usize,
    /// Emit a diagnostic for unknown operation keywords instead of skipping silently
    pub report_unknown_operations: bool,
    /// Bounds applied to category data
    pub limits: Limits,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_filename_len: DEFAULT_MAX_FILENAME_LEN,
            report_unknown_operations: false,
            limits: Limits::default(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified, inherit").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub max_filename_len: Option<usize>,
    pub report_unknown_operations: Option<bool>,
    pub limits: RawLimits,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawLimits {
    pub max_name_len: Option<usize>,
    pub max_line_len: Option<usize>,
}

/// Get the XDG config directory for categorytree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "categorytree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("categorytree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            max_filename_len: overlay.max_filename_len.unwrap_or(self.max_filename_len),
            report_unknown_operations: overlay
                .report_unknown_operations
                .unwrap_or(self.report_unknown_operations),
            limits: Limits {
                max_name_len: overlay.limits.max_name_len.or(self.limits.max_name_len),
                max_line_len: overlay.limits.max_line_len.or(self.limits.max_line_len),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = config_file {
            debug!("explicit config: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply CATEGORYTREE_* environment variables as explicit overrides.
    ///
    /// Nested keys use a double underscore: `CATEGORYTREE_LIMITS__MAX_NAME_LEN=50`.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("CATEGORYTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get::<usize>("max_filename_len") {
            settings.max_filename_len = val;
        }
        if let Ok(val) = config.get_bool("report_unknown_operations") {
            settings.report_unknown_operations = val;
        }
        if let Ok(val) = config.get::<usize>("limits.max_name_len") {
            settings.limits.max_name_len = Some(val);
        }
        if let Ok(val) = config.get::<usize>("limits.max_line_len") {
            settings.limits.max_line_len = Some(val);
        }

        Ok(settings)
    }

    /// Render as TOML, e.g. as a template for a config file.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }
}
