//! Configuration file loading with precedence handling.

use crate::config::keybindings::{parse_key, KeyBindings};
use crate::model::KeyAction;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SYSLOG_VIEW_CONFIG";
/// Environment override for the initial page size.
pub const PAGE_SIZE_ENV: &str = "SYSLOG_VIEW_PAGE_SIZE";
/// Environment override for the snackbar timeout in milliseconds.
pub const SNACKBAR_TIMEOUT_ENV: &str = "SYSLOG_VIEW_SNACKBAR_TIMEOUT_MS";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A value parsed but is out of range.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Config key.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// `[keybindings]` names an action that does not exist.
    #[error("Unknown key binding action: {0}")]
    UnknownAction(String),

    /// `[keybindings]` contains a key spec that cannot be parsed.
    #[error("Invalid key {key:?} for action {action}")]
    InvalidKey {
        /// Action being bound.
        action: String,
        /// Offending key spec.
        key: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional. Corresponds to `~/.config/syslog-view/config.toml`:
///
/// ```toml
/// page_size = 100
/// page_size_options = [20, 50, 100, 200]
/// details_width = 60
/// snackbar_timeout_ms = 1500
///
/// [keybindings]
/// next_page = ["right", "n"]
/// toggle_live = ["f"]
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Initial page size.
    #[serde(default)]
    pub page_size: Option<u32>,
    /// Page sizes offered by the header.
    #[serde(default)]
    pub page_size_options: Option<Vec<u32>>,
    /// Initial details panel width, in cells.
    #[serde(default)]
    pub details_width: Option<f64>,
    /// How long snackbars stay up.
    #[serde(default)]
    pub snackbar_timeout_ms: Option<u64>,
    /// Floor for column resize.
    #[serde(default)]
    pub min_column_width: Option<f64>,
    /// Rows moved by page-step selection keys.
    #[serde(default)]
    pub page_step: Option<usize>,
    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
    /// Action name to key specs. Listed actions replace their default keys.
    #[serde(default)]
    pub keybindings: Option<BTreeMap<String, Vec<String>>>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file and env vars.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Initial `max_results`.
    pub page_size: u32,
    /// Page sizes offered by the header.
    pub page_size_options: Vec<u32>,
    /// Initial details panel width.
    pub details_width: f64,
    /// How long snackbars stay up, in milliseconds.
    pub snackbar_timeout_ms: u64,
    /// Floor for column and details resize.
    pub min_column_width: f64,
    /// Rows moved by page-step selection keys.
    pub page_step: usize,
    /// Log file location.
    pub log_file_path: PathBuf,
    /// Key bindings with overrides applied.
    pub keybindings: KeyBindings,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            page_size: 50,
            page_size_options: vec![20, 50, 100, 200],
            details_width: 400.0,
            snackbar_timeout_ms: 1000,
            min_column_width: 1.0,
            page_step: 20,
            log_file_path: default_log_path(),
            keybindings: KeyBindings::default(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/syslog-view/syslog-view.log` on Linux, or the platform
/// state directory elsewhere. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("syslog-view").join("syslog-view.log"),
        None => PathBuf::from("syslog-view.log"),
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist.
///
/// # Errors
///
/// Returns error if the file exists but cannot be read or parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Default config file path, `~/.config/syslog-view/config.toml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("syslog-view").join("config.toml"))
}

/// Load the config file with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument
/// 2. `SYSLOG_VIEW_CONFIG` environment variable
/// 3. Default path
///
/// Missing config files are not errors.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge config file into defaults.
///
/// # Errors
///
/// Returns error for out-of-range values and bad key bindings.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let resolved = ResolvedConfig {
        page_size: config.page_size.unwrap_or(defaults.page_size),
        page_size_options: config
            .page_size_options
            .unwrap_or(defaults.page_size_options),
        details_width: config.details_width.unwrap_or(defaults.details_width),
        snackbar_timeout_ms: config
            .snackbar_timeout_ms
            .unwrap_or(defaults.snackbar_timeout_ms),
        min_column_width: config.min_column_width.unwrap_or(defaults.min_column_width),
        page_step: config.page_step.unwrap_or(defaults.page_step),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        keybindings: apply_keybindings(defaults.keybindings, config.keybindings)?,
    };

    validate(&resolved)?;
    Ok(resolved)
}

fn validate(config: &ResolvedConfig) -> Result<(), ConfigError> {
    let invalid = |field, reason: &str| {
        Err(ConfigError::InvalidValue {
            field,
            reason: reason.to_owned(),
        })
    };

    if config.page_size == 0 {
        return invalid("page_size", "must be positive");
    }
    if config.page_size_options.contains(&0) {
        return invalid("page_size_options", "options must be positive");
    }
    if !(config.details_width.is_finite() && config.details_width > 0.0) {
        return invalid("details_width", "must be a positive number");
    }
    if !(config.min_column_width.is_finite() && config.min_column_width >= 1.0) {
        return invalid("min_column_width", "must be at least 1");
    }
    if config.page_step == 0 {
        return invalid("page_step", "must be positive");
    }
    Ok(())
}

fn apply_keybindings(
    mut bindings: KeyBindings,
    overrides: Option<BTreeMap<String, Vec<String>>>,
) -> Result<KeyBindings, ConfigError> {
    for (name, keys) in overrides.unwrap_or_default() {
        let action =
            KeyAction::parse(&name).ok_or_else(|| ConfigError::UnknownAction(name.clone()))?;

        bindings.unbind_action(action);
        for spec in keys {
            let key = parse_key(&spec).ok_or_else(|| ConfigError::InvalidKey {
                action: name.clone(),
                key: spec.clone(),
            })?;
            bindings.bind(key, action);
        }
    }
    Ok(bindings)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `SYSLOG_VIEW_PAGE_SIZE` and `SYSLOG_VIEW_SNACKBAR_TIMEOUT_MS`. Values
/// that do not parse (or a zero page size) are ignored with a warning.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(value) = std::env::var(PAGE_SIZE_ENV) {
        match value.trim().parse::<u32>() {
            Ok(page_size) if page_size > 0 => config.page_size = page_size,
            _ => warn!(var = PAGE_SIZE_ENV, %value, "ignoring invalid override"),
        }
    }

    if let Ok(value) = std::env::var(SNACKBAR_TIMEOUT_ENV) {
        match value.trim().parse::<u64>() {
            Ok(timeout) => config.snackbar_timeout_ms = timeout,
            Err(_) => warn!(var = SNACKBAR_TIMEOUT_ENV, %value, "ignoring invalid override"),
        }
    }

    config
}

/// Load and resolve configuration: defaults, then file, then environment.
///
/// # Errors
///
/// Returns error if a config file exists but is unreadable or invalid.
pub fn load_config(config_path: Option<PathBuf>) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    let merged = merge_config(file)?;
    Ok(apply_env_overrides(merged))
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
