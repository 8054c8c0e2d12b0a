//! Configuration loading and setting resolution
//!
//! Every setting is resolved in the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file is not an error: the module logs a warning and
//! starts on defaults.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Directory name under the platform config dir
pub const APP_DIR: &str = "chess-coach";

/// Logging section of the TOML file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing filter when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Contents of `<config_dir>/chess-coach/<module>.toml`
///
/// Both binaries read the same schema and ignore the keys they do not use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Listen address of the insight service
    pub bind_addr: Option<String>,
    /// Base URL the tutor uses to reach the insight service
    pub insights_url: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub primary_model: Option<String>,
    pub fallback_model: Option<String>,
    /// Tutorial catalog JSON file (built-in catalog when absent)
    pub catalog_path: Option<PathBuf>,
    /// Delay before an insight fetch follows a navigation
    pub insight_delay_ms: Option<u64>,
}

/// Compiled defaults used when no other source provides a value
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub bind_addr: String,
    pub insights_url: String,
    pub openai_base_url: String,
    pub primary_model: String,
    pub fallback_model: String,
    pub insight_delay_ms: u64,
    pub log_level: String,
}

impl CompiledDefaults {
    pub fn get() -> Self {
        Self {
            bind_addr: "127.0.0.1:5780".to_string(),
            insights_url: "http://127.0.0.1:5780".to_string(),
            openai_base_url: "https://api.openai.com/v1".to_string(),
            primary_model: "gpt-4o".to_string(),
            fallback_model: "gpt-3.5-turbo".to_string(),
            insight_delay_ms: 300,
            log_level: default_log_level(),
        }
    }
}

/// Where a resolved setting came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingSource {
    CommandLine,
    Environment,
    TomlFile,
    Default,
}

impl fmt::Display for SettingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SettingSource::CommandLine => "command line",
            SettingSource::Environment => "environment",
            SettingSource::TomlFile => "TOML",
            SettingSource::Default => "compiled default",
        };
        f.write_str(name)
    }
}

/// Non-empty, non-whitespace value check
pub fn is_set(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Resolve an optional setting: CLI → ENV → TOML
///
/// Blank values at any tier are skipped.
pub fn resolve_optional(
    cli_arg: Option<&str>,
    env_var_name: &str,
    toml_value: Option<&str>,
) -> Option<(String, SettingSource)> {
    if let Some(value) = cli_arg.filter(|v| is_set(v)) {
        return Some((value.to_string(), SettingSource::CommandLine));
    }

    if let Ok(value) = std::env::var(env_var_name) {
        if is_set(&value) {
            return Some((value, SettingSource::Environment));
        }
    }

    toml_value
        .filter(|v| is_set(v))
        .map(|v| (v.to_string(), SettingSource::TomlFile))
}

/// Resolve a setting with a compiled default: CLI → ENV → TOML → default
pub fn resolve_setting(
    cli_arg: Option<&str>,
    env_var_name: &str,
    toml_value: Option<&str>,
    default: &str,
) -> (String, SettingSource) {
    resolve_optional(cli_arg, env_var_name, toml_value)
        .unwrap_or_else(|| (default.to_string(), SettingSource::Default))
}

/// Default TOML path for a module, e.g. `~/.config/chess-coach/coach-tutor.toml`
pub fn default_config_path(module_name: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(format!("{}.toml", module_name)))
}

/// Parse a TOML config file
///
/// A missing file yields defaults (with a warning); an unreadable or
/// malformed file is a configuration error.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        warn!(
            "Config file {} not found, using defaults",
            path.display()
        );
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read TOML failed: {}", e)))?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Load the TOML config for a module
///
/// An explicitly requested file must exist. Without one, the module's
/// default path is tried and a missing file falls back to defaults.
pub fn load_module_config(explicit: Option<&Path>, module_name: &str) -> Result<TomlConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return load_toml_config(path);
    }

    match default_config_path(module_name) {
        Some(path) => load_toml_config(&path),
        None => {
            warn!("Could not determine config directory, using defaults");
            Ok(TomlConfig::default())
        }
    }
}
