//! coach-tutor configuration
//!
//! Each setting resolves CLI → ENV → TOML → compiled default. The source
//! that won is logged at startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use coach_common::config::{
    resolve_optional, resolve_setting, CompiledDefaults, SettingSource, TomlConfig,
};
use tracing::{info, warn};

pub const ENV_INSIGHTS_URL: &str = "COACH_INSIGHTS_URL";
pub const ENV_INSIGHT_DELAY_MS: &str = "COACH_INSIGHT_DELAY_MS";
pub const ENV_CATALOG: &str = "COACH_CATALOG";

/// Values given on the command line, if any
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub insights_url: Option<String>,
    pub delay_ms: Option<u64>,
    pub catalog: Option<PathBuf>,
}

/// Resolved tutor settings
#[derive(Debug, Clone, PartialEq)]
pub struct TutorConfig {
    /// Root URL of the insight service
    pub insights_url: String,
    /// Delay between a navigation and its insight fetch
    pub insight_delay: Duration,
    /// Tutorial catalog file; None means the built-in catalog
    pub catalog_path: Option<PathBuf>,
}

impl TutorConfig {
    pub fn resolve(cli: &CliOverrides, toml: &TomlConfig) -> Self {
        let defaults = CompiledDefaults::get();

        let (insights_url, url_source) = resolve_setting(
            cli.insights_url.as_deref(),
            ENV_INSIGHTS_URL,
            toml.insights_url.as_deref(),
            &defaults.insights_url,
        );
        info!("Insight service: {} (from {})", insights_url, url_source);

        let cli_delay = cli.delay_ms.map(|ms| ms.to_string());
        let toml_delay = toml.insight_delay_ms.map(|ms| ms.to_string());
        let (delay_text, delay_source) = resolve_setting(
            cli_delay.as_deref(),
            ENV_INSIGHT_DELAY_MS,
            toml_delay.as_deref(),
            &defaults.insight_delay_ms.to_string(),
        );
        let delay_ms = match delay_text.trim().parse::<u64>() {
            Ok(ms) => ms,
            Err(_) => {
                warn!(
                    "Invalid insight delay '{}' (from {}), using {} ms",
                    delay_text, delay_source, defaults.insight_delay_ms
                );
                defaults.insight_delay_ms
            }
        };

        let cli_catalog = cli.catalog.as_deref().map(path_text);
        let toml_catalog = toml.catalog_path.as_deref().map(path_text);
        let catalog_path = resolve_optional(
            cli_catalog.as_deref(),
            ENV_CATALOG,
            toml_catalog.as_deref(),
        )
        .map(|(path, source)| {
            info!("Tutorial catalog: {} (from {})", path, source);
            PathBuf::from(path)
        });
        if catalog_path.is_none() {
            info!("Tutorial catalog: built-in (from {})", SettingSource::Default);
        }

        Self {
            insights_url,
            insight_delay: Duration::from_millis(delay_ms),
            catalog_path,
        }
    }
}

fn path_text(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
