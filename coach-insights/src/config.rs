//! coach-insights configuration
//!
//! Each setting resolves CLI → ENV → TOML → compiled default. The API key
//! has no default and is only read from the environment or the TOML file.

use coach_common::config::{is_set, resolve_setting, CompiledDefaults, TomlConfig};
use tracing::{info, warn};

pub const ENV_BIND: &str = "COACH_INSIGHTS_BIND";
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_BASE_URL: &str = "COACH_OPENAI_BASE_URL";
pub const ENV_PRIMARY_MODEL: &str = "COACH_PRIMARY_MODEL";
pub const ENV_FALLBACK_MODEL: &str = "COACH_FALLBACK_MODEL";

/// Resolved service settings
#[derive(Clone, PartialEq)]
pub struct InsightsConfig {
    pub bind_addr: String,
    pub api_key: Option<String>,
    pub openai_base_url: String,
    pub primary_model: String,
    pub fallback_model: String,
}

// Keeps the API key out of logs
impl std::fmt::Debug for InsightsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightsConfig")
            .field("bind_addr", &self.bind_addr)
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("openai_base_url", &self.openai_base_url)
            .field("primary_model", &self.primary_model)
            .field("fallback_model", &self.fallback_model)
            .finish()
    }
}

impl InsightsConfig {
    pub fn resolve(cli_bind: Option<&str>, toml: &TomlConfig) -> Self {
        let defaults = CompiledDefaults::get();

        let (bind_addr, bind_source) = resolve_setting(
            cli_bind,
            ENV_BIND,
            toml.bind_addr.as_deref(),
            &defaults.bind_addr,
        );
        info!("Bind address: {} (from {})", bind_addr, bind_source);

        let (openai_base_url, _) = resolve_setting(
            None,
            ENV_BASE_URL,
            toml.openai_base_url.as_deref(),
            &defaults.openai_base_url,
        );
        let (primary_model, _) = resolve_setting(
            None,
            ENV_PRIMARY_MODEL,
            toml.primary_model.as_deref(),
            &defaults.primary_model,
        );
        let (fallback_model, _) = resolve_setting(
            None,
            ENV_FALLBACK_MODEL,
            toml.fallback_model.as_deref(),
            &defaults.fallback_model,
        );
        info!(
            "Models: {} (fallback {}) at {}",
            primary_model, fallback_model, openai_base_url
        );

        Self {
            bind_addr,
            api_key: resolve_api_key(toml),
            openai_base_url,
            primary_model,
            fallback_model,
        }
    }
}

/// ENV → TOML, warning when both are set
pub fn resolve_api_key(toml: &TomlConfig) -> Option<String> {
    let env_key = std::env::var(ENV_API_KEY).ok().filter(|k| is_set(k));
    let toml_key = toml.openai_api_key.clone().filter(|k| is_set(k));

    if env_key.is_some() && toml_key.is_some() {
        warn!(
            "OpenAI API key found in both {} and the TOML file, using the environment",
            ENV_API_KEY
        );
    }

    match (env_key, toml_key) {
        (Some(key), _) => {
            info!("OpenAI API key loaded from environment");
            Some(key)
        }
        (None, Some(key)) => {
            info!("OpenAI API key loaded from TOML");
            Some(key)
        }
        (None, None) => {
            warn!(
                "No OpenAI API key configured (set {}); insight requests will fail",
                ENV_API_KEY
            );
            None
        }
    }
}
