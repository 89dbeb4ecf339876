use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Gemini REST API base URL.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Call-to-action link shown under every resolved diagnostic.
pub const DEFAULT_CTA_URL: &str = "/#contato";

#[derive(Debug, Clone, Deserialize)]
pub struct DiagnosticConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub models: ModelConfig,
    pub google: GoogleConfig,
    pub landing: LandingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// First-choice model (e.g., gemini-2.0-flash)
    pub primary_model: String,
    /// Tried once when the primary call fails (e.g., gemini-1.5-flash)
    pub fallback_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    /// Empty when unset; every model call then fails with `NotConfigured`.
    pub api_key: String,
    pub api_base: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LandingConfig {
    pub cta_url: String,
}

impl DiagnosticConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(DiagnosticConfig {
            common: common_config,
            models: ModelConfig {
                primary_model: get_env(
                    "DIAGNOSTIC_PRIMARY_MODEL",
                    Some("gemini-2.0-flash"),
                    is_prod,
                )?,
                fallback_model: get_env(
                    "DIAGNOSTIC_FALLBACK_MODEL",
                    Some("gemini-1.5-flash"),
                    is_prod,
                )?,
            },
            google: GoogleConfig {
                // A missing key is not a startup error: the service still
                // answers, with the fixed failure response.
                api_key: env::var("GOOGLE_API_KEY").unwrap_or_default(),
                api_base: get_env("GEMINI_API_BASE", Some(DEFAULT_GEMINI_API_BASE), false)?,
            },
            landing: LandingConfig {
                cta_url: get_env("DIAGNOSTIC_CTA_URL", Some(DEFAULT_CTA_URL), false)?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
