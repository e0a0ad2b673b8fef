use crate::error::RecipeError;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Environment variables consulted, in order, when no key is configured
pub const API_KEY_FALLBACK_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Raw configuration as read from file and environment
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// API key for the generation service
    pub api_key: Option<String>,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of the generation service (useful for proxies and tests)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Sampling temperature; the service default is used when unset
    pub temperature: Option<f32>,
    /// Request timeout in seconds; no timeout when unset
    pub timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            temperature: None,
            timeout_secs: None,
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with CULINARY_VISION__ prefix
    /// 2. The given file, or culinary-vision.toml in current directory
    /// 3. Default values
    ///
    /// Environment variable format: CULINARY_VISION__API_KEY
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        load_config(path)
    }
}

/// Load configuration from file and environment variables
///
/// An explicitly given file must exist; the default one may be missing.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name("culinary-vision").required(false),
    };

    let settings = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix("CULINARY_VISION")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

/// Validated configuration. Holding one means an API key is present.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: Option<f32>,
    pub timeout: Option<Duration>,
}

impl Settings {
    /// Settings with defaults for everything but the key
    pub fn new(api_key: impl Into<String>) -> Result<Self, RecipeError> {
        Self::from_config(AppConfig {
            api_key: Some(api_key.into()),
            ..AppConfig::default()
        })
    }

    /// Validate a loaded configuration, consulting the process environment
    /// for a fallback API key
    ///
    /// # Errors
    /// Returns [`RecipeError::MissingApiKey`] when no non-blank key is found
    pub fn from_config(config: AppConfig) -> Result<Self, RecipeError> {
        Self::from_config_with_env(config, |name| std::env::var(name).ok())
    }

    /// Like [`Settings::from_config`] with an explicit environment lookup
    pub fn from_config_with_env<F>(config: AppConfig, lookup: F) -> Result<Self, RecipeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = config
            .api_key
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                API_KEY_FALLBACK_VARS
                    .iter()
                    .filter_map(|name| lookup(name))
                    .find(|key| !key.trim().is_empty())
            })
            .ok_or(RecipeError::MissingApiKey)?;

        if config.model.trim().is_empty() {
            return Err(RecipeError::Config(ConfigError::Message(
                "model must not be empty".to_string(),
            )));
        }

        Ok(Settings {
            api_key: api_key.trim().to_string(),
            model: config.model,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            temperature: config.temperature,
            timeout: config.timeout_secs.map(Duration::from_secs),
        })
    }
}
