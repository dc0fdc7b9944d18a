//! # Application Configuration
//!
//! This module defines the configuration shared by the server and the CLI and
//! the logic for loading it. Values are layered, later layers winning:
//!
//! 1. Programmatic defaults.
//! 2. An optional `config.yml`, with `${VAR}` placeholders substituted from the environment.
//! 3. Plain environment variables: `PORT`, `DB_URL`, `AI_PROVIDER`, `AI_API_URL`, `AI_MODEL`.
//! 4. `BIZQUERY_` prefixed variables for nested keys (e.g., `BIZQUERY_AGENT__MAX_ROWS`).
//!
//! The API key is read from `ai.api_key`, then `AI_API_KEY`, then `GROQ_API_KEY`.

use crate::constants::{
    DEFAULT_AI_API_URL, DEFAULT_AI_MODEL, DEFAULT_DB_FILE, DEFAULT_MAX_ROWS, DEFAULT_MAX_TOKENS,
    DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS,
};
use crate::errors::AgentError;
use crate::types::GenerationOptions;
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates an explicitly requested configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

impl From<ConfigError> for AgentError {
    fn from(err: ConfigError) -> Self {
        AgentError::Configuration(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The path to the SQLite database file. Loaded from `DB_URL` env var.
    #[serde(default = "default_db_url")]
    pub db_url: String,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub agent: AgentConfig,
}

fn default_port() -> u16 {
    8501
}

fn default_db_url() -> String {
    DEFAULT_DB_FILE.to_string()
}

/// Which completion API to call and how.
#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// "openai" (any OpenAI-compatible hosted API), "local" or "gemini".
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Endpoint URL. Defaults depend on the provider.
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model_name")]
    pub model_name: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_provider() -> String {
    "openai".to_string()
}
fn default_model_name() -> String {
    DEFAULT_AI_MODEL.to_string()
}
fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}
fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_url: None,
            api_key: None,
            model_name: default_model_name(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AiConfig {
    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            model: self.model_name.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The configured endpoint, or the default one for the provider.
    pub fn resolved_api_url(&self) -> String {
        match &self.api_url {
            Some(url) if !url.trim().is_empty() => url.clone(),
            _ if self.provider == "gemini" => {
                crate::providers::ai::gemini::GeminiProvider::default_url(&self.model_name)
            }
            _ => DEFAULT_AI_API_URL.to_string(),
        }
    }

    /// The API key, if one is configured and non-empty.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

/// Behaviour switches for the query agent.
#[derive(Debug, Deserialize, Clone)]
pub struct AgentConfig {
    /// Answer a few common questions with fixed SQL instead of calling the model.
    #[serde(default = "default_true")]
    pub use_shortcuts: bool,
    /// Ask the model for a short business analysis of the rows.
    #[serde(default = "default_true")]
    pub interpret_results: bool,
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
    /// Extra attempts after a transient completion API failure.
    #[serde(default)]
    pub max_retries: u32,
}

fn default_true() -> bool {
    true
}
fn default_max_rows() -> usize {
    DEFAULT_MAX_ROWS
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            use_shortcuts: true,
            interpret_results: true,
            max_rows: DEFAULT_MAX_ROWS,
            max_retries: 0,
        }
    }
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &Path) -> Result<Option<String>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| {
        ConfigError::General(format!(
            "Failed to read config file '{}': {e}",
            path.display()
        ))
    })?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(e.to_string()))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        env::var(&caps["var"]).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Maps the plain, unprefixed environment variables onto their nested keys.
fn env_aliases() -> HashMap<String, String> {
    [
        ("PORT", "PORT"),
        ("DB_URL", "DB_URL"),
        ("AI_PROVIDER", "AI__PROVIDER"),
        ("AI_API_URL", "AI__API_URL"),
        ("AI_MODEL", "AI__MODEL_NAME"),
    ]
    .into_iter()
    .filter_map(|(var, key)| {
        env::var(var)
            .ok()
            .filter(|v| !v.is_empty())
            .map(|v| (key.to_string(), v))
    })
    .collect()
}

/// Loads the application configuration.
///
/// With `config_path_override`, that file must exist. Otherwise `config.yml` in the
/// working directory is used when present.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder();

    let content = match config_path_override {
        Some(path) => Some(read_and_substitute(Path::new(path))?.ok_or_else(|| {
            ConfigError::NotFound(format!("Config file not found at '{path}'."))
        })?),
        None => read_and_substitute(Path::new("config.yml"))?,
    };
    if let Some(content) = content {
        info!("Loading configuration file.");
        builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
    }

    let settings = builder
        .add_source(
            Environment::default()
                .separator("__")
                .try_parsing(true)
                .source(Some(env_aliases())),
        )
        .add_source(
            Environment::with_prefix("BIZQUERY")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    if config.ai.api_key().is_none() {
        config.ai.api_key = ["AI_API_KEY", "GROQ_API_KEY"]
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find(|key| !key.trim().is_empty());
    }

    Ok(config)
}
