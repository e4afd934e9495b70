//! Configuration loading and API key resolution
//!
//! Settings come from three tiers, highest priority first:
//! 1. Command-line flags / their environment variables (handled by the binary)
//! 2. Process environment (`GROQ_API_KEY`)
//! 3. TOML config file
//!
//! Anything still unset falls back to compiled defaults.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable holding the completion API key
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Value shipped in sample `.env` files; treated as "not configured"
pub const PLACEHOLDER_API_KEY: &str = "your_groq_api_key_here";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_ERROR_LOG: &str = "error_debug.log";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// TOML configuration file schema
///
/// Every field is optional; missing sections take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Completion API key (lowest priority source)
    pub groq_api_key: Option<String>,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub completion: CompletionConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body; bigger bodies get a 413
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter when `RUST_LOG` is unset
    pub level: String,
    /// Append-only diagnostic log for upstream failures
    pub error_log: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            error_log: PathBuf::from(DEFAULT_ERROR_LOG),
        }
    }
}

/// Chat completion request settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Result of [`TomlConfig::load`]
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: TomlConfig,
    /// File the config was read from, `None` when compiled defaults are in use
    pub path: Option<PathBuf>,
}

impl TomlConfig {
    /// Read and parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration
    ///
    /// An explicit path must exist and parse. Without one, the platform
    /// default (`<config_dir>/biztone/config.toml`) is tried and a missing
    /// file silently yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig> {
        if let Some(path) = explicit {
            let config = Self::from_file(path)?;
            return Ok(LoadedConfig {
                config,
                path: Some(path.to_path_buf()),
            });
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                let config = Self::from_file(&path)?;
                Ok(LoadedConfig {
                    config,
                    path: Some(path),
                })
            }
            _ => Ok(LoadedConfig {
                config: TomlConfig::default(),
                path: None,
            }),
        }
    }
}

/// Platform config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("biztone").join("config.toml"))
}

/// Validate API key (non-blank, not the sample placeholder)
pub fn is_valid_key(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && key != PLACEHOLDER_API_KEY
}

/// Where a resolved API key came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    Environment,
    TomlConfig,
}

impl std::fmt::Display for ApiKeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiKeySource::Environment => f.write_str("environment"),
            ApiKeySource::TomlConfig => f.write_str("TOML config"),
        }
    }
}

/// A usable API key and its origin
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedApiKey {
    pub key: String,
    pub source: ApiKeySource,
}

impl std::fmt::Debug for ResolvedApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedApiKey")
            .field("key", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Resolve the completion API key from environment then TOML
///
/// Returns `None` when neither tier holds a valid key; the service then runs
/// in local fallback mode.
pub fn resolve_api_key(env_key: Option<String>, toml_config: &TomlConfig) -> Option<ResolvedApiKey> {
    let env_key = env_key.filter(|k| is_valid_key(k));
    let toml_key = toml_config.groq_api_key.clone().filter(|k| is_valid_key(k));

    if env_key.is_some() && toml_key.is_some() {
        warn!(
            "{} found in multiple sources: environment, TOML config. Using environment (highest priority).",
            API_KEY_ENV
        );
    }

    if let Some(key) = env_key {
        info!("{} loaded from environment variable", API_KEY_ENV);
        return Some(ResolvedApiKey {
            key: key.trim().to_string(),
            source: ApiKeySource::Environment,
        });
    }

    if let Some(key) = toml_key {
        info!("API key loaded from TOML config");
        return Some(ResolvedApiKey {
            key: key.trim().to_string(),
            source: ApiKeySource::TomlConfig,
        });
    }

    None
}

/// [`resolve_api_key`] reading the key from the process environment
pub fn resolve_api_key_from_env(toml_config: &TomlConfig) -> Option<ResolvedApiKey> {
    resolve_api_key(std::env::var(API_KEY_ENV).ok(), toml_config)
}
