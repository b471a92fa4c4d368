//! Configuration management for Chatrelay
//!
//! Parses TOML configuration files and provides typed access to settings.
//! The provider credential is deliberately NOT part of this file - it is read
//! from the environment at startup so it never lands in version control.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Environment variable holding the provider API key.
///
/// Absence is a fatal startup error - the service refuses to start without a
/// credential rather than failing every request at runtime.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Timeout for the outbound provider call, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    30
}

/// Text-generation provider configuration
///
/// All generation parameters are fixed deployment constants, never
/// user-controlled. Fields are private to enforce invariants: configuration is
/// loaded via deserialization and checked by `Config::validate()`, and cannot
/// be mutated afterwards.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Model identifier sent with every completion request
    model: String,
    /// Provider API root, e.g. "https://api.openai.com/v1"
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default = "default_temperature")]
    temperature: f64,
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,
    /// Optional persona instruction prepended to every prompt as a system message
    #[serde(default)]
    system_instruction: Option<String>,
}

impl ProviderConfig {
    /// Get the model identifier
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the provider API root URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the sampling temperature
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Get the maximum number of output tokens per completion
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Get the fixed system instruction, if configured
    pub fn system_instruction(&self) -> Option<&str> {
        self.system_instruction.as_deref()
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    512
}

/// Observability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::error::AppResult<Self> {
        let path_display = path.as_ref().display().to_string();

        // Phase 1: Read file (preserves io::Error context)
        let content = std::fs::read_to_string(path.as_ref()).map_err(|source| {
            crate::error::AppError::ConfigFileRead {
                path: path_display.clone(),
                source,
            }
        })?;

        // Phase 2: Parse TOML (preserves toml::de::Error context)
        let config: Self = toml::from_str(&content).map_err(|source| {
            crate::error::AppError::ConfigParseFailed {
                path: path_display.clone(),
                source: Box::new(source),
            }
        })?;

        // Phase 3: Validate parsed config
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration after parsing
    ///
    /// Called automatically by `from_file()`, but can also be called explicitly
    /// when constructing Config via other means (e.g., in tests).
    pub fn validate(&self) -> crate::error::AppResult<()> {
        // Bind address must be an IP literal. A hostname like "localhost"
        // would otherwise fall through to some default bind address and
        // silently expose the service on the wrong interfaces.
        if self.server.host.parse::<std::net::IpAddr>().is_err() {
            return Err(crate::error::AppError::Config(format!(
                "Configuration error: server.host '{}' is invalid. \
                host must be an IP address literal \
                (e.g., '0.0.0.0' for all interfaces, '127.0.0.1' for localhost only).",
                self.server.host
            )));
        }

        if self.provider.model.trim().is_empty() {
            return Err(crate::error::AppError::Config(
                "Configuration error: provider.model must not be empty".to_string(),
            ));
        }

        if !self.provider.base_url.starts_with("http://")
            && !self.provider.base_url.starts_with("https://")
        {
            return Err(crate::error::AppError::Config(format!(
                "Configuration error: provider.base_url '{}' is invalid. \
                base_url must start with 'http://' or 'https://'.",
                self.provider.base_url
            )));
        }

        // The completions path is appended as "{base_url}/chat/completions",
        // so the configured root must be the API version root.
        if !self.provider.base_url.trim_end_matches('/').ends_with("/v1") {
            return Err(crate::error::AppError::Config(format!(
                "Configuration error: provider.base_url '{}' is invalid. \
                base_url must end with '/v1' (e.g., 'https://api.openai.com/v1').",
                self.provider.base_url
            )));
        }

        // Standard LLM sampling range
        if self.provider.temperature < 0.0
            || self.provider.temperature > 2.0
            || self.provider.temperature.is_nan()
            || self.provider.temperature.is_infinite()
        {
            return Err(crate::error::AppError::Config(format!(
                "Configuration error: provider.temperature {} is invalid. \
                temperature must be a finite number between 0.0 and 2.0.",
                self.provider.temperature
            )));
        }

        if self.provider.max_tokens == 0 {
            return Err(crate::error::AppError::Config(
                "Configuration error: provider.max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.server.request_timeout_seconds == 0 {
            return Err(crate::error::AppError::Config(
                "Configuration error: request_timeout_seconds must be greater than 0".to_string(),
            ));
        }
        if self.server.request_timeout_seconds > 300 {
            return Err(crate::error::AppError::Config(format!(
                "Configuration error: request_timeout_seconds cannot exceed 300 seconds (5 minutes), got {}",
                self.server.request_timeout_seconds
            )));
        }

        Ok(())
    }
}

impl FromStr for Config {
    type Err = crate::error::AppError;

    fn from_str(toml_str: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(toml_str).map_err(|source| {
            crate::error::AppError::ConfigParseFailed {
                path: "<string>".to_string(),
                source: Box::new(source),
            }
        })?;

        config.validate()?;
        Ok(config)
    }
}
