//! Configuration loading and management for Beacon.
//!
//! Loads configuration from `beacon.toml` with environment variable
//! overrides. Every field has a serde default so a missing or partial
//! file still yields a runnable config.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// The root configuration structure.
///
/// Maps directly to `beacon.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP gateway settings
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// LLM backend settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Guardrails validator settings
    #[serde(default)]
    pub guardrails: GuardrailsConfig,

    /// Tool augmentation settings
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Session memory settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Streaming settings
    #[serde(default)]
    pub streaming: StreamingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            llm: LlmConfig::default(),
            guardrails: GuardrailsConfig::default(),
            tools: ToolsConfig::default(),
            session: SessionConfig::default(),
            streaming: StreamingConfig::default(),
        }
    }
}

fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("gateway", &self.gateway)
            .field("llm", &self.llm)
            .field("guardrails", &self.guardrails)
            .field("tools", &self.tools)
            .field("session", &self.session)
            .field("streaming", &self.streaming)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    8080
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible endpoint.
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// API key. Overridden by BEACON_LLM_API_KEY.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_llm_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    1024
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardrailsConfig {
    /// "builtin" (local checks) or "remote" (HTTP validator service).
    #[serde(default = "default_guardrails_mode")]
    pub mode: String,

    /// Base URL of the remote validator. Required when mode = "remote".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

fn default_guardrails_mode() -> String {
    "builtin".into()
}

impl Default for GuardrailsConfig {
    fn default() -> Self {
        Self {
            mode: default_guardrails_mode(),
            url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Base URL for the weather forecast fetch.
    #[serde(default = "default_forecast_base_url")]
    pub forecast_base_url: String,
}

fn default_forecast_base_url() -> String {
    "https://wttr.in".into()
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            forecast_base_url: default_forecast_base_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum retained turns per session (20 exchanges).
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,

    /// Sliding expiry in hours, refreshed on every append.
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: i64,
}

fn default_max_turns() -> usize {
    40
}
fn default_ttl_hours() -> i64 {
    6
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
            ttl_hours: default_ttl_hours(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingConfig {
    /// Maximum characters per streamed chunk.
    #[serde(default = "default_max_chunk_len")]
    pub max_chunk_len: usize,
}

fn default_max_chunk_len() -> usize {
    60
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            max_chunk_len: default_max_chunk_len(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, falling back to defaults
    /// when the file is absent, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
            toml::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))?
        } else {
            debug!(path = %path.display(), "No config file found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Environment variables take precedence over the file.
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("BEACON_LLM_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Ok(url) = std::env::var("BEACON_LLM_BASE_URL") {
            self.llm.base_url = url;
        }
        if let Ok(url) = std::env::var("BEACON_GUARDRAILS_URL") {
            self.guardrails.url = Some(url);
        }
        if let Ok(port) = std::env::var("BEACON_PORT") {
            if let Ok(port) = port.parse() {
                self.gateway.port = port;
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.session.max_turns == 0 {
            return Err(ConfigError::Invalid("session.max_turns must be > 0".into()));
        }
        if self.streaming.max_chunk_len == 0 {
            return Err(ConfigError::Invalid(
                "streaming.max_chunk_len must be > 0".into(),
            ));
        }
        if self.guardrails.mode == "remote" && self.guardrails.url.is_none() {
            return Err(ConfigError::Invalid(
                "guardrails.url is required when guardrails.mode = \"remote\"".into(),
            ));
        }
        Ok(())
    }
}

/// Errors produced while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config I/O error: {0}")]
    Io(String),

    #[error("Config parse error: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_runnable() {
        let config = AppConfig::default();
        assert_eq!(config.session.max_turns, 40);
        assert_eq!(config.session.ttl_hours, 6);
        assert_eq!(config.streaming.max_chunk_len, 60);
        assert_eq!(config.guardrails.mode, "builtin");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [gateway]
            port = 9000
            "#,
        )
        .unwrap();
        assert_eq!(config.gateway.port, 9000);
        assert_eq!(config.gateway.host, "127.0.0.1");
        assert_eq!(config.session.max_turns, 40);
    }

    #[test]
    fn remote_mode_requires_url() {
        let config: AppConfig = toml::from_str(
            r#"
            [guardrails]
            mode = "remote"
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn debug_redacts_api_key() {
        let mut config = AppConfig::default();
        config.llm.api_key = Some("sk-secret".into());
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.gateway.port, 8080);
    }
}
