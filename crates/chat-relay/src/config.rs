use std::fmt;
use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;

use serde::Deserialize;
use thiserror::Error;

use crate::llm::Provider;
use crate::response::DetailPolicy;

// ============================================================================
// Config (root)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    /// API keys come from the environment only, never from the file.
    #[serde(skip)]
    pub credentials: Credentials,
}

impl Config {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ConfigError::Io(e)),
        };
        Ok(serde_saphyr::from_str(&contents)?)
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// Empty values are treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(service) = get(AI_SERVICE_ENV) {
            self.relay.service = service;
        }
        if let Some(env) = get(RELAY_ENV).or_else(|| get(NODE_ENV)) {
            self.relay.development = env == "development";
        }
        self.credentials = Credentials {
            zhipu_api_key: get(Provider::Zhipu.api_key_env()),
            openai_api_key: get(Provider::OpenAI.api_key_env()),
        };
    }
}

pub const AI_SERVICE_ENV: &str = "AI_SERVICE";
/// Deployment environment; `development` exposes error details.
pub const NODE_ENV: &str = "NODE_ENV";
/// Takes precedence over [`NODE_ENV`] when both are set.
pub const RELAY_ENV: &str = "RELAY_ENV";

// ============================================================================
// ServerConfig
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Prefix the chat route is mounted under.
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_path: default_base_path(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_base_path() -> String {
    "/api".to_string()
}

fn default_request_timeout() -> u64 {
    300
}

// ============================================================================
// RelayConfig
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// Raw service name; resolved against [`Provider`] per request.
    #[serde(default = "default_service")]
    pub service: String,
    /// Expose underlying error messages to API callers.
    #[serde(default)]
    pub development: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            service: default_service(),
            development: false,
        }
    }
}

impl RelayConfig {
    pub fn detail_policy(&self) -> DetailPolicy {
        if self.development {
            DetailPolicy::Expose
        } else {
            DetailPolicy::Omit
        }
    }
}

fn default_service() -> String {
    Provider::default().to_string()
}

// ============================================================================
// Credentials
// ============================================================================

#[derive(Clone, Default)]
pub struct Credentials {
    pub zhipu_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

impl Credentials {
    pub fn api_key(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::Zhipu => self.zhipu_api_key.as_deref(),
            Provider::OpenAI => self.openai_api_key.as_deref(),
        }
    }
}

// Keys must never end up in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "<redacted>");
        f.debug_struct("Credentials")
            .field("zhipu_api_key", &redact(&self.zhipu_api_key))
            .field("openai_api_key", &redact(&self.openai_api_key))
            .finish()
    }
}

// ============================================================================
// ConfigError
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_saphyr::Error),
}

// ============================================================================
// Tests
// ============================================================================
