//! Explicit configuration for the text-generation backend.
//!
//! Built once at process start (usually via [`InsightConfig::from_env`]) and
//! handed to the transport; nothing re-reads the environment per call.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_LANGUAGE: &str = "English";

pub const ENV_ENDPOINT: &str = "SALESIGHT_AI_ENDPOINT";
pub const ENV_API_KEY: &str = "SALESIGHT_AI_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "SALESIGHT_AI_TIMEOUT_SECS";
pub const ENV_LANGUAGE: &str = "SALESIGHT_AI_LANGUAGE";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Sampling parameters sent with every prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 1024,
        }
    }
}

/// Connection settings for the remote model.
#[derive(Clone, PartialEq)]
pub struct InsightConfig {
    pub endpoint: String,
    /// API key passed as the `key` query parameter. `None` disables remote calls.
    pub credential: Option<String>,
    pub timeout: Duration,
    /// Natural language the model is asked to answer in.
    pub language: String,
    pub generation: GenerationConfig,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            credential: None,
            timeout: DEFAULT_TIMEOUT,
            language: DEFAULT_LANGUAGE.to_string(),
            generation: GenerationConfig::default(),
        }
    }
}

// Keeps the API key out of logs.
impl core::fmt::Debug for InsightConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InsightConfig")
            .field("endpoint", &self.endpoint)
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("language", &self.language)
            .field("generation", &self.generation)
            .finish()
    }
}

impl InsightConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(endpoint) = non_blank(lookup(ENV_ENDPOINT)) {
            cfg.endpoint = endpoint;
        }

        cfg.credential = non_blank(lookup(ENV_API_KEY));

        if let Some(raw) = non_blank(lookup(ENV_TIMEOUT_SECS)) {
            let secs: u64 = raw.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    key: ENV_TIMEOUT_SECS,
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    key: ENV_TIMEOUT_SECS,
                    value: raw,
                    reason: "timeout must be at least one second".to_string(),
                });
            }
            cfg.timeout = Duration::from_secs(secs);
        }

        if let Some(language) = non_blank(lookup(ENV_LANGUAGE)) {
            cfg.language = language;
        }

        Ok(cfg)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = non_blank(Some(credential.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
