//! Struct definitions and serde defaults for hayate configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for hayate, deserialized from `config.toml`.
///
/// Fields use serde defaults so hayate can run with sensible defaults
/// when no config file exists.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Default model identifier (e.g. `"llama-3.3-70b-versatile"`).
    #[serde(default = "default_model")]
    pub model: String,
    /// System prompt sent ahead of the user's prompt. Unset means the built-in
    /// default; an empty string means none at all.
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Sampling temperature for every completion request.
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Upper bound on completion requests per `ask`.
    #[serde(default)]
    pub max_turns: Option<usize>,
    /// Endpoint and credentials.
    #[serde(default)]
    pub api: ApiConfig,
}

/// Returns the default model identifier.
pub(super) fn default_model() -> String {
    crate::constants::DEFAULT_MODEL.to_string()
}

/// Connection details for the completion API.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ApiConfig {
    /// API key. Usually `{env:GROQ_API_KEY}`; the environment variable wins anyway.
    pub api_key: Option<String>,
    /// Base URL of an OpenAI-compatible API (useful for proxies or self-hosted servers).
    pub base_url: Option<String>,
    /// TCP/TLS connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            system_prompt: None,
            temperature: None,
            max_turns: None,
            api: ApiConfig::default(),
        }
    }
}
