//! Environment variable substitution and effective-value accessors.

use std::time::Duration;

use super::types::Config;
use crate::constants::{
    API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_SYSTEM_PROMPT,
    DEFAULT_TEMPERATURE,
};

impl Config {
    /// Resolve {env:VAR_NAME} patterns in string fields.
    pub(super) fn resolve_substitutions(&mut self) {
        self.model = Self::resolve_str(&self.model);
        if let Some(ref mut sp) = self.system_prompt {
            *sp = Self::resolve_str(sp);
        }
        if let Some(ref mut key) = self.api.api_key {
            *key = Self::resolve_str(key);
        }
        if let Some(ref mut url) = self.api.base_url {
            *url = Self::resolve_str(url);
        }
    }

    /// Replace {env:VAR} with the environment variable value.
    /// Unset variables become the empty string.
    pub(super) fn resolve_str(s: &str) -> String {
        let mut result = s.to_string();
        while let Some(start) = result.find("{env:") {
            if let Some(end) = result[start..].find('}') {
                let var_name = &result[start + 5..start + end];
                let value = std::env::var(var_name).unwrap_or_default();
                result = format!(
                    "{}{}{}",
                    &result[..start],
                    value,
                    &result[start + end + 1..]
                );
            } else {
                break;
            }
        }
        result
    }

    /// Resolve the API key: `GROQ_API_KEY` first, then the config value.
    pub fn resolve_api_key(&self) -> Option<String> {
        pick_api_key(std::env::var(API_KEY_ENV).ok(), self.api.api_key.as_deref())
    }

    /// Base URL of the completion API.
    pub fn base_url(&self) -> &str {
        self.api
            .base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(
            self.api
                .connect_timeout_secs
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
        )
    }

    pub fn temperature(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    /// Turn cap from config, if any.
    pub fn max_turns(&self) -> Option<usize> {
        self.max_turns
    }

    /// Effective system prompt: the built-in default when unset, `None` when
    /// set to a blank string.
    pub fn system_prompt(&self) -> Option<&str> {
        match self.system_prompt.as_deref() {
            None => Some(DEFAULT_SYSTEM_PROMPT),
            Some(prompt) if prompt.trim().is_empty() => None,
            Some(prompt) => Some(prompt),
        }
    }
}

/// Non-empty environment value wins over a non-empty configured one.
pub(super) fn pick_api_key(env: Option<String>, configured: Option<&str>) -> Option<String> {
    env.filter(|val| !val.is_empty())
        .or_else(|| configured.filter(|val| !val.is_empty()).map(str::to_string))
}
