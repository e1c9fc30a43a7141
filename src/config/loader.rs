//! File loading and merging for hayate configuration.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::types::{default_model, ApiConfig, Config};
use crate::constants::{API_KEY_ENV, PROJECT_CONFIG_FILENAME};

impl Config {
    /// Loads the global config from `~/.config/hayate/config.toml`.
    ///
    /// If no config file exists, creates one with sensible defaults
    /// (an `{env:GROQ_API_KEY}` placeholder for the key) and returns it.
    pub(super) fn load_global() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            let default_toml = default_config_toml();
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &default_toml)
                .with_context(|| format!("Failed to write default config to {:?}", path))?;
            return Self::parse(&default_toml).context("Failed to parse default config");
        }
        Self::from_file(&path)
    }

    /// Look for hayate.toml in current dir, then walk up to git root.
    pub(super) fn load_project() -> Result<Option<Config>> {
        let mut dir = std::env::current_dir()?;
        loop {
            let candidate = dir.join(PROJECT_CONFIG_FILENAME);
            if candidate.exists() {
                return Self::from_file(&candidate).map(Some);
            }
            // Stop at git root or filesystem root
            if dir.join(".git").exists() || !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config at {:?}", path))
    }

    /// Parses a config document. Missing fields take their defaults.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Merge project config over global config.
    /// Project values win when present.
    pub(super) fn merge(global: Config, project: Config) -> Config {
        Config {
            model: if project.model != default_model() {
                project.model
            } else {
                global.model
            },
            system_prompt: project.system_prompt.or(global.system_prompt),
            temperature: project.temperature.or(global.temperature),
            max_turns: project.max_turns.or(global.max_turns),
            api: ApiConfig {
                api_key: project.api.api_key.or(global.api.api_key),
                base_url: project.api.base_url.or(global.api.base_url),
                connect_timeout_secs: project
                    .api
                    .connect_timeout_secs
                    .or(global.api.connect_timeout_secs),
            },
        }
    }
}

fn default_config_toml() -> String {
    format!(
        r#"model = "{}"

[api]
api_key = "{{env:{}}}"
"#,
        default_model(),
        API_KEY_ENV
    )
}
