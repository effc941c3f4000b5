//! Persisted user configuration.
//!
//! Settings live in `~/.git-ai.yaml` and can be overridden per
//! invocation with `GIT_AI_API_KEY`, `GIT_AI_MODEL`, and
//! `GIT_AI_API_URL`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Config file name under the user's home directory.
const CONFIG_FILE_NAME: &str = ".git-ai.yaml";

/// Known provider presets offered by `git-ai config`.
#[derive(Debug, Clone, Copy)]
pub struct ProviderInfo {
    /// Provider key as stored in the config file.
    pub key: &'static str,
    /// Default API endpoint.
    pub endpoint: &'static str,
    /// Default model.
    pub default_model: &'static str,
}

/// Provider catalog: key, default endpoint, default model.
pub const PROVIDERS: &[ProviderInfo] = &[
    ProviderInfo {
        key: "openai",
        endpoint: "https://api.openai.com/v1",
        default_model: "gpt-4o-mini",
    },
    ProviderInfo {
        key: "anthropic",
        endpoint: "https://api.anthropic.com/v1",
        default_model: "claude-3-5-haiku-latest",
    },
    ProviderInfo {
        key: "ollama",
        endpoint: "http://localhost:11434/v1",
        default_model: "llama3",
    },
];

/// Looks up a provider preset by key.
#[must_use]
pub fn provider_info(key: &str) -> Option<&'static ProviderInfo> {
    PROVIDERS.iter().find(|p| p.key == key)
}

/// User configuration for the LLM backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Provider key ("openai", "anthropic", "ollama", or "other").
    pub provider: String,
    /// API key. May be empty for keyless endpoints (Ollama).
    #[serde(rename = "api_key")]
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// API base URL.
    pub endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            endpoint: "https://api.openai.com/v1".to_string(),
        }
    }
}

impl Config {
    /// Loads the configuration from the default location, applying
    /// environment overrides. A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_path(&Self::config_path()?)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads the configuration from a specific path, without
    /// environment overrides.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Writes the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_path()?)
    }

    /// Writes the configuration to a specific path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Returns the default config file path.
    pub fn config_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;
        Ok(home_dir.join(CONFIG_FILE_NAME))
    }

    /// Applies `GIT_AI_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(api_key) = env::var("GIT_AI_API_KEY") {
            if !api_key.is_empty() {
                self.api_key = api_key;
            }
        }
        if let Ok(model) = env::var("GIT_AI_MODEL") {
            if !model.is_empty() {
                self.model = model;
            }
        }
        if let Ok(endpoint) = env::var("GIT_AI_API_URL") {
            if !endpoint.is_empty() {
                self.endpoint = endpoint;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from_path(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.provider, "openai");
        assert_eq!(config.model, "gpt-4o-mini");
    }

    #[test]
    fn save_and_reload_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".git-ai.yaml");

        let config = Config {
            provider: "anthropic".to_string(),
            api_key: "sk-test".to_string(),
            model: "claude-3-5-haiku-latest".to_string(),
            endpoint: "https://api.anthropic.com/v1".to_string(),
        };
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn parses_yaml_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".git-ai.yaml");
        fs::write(
            &path,
            "provider: ollama\napi_key: \"\"\nmodel: llama3\nendpoint: http://localhost:11434/v1\n",
        )
        .unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.provider, "ollama");
        assert_eq!(config.api_key, "");
        assert_eq!(config.model, "llama3");
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".git-ai.yaml");
        fs::write(&path, ": not yaml : [").unwrap();
        assert!(Config::load_from_path(&path).is_err());
    }

    #[test]
    fn provider_catalog_lookup() {
        let info = provider_info("anthropic").unwrap();
        assert_eq!(info.endpoint, "https://api.anthropic.com/v1");
        assert_eq!(info.default_model, "claude-3-5-haiku-latest");
        assert!(provider_info("unknown").is_none());
    }
}
