//! Optional TOML configuration.
//!
//! Every field has a default, so a missing file behaves like an empty one.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;

use crate::{
    error::{Error, Result},
    extractive::DEFAULT_RATIO,
    generative::GenerationConfig,
    provider::{ApiKeys, Provider},
    summarize::Backend,
};

pub const DEFAULT_PROMPT: &str = "Summarize the following video transcript.";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: Backend,
    pub language: String,
    pub prompt: String,
    pub ratio: f64,
    pub timeout_seconds: u64,
    pub openai: ProviderOverrides,
    pub gemini: ProviderOverrides,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderOverrides {
    pub model: Option<String>,
    pub api_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            language: "en".to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            ratio: DEFAULT_RATIO,
            timeout_seconds: 60,
            openai: ProviderOverrides::default(),
            gemini: ProviderOverrides::default(),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tldw").join("config.toml"))
}

impl AppConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content).map_err(|e| Error::Config {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// A missing file at the default location is not an error; a missing explicit path is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match default_config_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        if !explicit && !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    fn validate(&self) -> Result<()> {
        if !(self.ratio > 0.0 && self.ratio <= 1.0) {
            return Err(Error::Config {
                reason: format!("ratio must be in (0, 1], got {}", self.ratio),
            });
        }
        if self.timeout_seconds == 0 {
            return Err(Error::Config {
                reason: "timeout_seconds must be positive".to_string(),
            });
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn overrides(&self, provider: Provider) -> &ProviderOverrides {
        match provider {
            Provider::Openai => &self.openai,
            Provider::Gemini => &self.gemini,
        }
    }

    /// Build the per-request generation settings for `provider`.
    pub fn generation(
        &self,
        provider: Provider,
        keys: &ApiKeys,
        explicit_key: Option<&str>,
    ) -> GenerationConfig {
        let defaults = provider.config();
        let overrides = self.overrides(provider);
        GenerationConfig {
            provider,
            api_key: keys.resolve(provider, explicit_key),
            model: overrides
                .model
                .clone()
                .unwrap_or_else(|| defaults.model.to_string()),
            api_url: overrides
                .api_url
                .clone()
                .unwrap_or_else(|| defaults.api_url.to_string()),
            timeout: self.timeout(),
        }
    }
}
