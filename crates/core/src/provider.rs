use std::fmt;

/// Returned in place of a key when neither the user nor the environment supplied one.
pub const MISSING_API_KEY: &str = "no api key set";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Provider {
    Openai,
    #[default]
    Gemini,
}

pub struct ProviderConfig {
    pub api_url: &'static str,
    pub model: &'static str,
    pub env_var: &'static str,
}

impl Provider {
    pub fn config(&self) -> ProviderConfig {
        match self {
            Provider::Openai => ProviderConfig {
                api_url: "https://api.openai.com/v1/chat/completions",
                model: "gpt-3.5-turbo",
                env_var: "OPENAI_API_KEY",
            },
            Provider::Gemini => ProviderConfig {
                api_url: "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions",
                model: "gemini-1.5-flash",
                env_var: "GEMINI_API_KEY",
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Provider::Openai => "OpenAI",
            Provider::Gemini => "Gemini",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// API keys read from the process environment, one per provider.
#[derive(Clone, Debug, Default)]
pub struct ApiKeys {
    openai: Option<String>,
    gemini: Option<String>,
}

impl ApiKeys {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |provider: Provider| {
            lookup(provider.config().env_var).filter(|key| !key.trim().is_empty())
        };
        Self {
            openai: read(Provider::Openai),
            gemini: read(Provider::Gemini),
        }
    }

    /// Explicit key first, then the provider's env var, then [`MISSING_API_KEY`].
    pub fn resolve(&self, provider: Provider, explicit: Option<&str>) -> String {
        let from_env = match provider {
            Provider::Openai => self.openai.as_deref(),
            Provider::Gemini => self.gemini.as_deref(),
        };
        explicit
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .or(from_env)
            .unwrap_or(MISSING_API_KEY)
            .to_string()
    }
}
