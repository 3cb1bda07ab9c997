use std::time::Duration;

use reqwest::StatusCode;
use tracing::debug;

use crate::{
    error::{Error, Result},
    provider::Provider,
    types::Transcript,
};

/// Everything one generative call needs. Built per request, never stored globally.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub provider: Provider,
    pub api_key: String,
    pub model: String,
    pub api_url: String,
    pub timeout: Duration,
}

impl GenerationConfig {
    /// Provider defaults with the given key.
    pub fn new(provider: Provider, api_key: impl Into<String>) -> Self {
        let config = provider.config();
        Self {
            provider,
            api_key: api_key.into(),
            model: config.model.to_string(),
            api_url: config.api_url.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Instruction, newline, then the transcript text.
pub fn build_prompt(instruction: &str, transcript: &Transcript) -> String {
    format!("{}\n{}", instruction, transcript.full_text())
}

/// Send `prompt` as a single user message to an OpenAI-compatible chat endpoint.
pub async fn summarize_generative(prompt: &str, config: &GenerationConfig) -> Result<String> {
    debug!(
        provider = config.provider.name(),
        model = %config.model,
        prompt_chars = prompt.len(),
        "Requesting chat completion"
    );

    let response = reqwest::Client::builder()
        .timeout(config.timeout)
        .build()?
        .post(&config.api_url)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {}", config.api_key))
        .json(&serde_json::json!({
            "model": config.model,
            "messages": [
                {
                    "role": "user",
                    "content": prompt,
                },
            ],
        }))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let provider = config.provider.name().to_string();
        return Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Authentication { provider },
            StatusCode::TOO_MANY_REQUESTS => Error::Quota { provider },
            _ => Error::Api {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            },
        });
    }

    let response = response.json::<serde_json::Value>().await?;

    // Extract content from response
    let content = response["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| Error::InvalidApiResponse {
            reason: format!("no message content in {}", response),
        })?;

    Ok(content.trim().to_string())
}
