use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    extractive::{
        DEFAULT_RATIO, LineTokenizer, Tokenizer, UnicodeTokenizer, has_sentence_terminator,
        summarize_extractive, summarize_extractive_with,
    },
    generative::{GenerationConfig, build_prompt, summarize_generative},
    provider::Provider,
    types::Transcript,
};

/// Summarization backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    #[serde(rename = "chatgpt", alias = "openai")]
    ChatGpt,
    #[default]
    #[serde(alias = "google-gemini")]
    Gemini,
    #[serde(alias = "spacy", alias = "extractive")]
    WordFrequency,
}

impl Backend {
    /// Hosted provider behind a generative backend.
    pub fn provider(&self) -> Option<Provider> {
        match self {
            Backend::ChatGpt => Some(Provider::Openai),
            Backend::Gemini => Some(Provider::Gemini),
            Backend::WordFrequency => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Backend::ChatGpt => "chatgpt",
            Backend::Gemini => "gemini",
            Backend::WordFrequency => "word-frequency",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "chatgpt" | "openai" => Ok(Backend::ChatGpt),
            "gemini" | "google-gemini" | "google gemini" => Ok(Backend::Gemini),
            "word-frequency" | "spacy" | "extractive" => Ok(Backend::WordFrequency),
            other => Err(Error::Config {
                reason: format!(
                    "unknown backend '{}' (expected chatgpt, gemini or word-frequency)",
                    other
                ),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SummaryRequest {
    /// Prepended to the transcript for generative backends; ignored by extractive ones.
    pub instruction: String,
    pub transcript: Transcript,
    /// Share of sentences the extractive backend keeps.
    pub ratio: f64,
}

impl SummaryRequest {
    pub fn new(instruction: impl Into<String>, transcript: Transcript) -> Self {
        Self {
            instruction: instruction.into(),
            transcript,
            ratio: DEFAULT_RATIO,
        }
    }
}

/// Run exactly one backend over the request.
///
/// `generation` is only read by generative backends and must name the matching provider.
pub async fn summarize(
    backend: Backend,
    request: &SummaryRequest,
    generation: Option<&GenerationConfig>,
) -> Result<String> {
    match backend.provider() {
        Some(provider) => {
            let config = generation
                .filter(|config| config.provider == provider)
                .ok_or_else(|| Error::Config {
                    reason: format!("{} backend needs a {} configuration", backend, provider),
                })?;
            let prompt = build_prompt(&request.instruction, &request.transcript);
            summarize_generative(&prompt, config).await
        }
        None => {
            let (summary, sentences) = extractive_summary(&request.transcript, request.ratio);
            if summary.is_empty() {
                return Err(Error::EmptySummary { sentences });
            }
            info!(chars = summary.len(), "Extractive summary ready");
            Ok(summary)
        }
    }
}

/// Summary plus the number of sentences it was picked from.
///
/// Unpunctuated tracks (auto-generated captions) use one sentence per caption segment.
fn extractive_summary(transcript: &Transcript, ratio: f64) -> (String, usize) {
    let text = transcript.full_text();
    if has_sentence_terminator(&text) {
        let sentences = UnicodeTokenizer.sentences(&text).len();
        return (summarize_extractive(&text, ratio), sentences);
    }

    let lines = transcript
        .segments
        .iter()
        .map(|seg| seg.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let sentences = LineTokenizer.sentences(&lines).len();
    debug!(sentences, "No sentence punctuation, scoring caption segments");
    (summarize_extractive_with(&LineTokenizer, &lines, ratio), sentences)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_str_accepts_aliases() {
        assert_eq!("ChatGPT".parse::<Backend>().unwrap(), Backend::ChatGpt);
        assert_eq!("Google Gemini".parse::<Backend>().unwrap(), Backend::Gemini);
        assert_eq!("SpaCy".parse::<Backend>().unwrap(), Backend::WordFrequency);
        assert!("bert".parse::<Backend>().is_err());
    }

    #[test]
    fn test_backend_display_round_trips() {
        for backend in [Backend::ChatGpt, Backend::Gemini, Backend::WordFrequency] {
            assert_eq!(backend.to_string().parse::<Backend>().unwrap(), backend);
        }
    }

    fn transcript(captions: &[&str]) -> Transcript {
        Transcript {
            video_id: crate::VideoId::new("abc"),
            language: "en".to_string(),
            segments: captions
                .iter()
                .map(|text| crate::TranscriptSegment {
                    text: text.to_string(),
                    start: std::time::Duration::ZERO,
                    duration: std::time::Duration::ZERO,
                })
                .collect(),
        }
    }

    #[test]
    fn test_unpunctuated_captions_are_scored_per_segment() {
        let transcript = transcript(&[
            "rust is fast",
            "rust is safe",
            "rust compiles code",
            "cats sleep",
            "dogs bark",
        ]);
        assert_eq!(
            extractive_summary(&transcript, DEFAULT_RATIO),
            ("rust compiles code".to_string(), 5)
        );
    }

    #[test]
    fn test_punctuated_captions_use_sentence_boundaries() {
        let transcript = transcript(&[
            "Rust is fast. Rust is",
            "safe. Rust compiles code.",
            "Cats sleep. Dogs bark.",
        ]);
        assert_eq!(
            extractive_summary(&transcript, DEFAULT_RATIO),
            ("Rust compiles code.".to_string(), 5)
        );
    }

    #[tokio::test]
    async fn test_dispatch_reports_sentence_count_when_empty() {
        let request = SummaryRequest::new("", transcript(&["only one caption", "and another"]));
        let err = summarize(Backend::WordFrequency, &request, None).await.unwrap_err();
        assert!(matches!(err, Error::EmptySummary { sentences: 2 }), "{err}");
    }

    #[test]
    fn test_provider_mapping() {
        assert_eq!(Backend::ChatGpt.provider(), Some(Provider::Openai));
        assert_eq!(Backend::WordFrequency.provider(), None);
    }
}
