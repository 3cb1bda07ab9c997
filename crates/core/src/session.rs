use tracing::debug;

use crate::{
    error::Result,
    generative::GenerationConfig,
    summarize::{Backend, SummaryRequest, summarize},
    transcript::TranscriptSource,
    types::{LanguageCode, Transcript, VideoInfo},
    video_id::{VideoId, extract_video_id, parse_video_url},
};

/// How user-supplied links are turned into video ids.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UrlPolicy {
    /// Unrecognized links are passed through as ids.
    #[default]
    Lenient,
    /// Unrecognized links fail with `MalformedInput`.
    Strict,
}

/// One user's flow: look a video up, then summarize its transcript.
pub struct Session<S> {
    source: S,
    url_policy: UrlPolicy,
}

impl<S: TranscriptSource> Session<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            url_policy: UrlPolicy::default(),
        }
    }

    pub fn with_url_policy(mut self, url_policy: UrlPolicy) -> Self {
        self.url_policy = url_policy;
        self
    }

    pub fn video_id(&self, url: &str) -> Result<VideoId> {
        match self.url_policy {
            UrlPolicy::Lenient => Ok(extract_video_id(url)),
            UrlPolicy::Strict => parse_video_url(url),
        }
    }

    pub async fn load_video(&self, url: &str) -> Result<VideoInfo> {
        let video_id = self.video_id(url)?;
        self.source.video_info(&video_id).await
    }

    pub async fn transcript(&self, url: &str, language: &LanguageCode) -> Result<Transcript> {
        let video_id = self.video_id(url)?;
        self.source.get_transcript(&video_id, language).await
    }

    pub async fn run(
        &self,
        url: &str,
        language: &LanguageCode,
        backend: Backend,
        instruction: &str,
        ratio: f64,
        generation: Option<&GenerationConfig>,
    ) -> Result<String> {
        let transcript = self.transcript(url, language).await?;
        self.summarize(transcript, backend, instruction, ratio, generation)
            .await
    }

    /// Summarize an already fetched transcript with one backend.
    pub async fn summarize(
        &self,
        transcript: Transcript,
        backend: Backend,
        instruction: &str,
        ratio: f64,
        generation: Option<&GenerationConfig>,
    ) -> Result<String> {
        debug!(
            video_id = %transcript.video_id,
            segments = transcript.segments.len(),
            %backend,
            "Summarizing transcript"
        );

        let request = SummaryRequest {
            instruction: instruction.to_string(),
            transcript,
            ratio,
        };
        summarize(backend, &request, generation).await
    }
}
