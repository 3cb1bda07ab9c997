mod timedtext;
mod youtube;

use async_trait::async_trait;

use crate::{
    error::Result,
    types::{LanguageCode, Transcript, TranscriptLanguage, VideoInfo},
    video_id::{VideoId, thumbnail_url},
};

pub use timedtext::parse_timed_text;
pub use youtube::YoutubeTranscriptSource;

/// Where transcripts come from.
///
/// Both calls may be slow; implementations own their timeouts.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Caption tracks the video offers.
    async fn list_languages(&self, video_id: &VideoId) -> Result<Vec<TranscriptLanguage>>;

    /// Fails with `TranscriptUnavailable` when `language` is not among the listed tracks.
    async fn get_transcript(&self, video_id: &VideoId, language: &LanguageCode)
    -> Result<Transcript>;

    async fn video_info(&self, video_id: &VideoId) -> Result<VideoInfo> {
        Ok(VideoInfo {
            id: video_id.clone(),
            title: None,
            thumbnail_url: thumbnail_url(video_id),
            languages: self.list_languages(video_id).await?,
        })
    }
}
