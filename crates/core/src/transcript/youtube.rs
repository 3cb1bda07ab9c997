use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{Error, Result},
    transcript::{TranscriptSource, timedtext::parse_timed_text},
    types::{LanguageCode, Transcript, TranscriptLanguage, VideoInfo},
    video_id::{VideoId, thumbnail_url},
};

const DEFAULT_BASE_URL: &str = "https://www.youtube.com";
const PLAYER_RESPONSE_MARKER: &str = "ytInitialPlayerResponse = ";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    playability_status: Option<PlayabilityStatus>,
    captions: Option<Captions>,
    video_details: Option<VideoDetails>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    status: String,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Captions {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    tracklist: Option<Tracklist>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Tracklist {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    #[serde(default)]
    name: TrackName,
    kind: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackName {
    simple_text: Option<String>,
    #[serde(default)]
    runs: Vec<TextRun>,
}

#[derive(Debug, Deserialize)]
struct TextRun {
    text: String,
}

#[derive(Debug, Deserialize)]
struct VideoDetails {
    title: Option<String>,
}

impl CaptionTrack {
    fn language(&self) -> TranscriptLanguage {
        let name = self
            .name
            .simple_text
            .clone()
            .or_else(|| self.name.runs.first().map(|run| run.text.clone()))
            .unwrap_or_else(|| self.language_code.clone());
        TranscriptLanguage {
            code: self.language_code.clone(),
            name,
            is_generated: self.kind.as_deref() == Some("asr"),
        }
    }

    /// Track URL asking for the plain XML format.
    fn xml_url(&self) -> String {
        self.base_url.replace("&fmt=srv3", "")
    }
}

/// Scrapes caption tracks from the public watch page.
pub struct YoutubeTranscriptSource {
    client: reqwest::Client,
    base_url: String,
}

impl YoutubeTranscriptSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US"));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_player(&self, video_id: &VideoId) -> Result<PlayerResponse> {
        let url = format!("{}/watch", self.base_url);
        debug!(%url, %video_id, "Fetching watch page");

        let html = self
            .client
            .get(&url)
            .query(&[("v", video_id.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        if html.contains("class=\"g-recaptcha\"") {
            return Err(Error::unavailable(
                video_id.as_str(),
                "too many requests, YouTube is asking for a captcha",
            ));
        }

        let player = extract_player_response(&html).ok_or_else(|| {
            Error::unavailable(video_id.as_str(), "watch page has no player data (invalid id?)")
        })?;

        if let Some(status) = &player.playability_status
            && status.status != "OK"
        {
            let reason = status.reason.as_deref().unwrap_or(status.status.as_str());
            return Err(Error::unavailable(
                video_id.as_str(),
                format!("video is not playable: {}", reason),
            ));
        }

        Ok(player)
    }

    async fn caption_tracks(&self, video_id: &VideoId) -> Result<(PlayerResponse, Vec<CaptionTrack>)> {
        let mut player = self.fetch_player(video_id).await?;
        let tracks = player
            .captions
            .take()
            .and_then(|captions| captions.tracklist)
            .map(|tracklist| tracklist.caption_tracks)
            .unwrap_or_default();

        if tracks.is_empty() {
            return Err(Error::unavailable(
                video_id.as_str(),
                "no captions are available for this video",
            ));
        }
        Ok((player, tracks))
    }
}

fn extract_player_response(html: &str) -> Option<PlayerResponse> {
    let start = html.find(PLAYER_RESPONSE_MARKER)? + PLAYER_RESPONSE_MARKER.len();
    // The object is followed by `;var ...` so only the first JSON value is read.
    serde_json::Deserializer::from_str(&html[start..])
        .into_iter::<PlayerResponse>()
        .next()?
        .ok()
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptSource {
    async fn list_languages(&self, video_id: &VideoId) -> Result<Vec<TranscriptLanguage>> {
        let (_, tracks) = self.caption_tracks(video_id).await?;
        Ok(tracks.iter().map(CaptionTrack::language).collect())
    }

    async fn get_transcript(
        &self,
        video_id: &VideoId,
        language: &LanguageCode,
    ) -> Result<Transcript> {
        let (_, tracks) = self.caption_tracks(video_id).await?;
        let Some(track) = tracks.iter().find(|t| &t.language_code == language) else {
            let available = tracks
                .iter()
                .map(|t| t.language_code.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(Error::unavailable(
                video_id.as_str(),
                format!("no transcript in '{}' (available: {})", language, available),
            ));
        };

        debug!(%video_id, %language, "Fetching caption track");
        let xml = self
            .client
            .get(track.xml_url())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let segments = parse_timed_text(&xml);
        if segments.is_empty() {
            return Err(Error::unavailable(
                video_id.as_str(),
                format!("the '{}' caption track is empty", language),
            ));
        }

        Ok(Transcript {
            video_id: video_id.clone(),
            language: language.clone(),
            segments,
        })
    }

    async fn video_info(&self, video_id: &VideoId) -> Result<VideoInfo> {
        let (player, tracks) = self.caption_tracks(video_id).await?;
        Ok(VideoInfo {
            id: video_id.clone(),
            title: player.video_details.and_then(|details| details.title),
            thumbnail_url: thumbnail_url(video_id),
            languages: tracks.iter().map(CaptionTrack::language).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_player_response_followed_by_script() {
        let html = r#"<script>var ytInitialPlayerResponse = {"playabilityStatus":{"status":"OK"},"videoDetails":{"title":"T"},"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://x/api/timedtext?v=1&lang=en&fmt=srv3","languageCode":"en","name":{"runs":[{"text":"English"}]},"kind":"asr"}]}}};var meta = 1;</script>"#;

        let player = extract_player_response(html).unwrap();
        let tracks = player.captions.unwrap().tracklist.unwrap().caption_tracks;
        let track = &tracks[0];
        assert_eq!(
            track.language(),
            TranscriptLanguage {
                code: "en".to_string(),
                name: "English".to_string(),
                is_generated: true,
            }
        );
        assert_eq!(track.xml_url(), "https://x/api/timedtext?v=1&lang=en");
        assert_eq!(player.video_details.unwrap().title.as_deref(), Some("T"));
    }

    #[test]
    fn test_missing_marker() {
        assert!(extract_player_response("<html></html>").is_none());
    }
}
