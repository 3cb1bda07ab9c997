use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// Opaque token naming a hosted video, e.g. `dQw4w9WgXcQ`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for VideoId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

fn match_known_pattern(url: &str) -> Option<&str> {
    if let Some((_, rest)) = url.split_once("?v=") {
        return Some(rest.split('&').next().unwrap_or(rest));
    }
    if let Some((_, rest)) = url.split_once("live/") {
        return Some(rest.split('?').next().unwrap_or(rest));
    }
    if url.contains("youtu.be") {
        let (_, rest) = url.split_once("be/")?;
        return Some(rest.split('?').next().unwrap_or(rest));
    }
    None
}

/// Extract a video id from a watch, live or short link.
///
/// Anything else is returned unchanged so callers can still try it as a bare id.
pub fn extract_video_id(url: &str) -> VideoId {
    match match_known_pattern(url) {
        Some(id) => VideoId::new(id),
        None => {
            warn!(url, "Not a recognized YouTube link, using input as video id");
            VideoId::new(url)
        }
    }
}

/// Like [`extract_video_id`], but rejects links that match no known pattern.
pub fn parse_video_url(url: &str) -> Result<VideoId> {
    match_known_pattern(url)
        .map(VideoId::new)
        .ok_or_else(|| Error::MalformedInput {
            input: url.to_string(),
        })
}

pub fn thumbnail_url(video_id: &VideoId) -> String {
    format!("https://img.youtube.com/vi/{}/hqdefault.jpg", video_id)
}
