use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::video_id::VideoId;

pub type LanguageCode = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub video_id: VideoId,
    pub language: LanguageCode,
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// All segment texts joined by single spaces, in chronological order.
    pub fn full_text(&self) -> String {
        self.segments
            .iter()
            .map(|seg| seg.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn duration(&self) -> Duration {
        self.segments
            .last()
            .map(|seg| seg.start + seg.duration)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    pub start: Duration,
    pub duration: Duration,
}

/// One caption track a video offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptLanguage {
    pub code: LanguageCode,
    pub name: String,
    pub is_generated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub id: VideoId,
    pub title: Option<String>,
    pub thumbnail_url: String,
    pub languages: Vec<TranscriptLanguage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str, start: f64, duration: f64) -> TranscriptSegment {
        TranscriptSegment {
            text: text.to_string(),
            start: Duration::from_secs_f64(start),
            duration: Duration::from_secs_f64(duration),
        }
    }

    #[test]
    fn test_full_text_joins_with_spaces() {
        let transcript = Transcript {
            video_id: VideoId::new("abc"),
            language: "en".to_string(),
            segments: vec![segment("hello there", 0.0, 1.5), segment("general", 1.5, 2.0)],
        };

        assert_eq!(transcript.full_text(), "hello there general");
        assert_eq!(transcript.duration(), Duration::from_secs_f64(3.5));
    }

    #[test]
    fn test_empty_transcript() {
        let transcript = Transcript {
            video_id: VideoId::new("abc"),
            language: "en".to_string(),
            segments: Vec::new(),
        };

        assert_eq!(transcript.full_text(), "");
        assert_eq!(transcript.duration(), Duration::ZERO);
    }
}
