use std::time::Duration;

use crate::types::{Transcript, TranscriptLanguage};

/// Format a duration as MM:SS timestamp
pub fn format_timestamp(offset: Duration) -> String {
    let total = offset.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Format transcript segments with timestamps
pub fn format_transcript_with_timestamps(transcript: &Transcript) -> String {
    transcript
        .segments
        .iter()
        .map(|seg| format!("[{}] {}", format_timestamp(seg.start), seg.text.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Human-readable label for a caption track, e.g. `en - English (auto-generated)`
pub fn format_language(language: &TranscriptLanguage) -> String {
    if language.is_generated {
        format!("{} - {} (auto-generated)", language.code, language.name)
    } else {
        format!("{} - {}", language.code, language.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{types::TranscriptSegment, video_id::VideoId};

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(Duration::ZERO), "00:00");
        assert_eq!(format_timestamp(Duration::from_secs_f64(75.9)), "01:15");
        assert_eq!(format_timestamp(Duration::from_secs(3600)), "60:00");
    }

    #[test]
    fn test_format_transcript_with_timestamps() {
        let transcript = Transcript {
            video_id: VideoId::new("abc"),
            language: "en".to_string(),
            segments: vec![
                TranscriptSegment {
                    text: " first line ".to_string(),
                    start: Duration::from_secs(0),
                    duration: Duration::from_secs(2),
                },
                TranscriptSegment {
                    text: "second line".to_string(),
                    start: Duration::from_secs(62),
                    duration: Duration::from_secs(3),
                },
            ],
        };

        assert_eq!(
            format_transcript_with_timestamps(&transcript),
            "[00:00] first line\n[01:02] second line"
        );
    }

    #[test]
    fn test_format_language() {
        let generated = TranscriptLanguage {
            code: "en".to_string(),
            name: "English".to_string(),
            is_generated: true,
        };
        assert_eq!(format_language(&generated), "en - English (auto-generated)");
    }
}
