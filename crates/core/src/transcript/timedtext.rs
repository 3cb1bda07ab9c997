use std::{sync::LazyLock, time::Duration};

use regex::Regex;

use crate::types::TranscriptSegment;

static TEXT_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<text\b([^>]*)>(.*?)</text>"#).expect("valid timed text pattern")
});
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\w+)="([^"]*)""#).expect("valid attribute pattern")
});
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#x[0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);").expect("valid entity pattern")
});

fn unescape(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ if entity.starts_with("#x") => u32::from_str_radix(&entity[2..], 16)
                    .ok()
                    .and_then(char::from_u32),
                _ => entity[1..].parse().ok().and_then(char::from_u32),
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn seconds(value: Option<&str>) -> Duration {
    value
        .and_then(|v| v.parse::<f64>().ok())
        // Rejects negative, NaN and out-of-range values.
        .and_then(|v| Duration::try_from_secs_f64(v).ok())
        .unwrap_or_default()
}

/// Parse a YouTube timed-text XML document into segments.
///
/// Captions are entity-decoded twice (the payload is HTML escaped inside XML), inline
/// formatting tags are removed and empty captions are dropped.
pub fn parse_timed_text(xml: &str) -> Vec<TranscriptSegment> {
    TEXT_ELEMENT
        .captures_iter(xml)
        .filter_map(|caps| {
            let attributes = &caps[1];
            let attr = |name: &str| {
                ATTRIBUTE
                    .captures_iter(attributes)
                    .find(|a| &a[1] == name)
                    .map(|a| a.get(2).map_or("", |m| m.as_str()).to_string())
            };

            let text = unescape(&unescape(&caps[2]));
            let text = TAG.replace_all(&text, "");
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                return None;
            }

            Some(TranscriptSegment {
                text,
                start: seconds(attr("start").as_deref()),
                duration: seconds(attr("dur").as_deref()),
            })
        })
        .collect()
}
