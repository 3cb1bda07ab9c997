//! tldw Core Library
//!
//! Fetches YouTube transcripts and summarizes them, either with a hosted LLM or with
//! word-frequency sentence extraction.

pub mod config;
pub mod error;
pub mod extractive;
pub mod format;
pub mod generative;
pub mod provider;
pub mod session;
pub mod summarize;
pub mod transcript;
pub mod types;
pub mod video_id;

// Re-export commonly used items at crate root
pub use config::AppConfig;
pub use error::{Error, Result};
pub use extractive::{DEFAULT_RATIO, summarize_extractive};
pub use format::{format_language, format_timestamp, format_transcript_with_timestamps};
pub use generative::{GenerationConfig, build_prompt, summarize_generative};
pub use provider::{ApiKeys, MISSING_API_KEY, Provider, ProviderConfig};
pub use session::{Session, UrlPolicy};
pub use summarize::{Backend, SummaryRequest, summarize};
pub use transcript::{TranscriptSource, YoutubeTranscriptSource};
pub use types::{LanguageCode, Transcript, TranscriptLanguage, TranscriptSegment, VideoInfo};
pub use video_id::{VideoId, extract_video_id, parse_video_url, thumbnail_url};
