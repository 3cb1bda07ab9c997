use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Transcript unavailable for {video_id}: {reason}")]
    TranscriptUnavailable { video_id: String, reason: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Authentication failed for {provider}: check the API key")]
    Authentication { provider: String },

    #[error("Quota exceeded for {provider}")]
    Quota { provider: String },

    #[error("Not a recognized YouTube link: {input}")]
    MalformedInput { input: String },

    #[error("Text has too few sentences to summarize ({sentences} found)")]
    EmptySummary { sentences: usize },

    #[error("Invalid API response: {reason}")]
    InvalidApiResponse { reason: String },

    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {reason}")]
    Config { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn unavailable(video_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::TranscriptUnavailable {
            video_id: video_id.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
