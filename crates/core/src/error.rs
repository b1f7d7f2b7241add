use thiserror::Error;

#[derive(Error, Debug)]
pub enum KonspektError {
    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid API response: {reason}")]
    InvalidResponse { reason: String },

    #[error("No transcript found for video ID: {video_id}.")]
    NoTranscript { video_id: String },

    #[error("Transcripts are disabled for video ID: {video_id}.")]
    TranscriptsDisabled { video_id: String },

    #[error("Failed to fetch transcript for {video_id}: {reason}")]
    TranscriptFetchFailed { video_id: String, reason: String },
}

pub type Result<T> = std::result::Result<T, KonspektError>;
