//! Error types for yt-article.

use thiserror::Error;

/// Library-level error type for yt-article operations.
#[derive(Error, Debug)]
pub enum ArticleError {
    #[error("Invalid YouTube URL or video ID: {0}")]
    InvalidReference(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Transcript fetch failed: {status} - {body}")]
    TranscriptFetch { status: u16, body: String },

    #[error("No transcript found for video {0}")]
    NoTranscript(String),

    #[error("Unrecognized transcript payload: {0}")]
    MalformedTranscript(String),

    #[error("{backend} API failed: {status} - {body}")]
    ModelApi {
        backend: String,
        status: u16,
        body: String,
    },

    #[error("{0} returned an empty response")]
    EmptyModelResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for yt-article operations.
pub type Result<T> = std::result::Result<T, ArticleError>;
