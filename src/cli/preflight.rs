//! Pre-flight checks before network operations.
//!
//! Validates input and credentials up front so a conversion never starts
//! only to fail on its first request.

use crate::config::Settings;
use crate::error::{ArticleError, Result};
use crate::source::{resolve, VideoReference};

/// Resolve the input, then check credentials.
///
/// An unusable input is reported before a missing key, and both before any
/// request is made.
pub fn prepare_conversion(input: &str, settings: &Settings) -> Result<VideoReference> {
    let video =
        resolve(input).ok_or_else(|| ArticleError::InvalidReference(input.trim().to_string()))?;
    settings.check_credentials()?;
    Ok(video)
}

/// Hint printed after a failed pre-flight check.
pub fn hint_for(err: &ArticleError) -> Option<&'static str> {
    match err {
        ArticleError::InvalidReference(_) => {
            Some("Paste a full YouTube URL (youtube.com/watch?v=... or youtu.be/...) or an 11-character video ID.")
        }
        ArticleError::MissingCredential(_) => {
            Some("Set keys with 'yt-article config set <key> <value>' or run 'yt-article doctor'.")
        }
        _ => None,
    }
}
