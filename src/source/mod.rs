//! Video source abstraction for yt-article.
//!
//! Resolves user input to a YouTube video ID and provides trait-based access
//! to the transcript and title services.

mod models;
mod self_hosted;
mod title;
mod transcript;

pub use models::{Transcript, TranscriptSegment};
pub use self_hosted::SelfHostedClient;
pub use title::{NoembedClient, UNTITLED};
pub use transcript::{parse_transcript_payload, SupadataClient};

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

/// Length of a YouTube video ID.
const VIDEO_ID_LEN: usize = 11;

/// A validated 11-character YouTube video ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoReference(String);

impl VideoReference {
    /// Accept a string that is already shaped like a video ID.
    pub fn parse(id: &str) -> Option<Self> {
        is_video_id(id).then(|| Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl std::fmt::Display for VideoReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for VideoReference {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("Invalid video ID: {}", value))
    }
}

impl From<VideoReference> for String {
    fn from(value: VideoReference) -> Self {
        value.0
    }
}

/// Check for exactly 11 characters of `[A-Za-z0-9_-]`.
fn is_video_id(s: &str) -> bool {
    s.len() == VIDEO_ID_LEN
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Resolve a YouTube URL or bare video ID.
///
/// Short links (`youtu.be/<id>`) use the first path segment, long-form links
/// use the `v` query parameter (or an `/embed/`, `/shorts/` or `/v/` path).
/// If nothing comes out of the URL, a bare 11-character ID is accepted as-is.
/// Returns `None` when no ID can be derived.
pub fn resolve(input: &str) -> Option<VideoReference> {
    let input = input.trim();

    if let Ok(url) = Url::parse(input) {
        if let Some(id) = id_from_url(&url).and_then(|id| VideoReference::parse(&id)) {
            return Some(id);
        }
    }

    VideoReference::parse(input)
}

fn id_from_url(url: &Url) -> Option<String> {
    let host = url.host_str()?;

    if host.contains("youtu.be") {
        return url
            .path_segments()?
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string);
    }

    if host.contains("youtube.com") {
        if let Some((_, v)) = url.query_pairs().find(|(k, _)| k == "v") {
            return Some(v.into_owned());
        }

        let mut segments = url.path_segments()?;
        return match segments.next() {
            Some("embed" | "shorts" | "v" | "live") => segments.next().map(str::to_string),
            _ => None,
        };
    }

    None
}

/// Trait for transcript services.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript segments for a video.
    ///
    /// An empty transcript is returned as-is; the caller decides what that means.
    async fn fetch_transcript(&self, video: &VideoReference) -> Result<Transcript>;
}

/// Trait for title lookups.
#[async_trait]
pub trait TitleSource: Send + Sync {
    /// Fetch a display title. Never fails; falls back to [`UNTITLED`].
    async fn fetch_title(&self, video: &VideoReference) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> Option<String> {
        resolve(s).map(String::from)
    }

    #[test]
    fn test_resolve_long_form() {
        assert_eq!(
            id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            id("https://m.youtube.com/watch?feature=share&v=dQw4w9WgXcQ&t=42s"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            id("https://youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_resolve_short_link() {
        assert_eq!(
            id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            id("https://youtu.be/dQw4w9WgXcQ?si=abc"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_resolve_bare_id() {
        assert_eq!(id("dQw4w9WgXcQ"), Some("dQw4w9WgXcQ".to_string()));
        assert_eq!(id("  a_b-c_d-e_f  "), Some("a_b-c_d-e_f".to_string()));
    }

    #[test]
    fn test_resolve_rejects_everything_else() {
        assert_eq!(id(""), None);
        assert_eq!(id("not-a-video-id"), None);
        assert_eq!(id("dQw4w9WgXc"), None);
        assert_eq!(id("dQw4w9WgXcQQ"), None);
        assert_eq!(id("dQw4w9WgXc!"), None);
        assert_eq!(id("https://www.youtube.com/watch"), None);
        assert_eq!(id("https://www.youtube.com/watch?v=short"), None);
        assert_eq!(id("https://youtu.be/"), None);
        assert_eq!(id("https://vimeo.com/dQw4w9WgXcQ"), None);
    }

    #[test]
    fn test_watch_url() {
        let video = VideoReference::parse("dQw4w9WgXcQ").unwrap();
        assert_eq!(video.watch_url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(video.to_string(), "dQw4w9WgXcQ");
    }
}
