//! Data models for transcripts.

use serde::{Deserialize, Serialize};

/// A single spoken-text segment.
///
/// Only `text` is used downstream; timing is kept when the provider sends it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TranscriptSegment {
    #[serde(default)]
    pub text: String,
    /// Offset from the start of the video (provider units).
    #[serde(default, alias = "start", skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Ordered transcript for one video.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    pub fn new(segments: Vec<TranscriptSegment>) -> Self {
        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Segment texts joined with single spaces.
    pub fn raw_text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_text_joins_with_spaces() {
        let transcript = Transcript::new(vec![
            TranscriptSegment::new("a"),
            TranscriptSegment::new("b"),
        ]);
        assert_eq!(transcript.raw_text(), "a b");
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn test_segment_accepts_start_alias() {
        let segment: TranscriptSegment =
            serde_json::from_str(r#"{"text": "hi", "start": 1.5, "duration": 2.0}"#).unwrap();
        assert_eq!(segment.offset, Some(1.5));
        assert_eq!(segment.duration, Some(2.0));
    }
}
