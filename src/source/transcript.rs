//! Supadata transcript API client.

use super::{Transcript, TranscriptSegment, TranscriptSource, VideoReference};
use crate::error::{ArticleError, Result};
use crate::http::{create_client, error_body};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument, warn};

const SUPADATA_API_BASE: &str = "https://api.supadata.ai/v1";

/// Transcript provider backed by the Supadata API.
pub struct SupadataClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SupadataClient {
    /// Create a client with a default HTTP client.
    pub fn new(api_key: &str) -> Result<Self> {
        Ok(Self::with_client(create_client()?, api_key))
    }

    /// Create a client sharing an existing HTTP client.
    pub fn with_client(client: reqwest::Client, api_key: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            base_url: SUPADATA_API_BASE.to_string(),
        }
    }

    /// Point the client at a different API base (used by tests).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl TranscriptSource for SupadataClient {
    #[instrument(skip(self), fields(video = %video))]
    async fn fetch_transcript(&self, video: &VideoReference) -> Result<Transcript> {
        let response = self
            .client
            .get(format!("{}/youtube/transcript", self.base_url))
            .query(&[("url", video.watch_url())])
            .header("x-api-key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArticleError::TranscriptFetch {
                status: status.as_u16(),
                body: error_body(response).await,
            });
        }

        let payload: Value = response.json().await?;
        let transcript = parse_transcript_payload(payload)?;
        debug!("Fetched {} transcript segments", transcript.len());
        Ok(transcript)
    }
}

/// Extract transcript segments from a provider response.
///
/// Compatibility shim rather than a validated contract: the segments are
/// taken from `content`, then `transcript`, then `segments` (the self-hosted
/// endpoint), then the whole body. A string in any of these fields is treated
/// as a single segment.
pub fn parse_transcript_payload(payload: Value) -> Result<Transcript> {
    let mut payload = payload;
    let field = ["content", "transcript", "segments"]
        .into_iter()
        .find_map(|key| payload.get_mut(key).filter(|v| is_present(v)).map(Value::take));

    let segments = match field {
        Some(value) => value,
        None => {
            warn!("Transcript response has no content, transcript or segments field, using raw body");
            payload
        }
    };

    match segments {
        Value::Array(items) => items
            .into_iter()
            .map(segment_from_value)
            .collect::<Result<Vec<_>>>()
            .map(Transcript::new),
        Value::String(text) if text.trim().is_empty() => Ok(Transcript::default()),
        Value::String(text) => Ok(Transcript::new(vec![TranscriptSegment::new(text)])),
        other => Err(ArticleError::MalformedTranscript(format!(
            "expected a segment list, got {}",
            json_kind(&other)
        ))),
    }
}

fn segment_from_value(value: Value) -> Result<TranscriptSegment> {
    match value {
        Value::String(text) => Ok(TranscriptSegment::new(text)),
        other => Ok(serde_json::from_value(other)?),
    }
}

/// Whether a field counts as present (empty strings and nulls do not).
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Bool(b) => *b,
        _ => true,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn video() -> VideoReference {
        VideoReference::parse("dQw4w9WgXcQ").unwrap()
    }

    #[test]
    fn test_payload_content_field() {
        let transcript = parse_transcript_payload(json!({
            "content": [{"text": "a", "offset": 0, "duration": 1200}, {"text": "b"}],
            "lang": "en"
        }))
        .unwrap();
        assert_eq!(transcript.raw_text(), "a b");
    }

    #[test]
    fn test_payload_transcript_field() {
        let transcript = parse_transcript_payload(json!({
            "transcript": [{"text": "hello"}, {"text": "world"}]
        }))
        .unwrap();
        assert_eq!(transcript.raw_text(), "hello world");
    }

    #[test]
    fn test_payload_segments_field() {
        let transcript = parse_transcript_payload(json!({
            "segments": [{"text": "a", "start": 0.0, "duration": 1.0}, {"text": "b", "start": 1.0}]
        }))
        .unwrap();
        assert_eq!(transcript.raw_text(), "a b");
        assert_eq!(transcript.segments[0].offset, Some(0.0));
    }

    #[test]
    fn test_payload_raw_body_fallback() {
        let transcript = parse_transcript_payload(json!([{"text": "x"}, {"text": "y"}])).unwrap();
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn test_payload_plain_text_content() {
        let transcript = parse_transcript_payload(json!({"content": "one long text"})).unwrap();
        assert_eq!(transcript.raw_text(), "one long text");
    }

    #[test]
    fn test_payload_empty_sequence_is_not_an_error() {
        let transcript = parse_transcript_payload(json!({"content": []})).unwrap();
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_payload_unrecognized_object() {
        let err = parse_transcript_payload(json!({"message": "nope"})).unwrap_err();
        assert!(matches!(err, ArticleError::MalformedTranscript(_)));
    }

    #[tokio::test]
    async fn test_fetch_sends_key_and_watch_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/transcript"))
            .and(query_param("url", "https://www.youtube.com/watch?v=dQw4w9WgXcQ"))
            .and(header("x-api-key", "sd_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"text": "never"}, {"text": "gonna"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = SupadataClient::new("sd_test").unwrap().with_base_url(&server.uri());
        let transcript = client.fetch_transcript(&video()).await.unwrap();
        assert_eq!(transcript.raw_text(), "never gonna");
    }

    #[tokio::test]
    async fn test_fetch_error_status_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let client = SupadataClient::new("bad").unwrap().with_base_url(&server.uri());
        match client.fetch_transcript(&video()).await {
            Err(ArticleError::TranscriptFetch { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid api key");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
