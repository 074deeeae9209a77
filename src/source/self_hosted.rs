//! Keyless transcript endpoint deployed next to the app.
//!
//! Serves `GET <url>?v=<id>` and answers `{"segments": [{text, start, duration}]}`,
//! or `{"error": message}` with a failure status.

use super::{parse_transcript_payload, Transcript, TranscriptSource, VideoReference};
use crate::error::{ArticleError, Result};
use crate::http::{create_client, error_body};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

/// Transcript provider backed by a self-hosted endpoint.
pub struct SelfHostedClient {
    client: reqwest::Client,
    endpoint: String,
}

impl SelfHostedClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        Ok(Self::with_client(create_client()?, endpoint))
    }

    pub fn with_client(client: reqwest::Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl TranscriptSource for SelfHostedClient {
    #[instrument(skip(self), fields(video = %video))]
    async fn fetch_transcript(&self, video: &VideoReference) -> Result<Transcript> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("v", video.as_str())])
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
