//! Video title lookup via noembed.

use super::{TitleSource, VideoReference};
use crate::error::Result;
use crate::http::create_client;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

const NOEMBED_API_BASE: &str = "https://noembed.com";

/// Title used whenever the lookup fails.
pub const UNTITLED: &str = "Untitled Video";

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    #[serde(default)]
    title: Option<serde_json::Value>,
}

/// Best-effort title resolver using the public oEmbed proxy.
pub struct NoembedClient {
    client: reqwest::Client,
    base_url: String,
}

impl NoembedClient {
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(create_client()?))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: NOEMBED_API_BASE.to_string(),
        }
    }

    /// Point the client at a different API base (used by tests).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    async fn lookup(&self, video: &VideoReference) -> Result<Option<String>> {
        let response = self
            .client
            .get(format!("{}/embed", self.base_url))
            .query(&[("url", video.watch_url())])
            .send()
            .await?;

        let embed: EmbedResponse = response.json().await?;
        Ok(embed
            .title
            .as_ref()
            .and_then(|t| t.as_str())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string))
    }
}

#[async_trait]
impl TitleSource for NoembedClient {
    #[instrument(skip(self), fields(video = %video))]
    async fn fetch_title(&self, video: &VideoReference) -> String {
        match self.lookup(video).await {
            Ok(Some(title)) => title,
            Ok(None) => {
                debug!("No title in embed response");
                UNTITLED.to_string()
            }
            Err(e) => {
                debug!("Title lookup failed: {}", e);
                UNTITLED.to_string()
            }
        }
    }
}
