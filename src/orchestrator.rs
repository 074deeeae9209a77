//! Conversion orchestrator for yt-article.
//!
//! Coordinates one conversion: resolve the input, fetch the transcript and
//! title, then run the article pipeline. Every step is awaited in order.

use crate::config::{Settings, TranscriptProvider};
use crate::error::{ArticleError, Result};
use crate::http::create_client_with_timeout;
use crate::llm::{create_backend, GenerationParams};
use crate::pipeline::ArticlePipeline;
use crate::source::{
    resolve, NoembedClient, SelfHostedClient, SupadataClient, TitleSource, TranscriptSource,
    VideoReference,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// Stage of a running conversion, reported through the progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FetchingTranscript,
    Analyzing,
    Writing,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::FetchingTranscript => write!(f, "Fetching transcript..."),
            Stage::Analyzing => write!(f, "Analyzing content..."),
            Stage::Writing => write!(f, "Writing article..."),
        }
    }
}

/// Result of a finished conversion.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    pub video: VideoReference,
    pub title: String,
    pub markdown: String,
}

/// Runs conversions with one set of services.
pub struct Converter {
    transcripts: Arc<dyn TranscriptSource>,
    titles: Arc<dyn TitleSource>,
    pipeline: ArticlePipeline,
}

impl Converter {
    /// Build a converter from settings.
    ///
    /// Fails with `MissingCredential` before anything touches the network.
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.check_credentials()?;

        let client = create_client_with_timeout(Duration::from_secs(settings.http.timeout_secs))?;
        let transcripts: Arc<dyn TranscriptSource> = match settings.transcript.provider {
            TranscriptProvider::Supadata => Arc::new(SupadataClient::with_client(
                client.clone(),
                &settings.credentials.transcript_api_key,
            )),
            TranscriptProvider::SelfHosted => Arc::new(SelfHostedClient::with_client(
                client.clone(),
                &settings.transcript.self_hosted_url,
            )),
        };
        let titles = Arc::new(NoembedClient::with_client(client));

        let backend = create_backend(settings)?;
        let params = GenerationParams {
            temperature: settings.model.temperature,
            max_output_tokens: settings.model.max_output_tokens,
        };
        let pipeline = ArticlePipeline::new(backend, settings.model.strategy, params);

        info!(
            "Using {} transcripts, {} backend with {} strategy",
            settings.transcript.provider,
            pipeline.backend_name(),
            pipeline.strategy()
        );

        Ok(Self::with_components(transcripts, titles, pipeline))
    }

    /// Create a converter with custom components.
    pub fn with_components(
        transcripts: Arc<dyn TranscriptSource>,
        titles: Arc<dyn TitleSource>,
        pipeline: ArticlePipeline,
    ) -> Self {
        Self {
            transcripts,
            titles,
            pipeline,
        }
    }

    /// Convert a URL or video ID.
    pub async fn convert(&self, input: &str) -> Result<Conversion> {
        self.convert_with_progress(input, |_| {}).await
    }

    /// Convert a URL or video ID, reporting each stage as it starts.
    pub async fn convert_with_progress<F>(&self, input: &str, progress: F) -> Result<Conversion>
    where
        F: Fn(Stage) + Send + Sync,
    {
        let video = resolve(input)
            .ok_or_else(|| ArticleError::InvalidReference(input.trim().to_string()))?;
        self.convert_video(&video, progress).await
    }

    /// Convert an already resolved video.
    #[instrument(skip(self, progress), fields(video = %video))]
    pub async fn convert_video<F>(&self, video: &VideoReference, progress: F) -> Result<Conversion>
    where
        F: Fn(Stage) + Send + Sync,
    {
        progress(Stage::FetchingTranscript);
        let transcript = self.transcripts.fetch_transcript(video).await?;
        if transcript.is_empty() {
            return Err(ArticleError::NoTranscript(video.to_string()));
        }
        let raw_text = transcript.raw_text();
        info!(
            "Transcript has {} segments ({} chars)",
            transcript.len(),
            raw_text.chars().count()
        );

        progress(Stage::Analyzing);
        let title = self.titles.fetch_title(video).await;

        progress(Stage::Writing);
        let markdown = self.pipeline.transform(&raw_text, &title).await?;

        Ok(Conversion {
            video: video.clone(),
            title,
            markdown,
        })
    }
}
