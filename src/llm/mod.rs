//! Text generation backends.
//!
//! Each backend implements [`ModelBackend`]; [`create_backend`] picks one from
//! the settings. There is no retry and no fallback between backends.

mod gemini;
mod openrouter;

pub use gemini::GeminiBackend;
pub use openrouter::OpenRouterBackend;

use crate::config::{BackendKind, Settings};
use crate::error::{ArticleError, Result};
use crate::http::create_client_with_timeout;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Generation parameters shared by all backends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.4,
            max_output_tokens: 8192,
        }
    }
}

/// A single stateless generation request.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub prompt: String,
    pub params: GenerationParams,
}

impl ModelRequest {
    pub fn new(prompt: impl Into<String>, params: GenerationParams) -> Self {
        Self {
            prompt: prompt.into(),
            params,
        }
    }
}

/// Trait for text generation services.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    /// Generate text for the prompt.
    ///
    /// Fails with `ModelApi` on a non-success status and with
    /// `EmptyModelResponse` when the reply carries no text.
    async fn generate(&self, request: &ModelRequest) -> Result<String>;
}

/// Build the backend selected in the settings.
pub fn create_backend(settings: &Settings) -> Result<Arc<dyn ModelBackend>> {
    let api_key = settings.backend_api_key();
    if api_key.trim().is_empty() {
        return Err(ArticleError::MissingCredential(format!(
            "{} API key",
            settings.model.backend
        )));
    }

    let client = create_client_with_timeout(Duration::from_secs(settings.http.timeout_secs))?;

    let backend: Arc<dyn ModelBackend> = match settings.model.backend {
        BackendKind::Gemini => Arc::new(GeminiBackend::with_client(
            client,
            api_key,
            &settings.model.gemini_model,
        )),
        BackendKind::OpenRouter => Arc::new(
            OpenRouterBackend::with_client(client, api_key, &settings.model.openrouter_model)
                .with_client_headers(&settings.http.referer, &settings.http.app_title),
        ),
    };
    Ok(backend)
}

/// Treat whitespace-only text as missing.
fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}
