//! OpenRouter chat completions backend.

use super::{non_empty, ModelBackend, ModelRequest};
use crate::error::{ArticleError, Result};
use crate::http::{create_client, error_body};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const OPENROUTER_API_BASE: &str = "https://openrouter.ai/api/v1";
const BACKEND_NAME: &str = "OpenRouter";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Default, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text at `choices[0].message.content`.
    fn into_text(self) -> Option<String> {
        self.choices.into_iter().next()?.message?.content
    }
}

/// OpenRouter backend (OpenAI-compatible chat completions).
pub struct OpenRouterBackend {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    referer: Option<String>,
    app_title: Option<String>,
}

impl OpenRouterBackend {
    pub fn new(api_key: &str, model: &str) -> Result<Self> {
        Ok(Self::with_client(create_client()?, api_key, model))
    }

    pub fn with_client(client: reqwest::Client, api_key: &str, model: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: OPENROUTER_API_BASE.to_string(),
            referer: None,
            app_title: None,
        }
    }

    /// Set the `HTTP-Referer` and `X-Title` headers OpenRouter uses to identify apps.
    pub fn with_client_headers(mut self, referer: &str, app_title: &str) -> Self {
        self.referer = Some(referer.to_string()).filter(|s| !s.is_empty());
        self.app_title = Some(app_title.to_string()).filter(|s| !s.is_empty());
        self
    }

    /// Point the backend at a different API base (used by tests).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl ModelBackend for OpenRouterBackend {
    fn name(&self) -> &str {
        BACKEND_NAME
    }

    #[instrument(skip(self, request), fields(model = %self.model, prompt_chars = request.prompt.chars().count()))]
    async fn generate(&self, request: &ModelRequest) -> Result<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            max_tokens: request.params.max_output_tokens,
            temperature: request.params.temperature,
        };

        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body);

        if let Some(referer) = &self.referer {
            builder = builder.header("HTTP-Referer", referer);
        }
        if let Some(title) = &self.app_title {
            builder = builder.header("X-Title", title);
        }

        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArticleError::ModelApi {
                backend: BACKEND_NAME.to_string(),
                status: status.as_u16(),
                body: error_body(response).await,
            });
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        let text = non_empty(parsed.into_text())
            .ok_or_else(|| ArticleError::EmptyModelResponse(BACKEND_NAME.to_string()))?;

        debug!("OpenRouter returned {} characters", text.len());
        Ok(text)
    }
}
