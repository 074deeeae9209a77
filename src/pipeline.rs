//! Transcript to article transformation.
//!
//! Two strategies share one entry point:
//!
//! - **Single pass**: one call rewrites the transcript as an article.
//! - **Two pass**: the first call extracts a fixed five-section outline, the
//!   second expands that outline (not the transcript) into the article.
//!
//! The pipeline only assembles prompts and chains outputs; generation is
//! delegated to a [`ModelBackend`].

use crate::config::{PipelineStrategy, Prompts};
use crate::error::{ArticleError, Result};
use crate::llm::{GenerationParams, ModelBackend, ModelRequest};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// Transcript character budget for the outline pass.
pub const OUTLINE_TRANSCRIPT_BUDGET: usize = 60_000;

/// Transcript character budget for the single-pass prompt.
pub const SINGLE_PASS_TRANSCRIPT_BUDGET: usize = 30_000;

/// Appended to a transcript cut at its budget.
pub const TRUNCATION_MARKER: &str = "\n[transcript truncated]";

/// Cut `text` to at most `max_chars` characters, marking the cut.
pub fn truncate_transcript(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

/// Turns raw transcript text into article Markdown.
pub struct ArticlePipeline {
    backend: Arc<dyn ModelBackend>,
    strategy: PipelineStrategy,
    params: GenerationParams,
    prompts: Prompts,
}

impl ArticlePipeline {
    pub fn new(
        backend: Arc<dyn ModelBackend>,
        strategy: PipelineStrategy,
        params: GenerationParams,
    ) -> Self {
        Self {
            backend,
            strategy,
            params,
            prompts: Prompts::default(),
        }
    }

    pub fn strategy(&self) -> PipelineStrategy {
        self.strategy
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Produce the article for a transcript and title.
    #[instrument(skip(self, raw_text), fields(strategy = %self.strategy, chars = raw_text.chars().count()))]
    pub async fn transform(&self, raw_text: &str, title: &str) -> Result<String> {
        match self.strategy {
            PipelineStrategy::SinglePass => self.single_pass(raw_text, title).await,
            PipelineStrategy::TwoPass => {
                let outline = self.extract_outline(raw_text, title).await?;
                self.write_article(&outline, title).await
            }
        }
    }

    /// Single-pass: transcript straight to article.
    pub async fn single_pass(&self, raw_text: &str, title: &str) -> Result<String> {
        let transcript = truncate_transcript(raw_text, SINGLE_PASS_TRANSCRIPT_BUDGET);
        let prompt = Prompts::render(
            &self.prompts.single_pass,
            &HashMap::from([("title", title), ("transcript", transcript.as_str())]),
        );
        info!("Writing article in a single pass with {}", self.backend.name());
        self.call(prompt).await
    }

    /// Pass 1: extract the five-section outline.
    pub async fn extract_outline(&self, raw_text: &str, title: &str) -> Result<String> {
        let transcript = truncate_transcript(raw_text, OUTLINE_TRANSCRIPT_BUDGET);
        let prompt = Prompts::render(
            &self.prompts.outline,
            &HashMap::from([("title", title), ("transcript", transcript.as_str())]),
        );
        info!("Extracting outline with {}", self.backend.name());
        self.call(prompt).await
    }

    /// Pass 2: expand the outline into the article.
    pub async fn write_article(&self, outline: &str, title: &str) -> Result<String> {
        let prompt = Prompts::render(
            &self.prompts.article,
            &HashMap::from([("title", title), ("outline", outline)]),
        );
        info!("Writing article from outline with {}", self.backend.name());
        self.call(prompt).await
    }

    async fn call(&self, prompt: String) -> Result<String> {
        let text = self
            .backend
            .generate(&ModelRequest::new(prompt, self.params))
            .await?;

        if text.trim().is_empty() {
            return Err(ArticleError::EmptyModelResponse(
                self.backend.name().to_string(),
            ));
        }
        Ok(text)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Backend that replays canned replies and records prompts.
    pub(crate) struct ScriptedBackend {
        replies: Mutex<Vec<String>>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        pub(crate) fn new(replies: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.iter().rev().map(|s| s.to_string()).collect()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        pub(crate) fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }

        pub(crate) fn prompt(&self, i: usize) -> String {
            self.prompts.lock().unwrap()[i].clone()
        }
    }

    #[async_trait]
    impl ModelBackend for ScriptedBackend {
        fn name(&self) -> &str {
            "Scripted"
        }

        async fn generate(&self, request: &ModelRequest) -> Result<String> {
            self.prompts.lock().unwrap().push(request.prompt.clone());
            Ok(self.replies.lock().unwrap().pop().unwrap_or_default())
        }
    }

    fn pipeline(backend: Arc<ScriptedBackend>, strategy: PipelineStrategy) -> ArticlePipeline {
        ArticlePipeline::new(backend, strategy, GenerationParams::default())
    }

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_transcript("hello", 10), "hello");
        assert_eq!(truncate_transcript("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_long_text_marked() {
        assert_eq!(
            truncate_transcript("abcdef", 3),
            "abc\n[transcript truncated]"
        );
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(
            truncate_transcript("héllo wörld", 2),
            "hé\n[transcript truncated]"
        );
    }

    #[tokio::test]
    async fn test_two_pass_chains_outline_into_article() {
        let backend = ScriptedBackend::new(&["## Main Topic\nRust", "Final article"]);
        let article = pipeline(backend.clone(), PipelineStrategy::TwoPass)
            .transform("the raw transcript words", "Rust Talk")
            .await
            .unwrap();

        assert_eq!(article, "Final article");
        assert_eq!(backend.calls(), 2);

        let outline_prompt = backend.prompt(0);
        assert!(outline_prompt.contains("the raw transcript words"));
        assert!(outline_prompt.contains("\"Rust Talk\""));
        assert!(outline_prompt.contains("## Key Concepts & Terms"));

        let article_prompt = backend.prompt(1);
        assert!(article_prompt.contains("## Main Topic\nRust"));
        assert!(!article_prompt.contains("the raw transcript words"));
        assert!(article_prompt.contains("Do NOT repeat the title as an H1"));
    }

    #[tokio::test]
    async fn test_single_pass_makes_one_call() {
        let backend = ScriptedBackend::new(&["The article"]);
        let article = pipeline(backend.clone(), PipelineStrategy::SinglePass)
            .transform("spoken words", "Title")
            .await
            .unwrap();

        assert_eq!(article, "The article");
        assert_eq!(backend.calls(), 1);
        assert!(backend.prompt(0).contains("spoken words"));
        assert!(backend.prompt(0).contains("Glossary"));
    }

    #[tokio::test]
    async fn test_outline_prompt_is_truncated() {
        let backend = ScriptedBackend::new(&["outline", "article"]);
        let long = "x".repeat(OUTLINE_TRANSCRIPT_BUDGET + 500);
        pipeline(backend.clone(), PipelineStrategy::TwoPass)
            .transform(&long, "T")
            .await
            .unwrap();

        let prompt = backend.prompt(0);
        assert!(prompt.ends_with(&format!("{}{}", "x".repeat(10), TRUNCATION_MARKER)));
        assert!(!prompt.contains(&"x".repeat(OUTLINE_TRANSCRIPT_BUDGET + 1)));
    }

    #[tokio::test]
    async fn test_single_pass_prompt_is_truncated() {
        let backend = ScriptedBackend::new(&["article"]);
        let long = "y".repeat(SINGLE_PASS_TRANSCRIPT_BUDGET + 250);
        pipeline(backend.clone(), PipelineStrategy::SinglePass)
            .transform(&long, "T")
            .await
            .unwrap();

        assert_eq!(backend.calls(), 1);
        let expected = format!(
            "Transcript:\n{}{}",
            "y".repeat(SINGLE_PASS_TRANSCRIPT_BUDGET),
            TRUNCATION_MARKER
        );
        assert!(backend.prompt(0).ends_with(&expected));
    }

    #[tokio::test]
    async fn test_single_pass_under_budget_is_untouched() {
        let backend = ScriptedBackend::new(&["article"]);
        let exact = "y".repeat(SINGLE_PASS_TRANSCRIPT_BUDGET);
        pipeline(backend.clone(), PipelineStrategy::SinglePass)
            .transform(&exact, "T")
            .await
            .unwrap();

        let prompt = backend.prompt(0);
        assert!(prompt.ends_with(&format!("Transcript:\n{}", exact)));
        assert!(!prompt.contains(TRUNCATION_MARKER));
    }

    #[tokio::test]
    async fn test_blank_reply_is_empty_response() {
        let backend = ScriptedBackend::new(&["   \n"]);
        let err = pipeline(backend.clone(), PipelineStrategy::TwoPass)
            .transform("words", "T")
            .await
            .unwrap_err();

        assert!(matches!(err, ArticleError::EmptyModelResponse(_)));
        assert_eq!(backend.calls(), 1);
    }
}
