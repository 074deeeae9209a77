//! Configuration module for yt-article.
//!
//! Handles loading and saving application settings and the prompt templates.

mod prompts;
mod settings;

pub use prompts::Prompts;
pub use settings::{
    BackendKind, CredentialSettings, ExportSettings, HttpSettings, ModelSettings,
    PipelineStrategy, Settings, TranscriptProvider, TranscriptSettings,
};
