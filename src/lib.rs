//! yt-article - YouTube videos as readable articles
//!
//! A CLI tool and library that fetches a video's transcript, has an LLM
//! restructure it into an article, and renders the result as HTML or an
//! exportable Markdown document.
//!
//! # Architecture
//!
//! - `config` - Settings file and prompt templates
//! - `source` - Video ID resolution, transcript and title lookup
//! - `llm` - Text generation backends (Gemini, OpenRouter)
//! - `pipeline` - Single-pass and two-pass article generation
//! - `render` - Restricted Markdown to HTML renderer
//! - `export` - Front matter export
//! - `orchestrator` - Runs one conversion end to end
//!
//! # Example
//!
//! ```rust,no_run
//! use yt_article::config::Settings;
//! use yt_article::orchestrator::Converter;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let converter = Converter::new(&settings)?;
//!
//!     let conversion = converter.convert("https://youtu.be/dQw4w9WgXcQ").await?;
//!     println!("{}", yt_article::render::render(&conversion.markdown));
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod http;
pub mod llm;
pub mod orchestrator;
pub mod pipeline;
pub mod render;
pub mod source;

pub use error::{ArticleError, Result};
