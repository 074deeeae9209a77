//! CLI module for yt-article.

pub mod commands;
mod output;
pub mod preflight;

pub use output::{mask_secret, Output};

use clap::{Parser, Subcommand};

/// yt-article - turn YouTube videos into readable articles
///
/// Fetches a video's transcript, has an LLM restructure it as an article,
/// and renders or exports the result.
#[derive(Parser, Debug)]
#[command(name = "yt-article")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a YouTube video into an article
    Convert {
        /// YouTube URL or 11-character video ID
        input: String,

        /// Model backend to use for this run (gemini, openrouter)
        #[arg(short, long)]
        backend: Option<String>,

        /// Pipeline strategy for this run (single-pass, two-pass)
        #[arg(short, long)]
        strategy: Option<String>,

        /// Output format (markdown, html, document)
        #[arg(short, long, default_value = "markdown")]
        format: String,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Also save the front-matter document into the export directory
        #[arg(long)]
        save: bool,
    },

    /// Render a Markdown file to HTML
    Render {
        /// Markdown file to render ('-' for stdin)
        file: String,

        /// Wrap the fragment in a standalone HTML page for this video ID
        #[arg(long)]
        page: Option<String>,

        /// Page title (used with --page)
        #[arg(long, default_value = "Untitled Video")]
        title: String,
    },

    /// Wrap a Markdown file in export front matter
    Export {
        /// Markdown file to export ('-' for stdin)
        file: String,

        /// Article title written into the front matter
        #[arg(short, long)]
        title: String,

        /// Output file (defaults to a name derived from the title)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Start HTTP API server for integration with other systems
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Check credentials and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration (keys masked)
    Show,

    /// Set a configuration value and save it
    Set {
        /// Configuration key (e.g., "model.backend")
        key: String,
        /// Configuration value
        value: String,
    },

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
