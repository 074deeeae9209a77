//! Convert command implementation.

use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use crate::export::{build_document_today, export_filename};
use crate::orchestrator::{Conversion, Converter};
use crate::render::{render, render_page};
use anyhow::Result;

/// What `convert` writes out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    /// The article Markdown as produced by the model.
    Markdown,
    /// A standalone HTML page.
    Html,
    /// Markdown with export front matter.
    Document,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            "document" | "doc" | "obsidian" => Ok(OutputFormat::Document),
            _ => Err(format!(
                "Unknown format: {}. Use markdown, html, or document.",
                s
            )),
        }
    }
}

/// Format a finished conversion.
pub fn format_conversion(conversion: &Conversion, format: OutputFormat) -> String {
    match format {
        OutputFormat::Markdown => conversion.markdown.clone(),
        OutputFormat::Html => render_page(
            &conversion.title,
            &conversion.video,
            &render(&conversion.markdown),
        ),
        OutputFormat::Document => build_document_today(&conversion.title, &conversion.markdown),
    }
}

/// Run the convert command.
pub async fn run_convert(
    input: &str,
    backend: Option<&str>,
    strategy: Option<&str>,
    format: &str,
    output: Option<String>,
    save: bool,
    mut settings: Settings,
) -> Result<()> {
    let output_format: OutputFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    if let Some(backend) = backend {
        settings.model.backend = backend.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    }
    if let Some(strategy) = strategy {
        settings.model.strategy = strategy.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    }

    // Pre-flight checks
    let video = match preflight::prepare_conversion(input, &settings) {
        Ok(video) => video,
        Err(e) => {
            Output::error(&format!("{}", e));
            if let Some(hint) = preflight::hint_for(&e) {
                Output::info(hint);
            }
            return Err(e.into());
        }
    };

    let converter = Converter::new(&settings)?;

    let spinner = Output::spinner("Starting...");
    let result = converter
        .convert_video(&video, |stage| spinner.set_message(stage.to_string()))
        .await;
    spinner.finish_and_clear();

    let conversion = match result {
        Ok(conversion) => conversion,
        Err(e) => {
            Output::error(&format!("Conversion failed: {}", e));
            return Err(e.into());
        }
    };

    let rendered = format_conversion(&conversion, output_format);

    match output {
        Some(path) if path != "-" => {
            std::fs::write(&path, &rendered)?;
            Output::success(&format!("Wrote '{}' to {}", conversion.title, path));
        }
        _ => {
            println!("{}", rendered);
        }
    }

    if save {
        let dir = settings.output_dir();
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(export_filename(&conversion.title));
        std::fs::write(
            &path,
            build_document_today(&conversion.title, &conversion.markdown),
        )?;
        Output::success(&format!("Saved to {}", path.display()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::VideoReference;

    fn conversion() -> Conversion {
        Conversion {
            video: VideoReference::parse("dQw4w9WgXcQ").unwrap(),
            title: "A <Talk>".to_string(),
            markdown: "## Intro\nHello".to_string(),
        }
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("HTML".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert_eq!("obsidian".parse::<OutputFormat>().unwrap(), OutputFormat::Document);
        assert!("pdf".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_format_conversion() {
        let c = conversion();
        assert_eq!(format_conversion(&c, OutputFormat::Markdown), "## Intro\nHello");

        let html = format_conversion(&c, OutputFormat::Html);
        assert!(html.contains("<h1>A &lt;Talk&gt;</h1>"));
        assert!(html.contains("<h2>Intro</h2>\n<p>Hello</p>"));

        let doc = format_conversion(&c, OutputFormat::Document);
        assert!(doc.starts_with("---\nsource: youtube\ntitle: \"A <Talk>\"\n"));
        assert!(doc.ends_with("---\n\n## Intro\nHello"));
    }
}
