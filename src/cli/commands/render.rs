//! Render command implementation.

use super::read_source;
use crate::render::{render, render_page};
use crate::source::resolve;
use anyhow::Result;

/// Run the render command.
pub fn run_render(file: &str, page: Option<&str>, title: &str) -> Result<()> {
    let markdown = read_source(file)?;
    let body = render(&markdown);

    let html = match page {
        Some(input) => {
            let video = resolve(input)
                .ok_or_else(|| anyhow::anyhow!("Invalid YouTube URL or video ID: {}", input))?;
            render_page(title, &video, &body)
        }
        None => body,
    };

    println!("{}", html);
    Ok(())
}
