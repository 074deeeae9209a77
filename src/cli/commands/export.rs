//! Export command implementation.

use super::read_source;
use crate::cli::Output;
use crate::export::{build_document_today, export_filename};
use anyhow::Result;

/// Run the export command.
pub fn run_export(file: &str, title: &str, output: Option<String>) -> Result<()> {
    let body = read_source(file)?;
    let document = build_document_today(title, &body);

    let path = output.unwrap_or_else(|| export_filename(title));
    if path == "-" {
        println!("{}", document);
        return Ok(());
    }

    std::fs::write(&path, &document)?;
    Output::success(&format!("Exported '{}' to {}", title, path));
    Ok(())
}
