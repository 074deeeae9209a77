//! Markdown export with front matter.
//!
//! Produces the document written by `convert --save` and `export`:
//! a YAML front matter block followed by the article body unchanged.

use chrono::{NaiveDate, Utc};

/// Tags written into every exported document.
pub const EXPORT_TAGS: [&str; 2] = ["youtube", "article"];

/// Longest file stem produced by [`export_filename`].
const MAX_FILENAME_CHARS: usize = 60;

/// Build the export document for `title` and `body` dated `date`.
pub fn build_document(title: &str, body: &str, date: NaiveDate) -> String {
    format!(
        "---\nsource: youtube\ntitle: \"{}\"\ndate: {}\ntags: [{}]\n---\n\n{}",
        escape_quoted(title),
        date.format("%Y-%m-%d"),
        EXPORT_TAGS.join(", "),
        body
    )
}

/// Build the export document dated today (UTC).
pub fn build_document_today(title: &str, body: &str) -> String {
    build_document(title, body, Utc::now().date_naive())
}

/// Escape a value for a double-quoted YAML scalar.
fn escape_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// File name for an exported article.
///
/// Keeps ASCII letters, digits and spaces, turns whitespace runs into
/// hyphens and caps the stem at 60 characters.
pub fn export_filename(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();

    let stem: String = kept
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(MAX_FILENAME_CHARS)
        .collect();

    if stem.is_empty() {
        "article.md".to_string()
    } else {
        format!("{}.md", stem)
    }
}
