//! Inline rendering: escaping, code spans and emphasis.

use regex::Regex;
use std::sync::LazyLock;

static CODE_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`[^`]+`").expect("Invalid regex"));
static BOLD_ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*\*(.+?)\*\*\*").expect("Invalid regex"));
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("Invalid regex"));
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").expect("Invalid regex"));

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render one line of inline Markdown.
///
/// The text is escaped first. Code spans keep their content literally;
/// emphasis applies everywhere else, longest marker first.
pub fn render_inline(text: &str) -> String {
    let escaped = escape_html(text);
    let mut out = String::with_capacity(escaped.len() + 16);
    let mut last = 0;

    for span in CODE_SPAN.find_iter(&escaped) {
        out.push_str(&emphasis(&escaped[last..span.start()]));
        out.push_str("<code>");
        out.push_str(&escaped[span.start() + 1..span.end() - 1]);
        out.push_str("</code>");
        last = span.end();
    }
    out.push_str(&emphasis(&escaped[last..]));

    out
}

fn emphasis(text: &str) -> String {
    let text = BOLD_ITALIC.replace_all(text, "<strong><em>$1</em></strong>");
    let text = BOLD.replace_all(&text, "<strong>$1</strong>");
    let text = ITALIC.replace_all(&text, "<em>$1</em>");
    text.into_owned()
}
