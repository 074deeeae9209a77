//! Restricted Markdown to HTML renderer.
//!
//! Supports exactly what the article prompts ask the model to produce:
//! fenced code, `#`-`###` headings, bold/italic, inline code, blockquotes,
//! `---` rules and flat `-` / `1.` lists. Rendering is an ordered pipeline:
//!
//! 1. fenced code blocks are split out,
//! 2. every other line is classified (first matching rule wins),
//! 3. runs of list items and of quote lines are grouped,
//! 4. whatever is left becomes a paragraph.
//!
//! All text taken from the source is HTML-escaped before it is placed in the
//! output, so model output cannot inject markup.

mod inline;

pub use inline::{escape_html, render_inline};

use crate::source::VideoReference;

/// A classified source line (or fenced block).
#[derive(Debug, Clone, PartialEq)]
enum Block<'a> {
    Code(String),
    Heading(u8, &'a str),
    Quote(&'a str),
    Rule,
    Item(&'a str),
    Blank,
    Paragraph(&'a str),
}

/// Render article Markdown to an HTML fragment.
pub fn render(markdown: &str) -> String {
    let blocks = parse_blocks(markdown);
    emit(&blocks)
}

/// Split the source into blocks, handling fences before line rules.
fn parse_blocks(markdown: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut lines = markdown.lines();

    while let Some(line) = lines.next() {
        if is_fence(line) {
            // An unterminated fence runs to the end of the input.
            let code: Vec<&str> = lines.by_ref().take_while(|l| !is_fence(l)).collect();
            blocks.push(Block::Code(code.join("\n").trim().to_string()));
        } else {
            blocks.push(classify(line));
        }
    }

    blocks
}

fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

/// Classify one line. Rule order is the precedence order.
fn classify(line: &str) -> Block<'_> {
    let line = line.trim_end();

    if let Some(text) = prefixed(line, "### ") {
        return Block::Heading(3, text);
    }
    if let Some(text) = prefixed(line, "## ") {
        return Block::Heading(2, text);
    }
    if let Some(text) = prefixed(line, "# ") {
        return Block::Heading(1, text);
    }
    if let Some(text) = prefixed(line, "> ") {
        return Block::Quote(text);
    }
    if line == "---" {
        return Block::Rule;
    }
    if let Some(text) = prefixed(line, "- ") {
        return Block::Item(text);
    }
    if let Some(text) = ordered_item(line) {
        return Block::Item(text);
    }
    if line.trim().is_empty() {
        return Block::Blank;
    }
    Block::Paragraph(line.trim())
}

/// Text after `prefix`, if there is any.
fn prefixed<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.strip_prefix(prefix)
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// Text of an `N. text` line.
fn ordered_item(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    prefixed(&line[digits..], ". ")
}

/// Write blocks out, grouping adjacent list items and quote lines.
fn emit(blocks: &[Block<'_>]) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut i = 0;

    while i < blocks.len() {
        match &blocks[i] {
            Block::Item(_) => {
                let mut list = vec!["<ul>".to_string()];
                while let Some(Block::Item(text)) = blocks.get(i) {
                    list.push(format!("<li>{}</li>", render_inline(text)));
                    i += 1;
                }
                list.push("</ul>".to_string());
                out.push(list.join("\n"));
                continue;
            }
            Block::Quote(_) => {
                let mut quoted = Vec::new();
                while let Some(Block::Quote(text)) = blocks.get(i) {
                    quoted.push(render_inline(text));
                    i += 1;
                }
                out.push(format!("<blockquote>{}</blockquote>", quoted.join("<br/>")));
                continue;
            }
            Block::Code(code) => {
                out.push(format!("<pre><code>{}</code></pre>", escape_html(code)));
            }
            Block::Heading(level, text) => {
                out.push(format!("<h{0}>{1}</h{0}>", level, render_inline(text)));
            }
            Block::Rule => out.push("<hr/>".to_string()),
            Block::Paragraph(text) => out.push(format!("<p>{}</p>", render_inline(text))),
            Block::Blank => {}
        }
        i += 1;
    }

    out.join("\n")
}

/// Wrap a rendered article in a standalone HTML document.
pub fn render_page(title: &str, video: &VideoReference, body_html: &str) -> String {
    let title = escape_html(title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body {{ max-width: 46rem; margin: 2rem auto; padding: 0 1rem; font-family: Georgia, serif; line-height: 1.6; }}
blockquote {{ border-left: 3px solid #ccc; margin-left: 0; padding-left: 1rem; color: #555; }}
pre {{ background: #f5f5f5; padding: 0.75rem; overflow-x: auto; }}
</style>
</head>
<body>
<header>
<h1>{title}</h1>
<p class="video-meta-sub"><a href="{url}" target="_blank" rel="noopener">Watch original video</a></p>
</header>
<article>
{body_html}
</article>
</body>
</html>
"#,
        url = escape_html(&video.watch_url()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_then_single_list() {
        let html = render("## Title\n- one\n- two\n");
        assert_eq!(html, "<h2>Title</h2>\n<ul>\n<li>one</li>\n<li>two</li>\n</ul>");
        assert_eq!(html.matches("<ul>").count(), 1);
    }

    #[test]
    fn test_ordered_items_use_unordered_container() {
        let html = render("1. first\n2. second\n10. tenth");
        assert_eq!(
            html,
            "<ul>\n<li>first</li>\n<li>second</li>\n<li>tenth</li>\n</ul>"
        );
    }

    #[test]
    fn test_blank_line_splits_lists() {
        let html = render("- a\n\n- b");
        assert_eq!(html.matches("<ul>").count(), 2);
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(render("# One"), "<h1>One</h1>");
        assert_eq!(render("### Three"), "<h3>Three</h3>");
        assert_eq!(render("#### Four"), "<p>#### Four</p>");
        assert_eq!(render("#NoSpace"), "<p>#NoSpace</p>");
    }

    #[test]
    fn test_script_is_escaped() {
        let html = render("<script>alert(1)</script>\n## <script>x</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>"));
        assert!(html.contains("<h2>&lt;script&gt;x&lt;/script&gt;</h2>"));
    }

    #[test]
    fn test_consecutive_quotes_merge() {
        let html = render("> first line\n> second line");
        assert_eq!(html, "<blockquote>first line<br/>second line</blockquote>");
    }

    #[test]
    fn test_separated_quotes_stay_apart() {
        let html = render("> one\n\n> two");
        assert_eq!(html, "<blockquote>one</blockquote>\n<blockquote>two</blockquote>");
    }

    #[test]
    fn test_code_block_is_escaped_and_not_parsed() {
        let html = render("```rust\nlet x = a < b;\n## not a heading\n```\nafter");
        assert_eq!(
            html,
            "<pre><code>let x = a &lt; b;\n## not a heading</code></pre>\n<p>after</p>"
        );
    }

    #[test]
    fn test_unterminated_fence_runs_to_end() {
        let html = render("intro\n```\n- code");
        assert_eq!(html, "<p>intro</p>\n<pre><code>- code</code></pre>");
    }

    #[test]
    fn test_rule_and_paragraphs() {
        let html = render("Hello **world**\n---\nBye *now*");
        assert_eq!(
            html,
            "<p>Hello <strong>world</strong></p>\n<hr/>\n<p>Bye <em>now</em></p>"
        );
    }

    #[test]
    fn test_each_text_line_is_its_own_paragraph() {
        assert_eq!(render("one\ntwo\n\n"), "<p>one</p>\n<p>two</p>");
    }

    #[test]
    fn test_inline_markup_inside_blocks() {
        let html = render("- **Term**: the `value`\n> *quoted*");
        assert_eq!(
            html,
            "<ul>\n<li><strong>Term</strong>: the <code>value</code></li>\n</ul>\n<blockquote><em>quoted</em></blockquote>"
        );
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(render("## Title\r\n- a\r\n"), "<h2>Title</h2>\n<ul>\n<li>a</li>\n</ul>");
    }

    #[test]
    fn test_render_page_escapes_title() {
        let video = VideoReference::parse("dQw4w9WgXcQ").unwrap();
        let page = render_page("Tom & <Jerry>", &video, "<p>x</p>");
        assert!(page.contains("<h1>Tom &amp; &lt;Jerry&gt;</h1>"));
        assert!(page.contains("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(page.contains("<article>\n<p>x</p>\n</article>"));
    }
}
