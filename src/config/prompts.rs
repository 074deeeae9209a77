//! Prompt templates for yt-article.
//!
//! Templates use `{{name}}` placeholders and are compiled in; they are not
//! loaded from the configuration file.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("Invalid regex"));

/// Collection of all prompt templates.
#[derive(Debug, Clone)]
pub struct Prompts {
    /// Single-pass: transcript straight to article.
    pub single_pass: String,
    /// Two-pass, pass 1: transcript to outline.
    pub outline: String,
    /// Two-pass, pass 2: outline to article.
    pub article: String,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            single_pass: r###"You are a professional editor. Rewrite this YouTube video transcript as a well-structured, readable article.

Video Title: "{{title}}"

GUIDELINES:
- Write flowing prose; this is an article, not a verbatim transcript
- Organize the content with H2 (##) section headings and H3 (###) subheadings
- Extract bullet points where they make a list of ideas easier to scan
- Bold key terms and concepts
- Remove filler words, false starts, repetition, and sponsor or subscribe requests
- End with a "## Glossary" section defining 5-10 key terms from the content

FORMATTING:
- Use clean Markdown
- Do NOT include any meta-commentary like "Here is the article" - output ONLY the article

Transcript:
{{transcript}}"###
                .to_string(),

            outline: r###"You are an expert content analyst. Analyze this YouTube video transcript and extract a detailed outline.

Video Title: "{{title}}"

Return a structured outline in this EXACT format:

## Main Topic
[One sentence describing the core subject]

## Key Sections
1. [Section title] - [2-3 sentence summary of what's covered]
2. [Section title] - [2-3 sentence summary]
3. [Continue for all major sections...]

## Key Quotes
- "[Exact notable quote from transcript]"
- "[Another key quote]"
- [List 3-5 most impactful quotes]

## Key Concepts & Terms
- **[Term]**: [Brief definition or context]
- [List 5-10 important concepts mentioned]

## Main Takeaways
1. [Key takeaway 1]
2. [Key takeaway 2]
3. [List 3-7 takeaways]

IMPORTANT: Be thorough. Capture ALL major topics discussed. Do not add commentary - just extract and organize.

Transcript:
{{transcript}}"###
                .to_string(),

            article: r###"You are a professional journalist and editor. Using the outline below, write a polished, publication-ready article.

Article Title: "{{title}}"

WRITING GUIDELINES:
- Write in clear, engaging, professional prose
- Use a compelling opening paragraph that hooks the reader
- Organize with H2 (##) section headings and H3 (###) subheadings where appropriate
- Write smooth transitions between sections so the article flows naturally
- Integrate key quotes using blockquotes (> format)
- Use bullet points and numbered lists where they improve clarity
- Bold important terms and concepts on first mention
- Add context and background where the speaker assumed prior knowledge
- End with a strong concluding section that ties everything together
- After the conclusion, add a "## Key Takeaways" section with the most important points as a bullet list
- Finally, add a "## Glossary" section defining 5-10 key terms from the content

FORMATTING:
- Use clean Markdown
- Do NOT include any meta-commentary like "Here is the article" - output ONLY the article
- Do NOT repeat the title as an H1 - start directly with the opening paragraph

OUTLINE TO EXPAND:
{{outline}}"###
                .to_string(),
        }
    }
}

impl Prompts {
    /// Render a prompt template with the given variables.
    ///
    /// Placeholders are substituted in one pass over the template, so text
    /// inside a substituted value is never expanded again. Unknown
    /// placeholders are left as they are.
    pub fn render(template: &str, vars: &HashMap<&str, &str>) -> String {
        PLACEHOLDER
            .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}
