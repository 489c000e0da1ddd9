//! Markdown to HTML using pulldown-cmark.
//!
//! Post and member-page bodies are authored by the site owner but rendered
//! into pages served with the session cookie in scope, so the output is
//! restricted:
//!
//! - raw HTML in the source is escaped and shown as text
//! - `javascript:`, `data:` and `vbscript:` link/image targets become `#`
//! - fenced code gets `class="hljs language-<lang>"` for client-side
//!   highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag};

use crate::ports::MarkdownRenderer;

const BLOCKED_SCHEMES: &[&str] = &["javascript:", "data:", "vbscript:"];

/// pulldown-cmark backed [`MarkdownRenderer`].
#[derive(Debug, Clone, Default)]
pub struct PulldownRenderer;

impl PulldownRenderer {
    pub fn new() -> Self {
        Self
    }

    fn options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
    }
}

impl MarkdownRenderer for PulldownRenderer {
    fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, Self::options()).map(sanitize_event);

        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, parser);
        output
    }
}

fn sanitize_event(event: Event<'_>) -> Event<'_> {
    match event {
        // Raw HTML is shown, not interpreted.
        Event::Html(raw) => Event::Text(raw),
        Event::Start(Tag::Link(kind, dest, title)) => {
            Event::Start(Tag::Link(kind, safe_url(dest), title))
        }
        Event::Start(Tag::Image(kind, dest, title)) => {
            Event::Start(Tag::Image(kind, safe_url(dest), title))
        }
        Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
            Event::Html(code_block_open(&info).into())
        }
        Event::End(Tag::CodeBlock(CodeBlockKind::Fenced(_))) => {
            Event::Html("</code></pre>\n".into())
        }
        other => other,
    }
}

fn code_block_open(info: &str) -> String {
    let lang: String = info
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+'))
        .collect();

    if lang.is_empty() {
        "<pre><code class=\"hljs\">".to_string()
    } else {
        format!("<pre><code class=\"hljs language-{}\">", lang)
    }
}

fn safe_url(dest: CowStr<'_>) -> CowStr<'_> {
    if is_blocked_url(&dest) {
        CowStr::Borrowed("#")
    } else {
        dest
    }
}

/// Browsers ignore embedded whitespace and control characters in the
/// scheme, so they are stripped before matching.
fn is_blocked_url(url: &str) -> bool {
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();
    BLOCKED_SCHEMES.iter().any(|scheme| normalized.starts_with(scheme))
}
