//! Markdown renderer port.

/// Converts markdown source to HTML safe to embed in a page.
///
/// Synchronous: rendering is CPU-only and fast for page-sized documents.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> String;
}
