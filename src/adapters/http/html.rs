//! Escaping for server-rendered pages.

use std::borrow::Cow;

/// Escape text for HTML element content or a quoted attribute.
pub fn html(raw: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(raw)
}

/// A JavaScript string literal that is safe inside a `<script>` element.
pub fn js_string(raw: &str) -> String {
    serde_json::to_string(raw)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}
