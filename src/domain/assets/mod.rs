//! Assets module - Cache-busting rules for built static files.
//!
//! Paths here are always `/`-separated and relative to the dist directory.

use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

/// Number of hex characters of the content hash kept in file names.
pub const HASH_LEN: usize = 8;

static HASH_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^qrc-logo\.webp$",
        r"^tamm-portrait\.webp$",
        r"^og/.*-\d+w\.webp$",
        r"^og/.*\.webp$",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

// OG PNGs are referenced from social meta tags and need stable URLs.
static SKIP_PATTERNS: Lazy<Vec<Regex>> =
    Lazy::new(|| [r"^og/.*\.png$"].iter().filter_map(|p| Regex::new(p).ok()).collect());

/// A completed rename, both sides relative to the dist directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRename {
    pub from: String,
    pub to: String,
}

/// Whether a dist-relative path gets a content hash. Skip patterns win.
pub fn should_hash(relative_path: &str) -> bool {
    if SKIP_PATTERNS.iter().any(|p| p.is_match(relative_path)) {
        return false;
    }
    HASH_PATTERNS.iter().any(|p| p.is_match(relative_path))
}

/// First [`HASH_LEN`] hex characters of the SHA-256 of `content`.
pub fn content_hash(content: &[u8]) -> String {
    let digest = hex::encode(Sha256::digest(content));
    digest[..HASH_LEN].to_string()
}

/// `og/card.webp` + `abcd1234` → `og/card.abcd1234.webp`.
pub fn hashed_path(relative_path: &str, hash: &str) -> String {
    let (dir, file) = match relative_path.rsplit_once('/') {
        Some((dir, file)) => (Some(dir), file),
        None => (None, relative_path),
    };
    let hashed_file = match file.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{}.{}.{}", stem, hash, ext),
        _ => format!("{}.{}", file, hash),
    };
    match dir {
        Some(dir) => format!("{}/{}", dir, hashed_file),
        None => hashed_file,
    }
}

/// Rewrites `/from` and `"from"` references. Returns `None` when nothing
/// changed.
pub fn rewrite_references(html: &str, renames: &[AssetRename]) -> Option<String> {
    let mut content = html.to_string();
    let mut modified = false;

    for rename in renames {
        let pairs = [
            (format!("/{}", rename.from), format!("/{}", rename.to)),
            (format!("\"{}\"", rename.from), format!("\"{}\"", rename.to)),
        ];
        for (from, to) in pairs {
            if content.contains(&from) {
                content = content.replace(&from, &to);
                modified = true;
            }
        }
    }

    modified.then_some(content)
}
