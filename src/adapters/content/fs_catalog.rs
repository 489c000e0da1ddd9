//! Filesystem content catalog.
//!
//! Each member-only page is a markdown file named `<slug>.md` in the content
//! directory, starting with a YAML front matter block:
//!
//! ```text
//! ---
//! title: Prompting for Survivors
//! teaser: A field guide to getting useful answers out of chatbots.
//! required_tier: AI-pocalypse survivor
//! ---
//! # Body markdown...
//! ```

use async_trait::async_trait;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::content::{ContentError, ProtectedContent};
use crate::domain::foundation::Slug;
use crate::domain::membership::MemberTier;
use crate::ports::ContentCatalog;

const FRONT_MATTER_FENCE: &str = "---";

#[derive(Debug, Deserialize)]
struct FrontMatter {
    title: String,
    #[serde(default)]
    teaser: String,
    #[serde(default)]
    required_tier: Option<String>,
}

/// Reads entries from `{dir}/{slug}.md` on every request.
#[derive(Debug, Clone)]
pub struct FsContentCatalog {
    dir: PathBuf,
}

impl FsContentCatalog {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn entry_path(&self, slug: &Slug) -> PathBuf {
        // Slug is restricted to [a-z0-9-], so it cannot escape the directory.
        self.dir.join(format!("{}.md", slug.as_str()))
    }
}

/// Splits a document into its front matter and body.
fn split_front_matter(source: &str) -> Option<(&str, &str)> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let rest = source.strip_prefix(FRONT_MATTER_FENCE)?;
    let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONT_MATTER_FENCE {
            let front = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((front, body));
        }
        offset += line.len();
    }
    None
}

pub(crate) fn parse_entry(slug: Slug, source: &str) -> Result<ProtectedContent, ContentError> {
    let (front, body) = split_front_matter(source).ok_or_else(|| {
        ContentError::Unavailable(format!("{}: missing front matter", slug.as_str()))
    })?;

    let meta: FrontMatter = serde_yaml::from_str(front)
        .map_err(|e| ContentError::Unavailable(format!("{}: {}", slug.as_str(), e)))?;

    Ok(ProtectedContent {
        slug,
        title: meta.title,
        teaser: meta.teaser,
        required_tier: meta
            .required_tier
            .filter(|t| !t.trim().is_empty())
            .map(MemberTier::new),
        body_markdown: body.trim_start_matches(['\r', '\n']).to_string(),
    })
}

#[async_trait]
impl ContentCatalog for FsContentCatalog {
    async fn get(&self, slug: &Slug) -> Result<ProtectedContent, ContentError> {
        let path = self.entry_path(slug);
        let source = match fs::read_to_string(&path).await {
            Ok(source) => source,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ContentError::NotFound(slug.to_string()))
            }
            Err(e) => {
                return Err(ContentError::Unavailable(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        parse_entry(slug.clone(), &source)
    }
}
