//! In-memory content catalog for tests.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::content::{ContentError, ProtectedContent};
use crate::domain::foundation::Slug;
use crate::ports::ContentCatalog;

#[derive(Debug, Default, Clone)]
pub struct InMemoryContentCatalog {
    entries: HashMap<String, ProtectedContent>,
}

impl InMemoryContentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, entry: ProtectedContent) -> Self {
        self.entries.insert(entry.slug.as_str().to_string(), entry);
        self
    }
}

#[async_trait]
impl ContentCatalog for InMemoryContentCatalog {
    async fn get(&self, slug: &Slug) -> Result<ProtectedContent, ContentError> {
        self.entries
            .get(slug.as_str())
            .cloned()
            .ok_or_else(|| ContentError::NotFound(slug.to_string()))
    }
}
