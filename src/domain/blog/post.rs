//! Blog post entity.

use crate::domain::foundation::{PostId, Slug, Timestamp};

/// A stored blog post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub slug: Slug,
    pub title: String,
    pub markdown: String,
    pub description: Option<String>,
    pub draft: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Post {
    /// New post from validated input, stamped `now`.
    pub fn create(input: PostInput, now: Timestamp) -> Self {
        Self {
            id: PostId::new(),
            slug: input.slug,
            title: input.title,
            markdown: input.markdown,
            description: input.description,
            draft: input.draft,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies an edit. The slug is the lookup key and is left unchanged.
    pub fn apply(&mut self, input: PostInput, now: Timestamp) {
        self.title = input.title;
        self.markdown = input.markdown;
        self.description = input.description;
        self.draft = input.draft;
        self.updated_at = now;
    }

    pub fn is_published(&self) -> bool {
        !self.draft
    }
}

/// Validated create/update payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostInput {
    pub slug: Slug,
    pub title: String,
    pub markdown: String,
    pub description: Option<String>,
    pub draft: bool,
}
