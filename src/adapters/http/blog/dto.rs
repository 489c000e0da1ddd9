//! HTTP DTOs for blog endpoints.

use serde::Serialize;

use crate::domain::blog::Post;

/// A row in the post listings.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostSummaryResponse {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub draft: bool,
    pub created_at: String,
}

impl From<&Post> for PostSummaryResponse {
    fn from(post: &Post) -> Self {
        Self {
            slug: post.slug.as_str().to_string(),
            title: post.title.clone(),
            description: post.description.clone(),
            draft: post.draft,
            created_at: post.created_at.to_iso_string(),
        }
    }
}

/// Full post for the admin editor, markdown source included.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub markdown: String,
    pub description: Option<String>,
    pub draft: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            slug: post.slug.as_str().to_string(),
            title: post.title,
            markdown: post.markdown,
            description: post.description,
            draft: post.draft,
            created_at: post.created_at.to_iso_string(),
            updated_at: post.updated_at.to_iso_string(),
        }
    }
}
