//! Blog post queries.

use std::sync::Arc;

use crate::domain::blog::{Post, PostError};
use crate::domain::foundation::Slug;
use crate::ports::PostRepository;

/// Which posts a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostVisibility {
    PublishedOnly,
    IncludeDrafts,
}

impl PostVisibility {
    fn allows(self, post: &Post) -> bool {
        match self {
            PostVisibility::PublishedOnly => post.is_published(),
            PostVisibility::IncludeDrafts => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GetPostQuery {
    /// Raw path segment; an invalid slug is simply not found.
    pub slug: String,
    pub visibility: PostVisibility,
}

pub struct GetPostHandler {
    repository: Arc<dyn PostRepository>,
}

impl GetPostHandler {
    pub fn new(repository: Arc<dyn PostRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetPostQuery) -> Result<Post, PostError> {
        let slug =
            Slug::parse(&query.slug).map_err(|_| PostError::NotFound(query.slug.clone()))?;

        self.repository
            .get(&slug)
            .await?
            .filter(|post| query.visibility.allows(post))
            .ok_or_else(|| PostError::NotFound(query.slug))
    }
}

#[derive(Debug, Clone)]
pub struct ListPostsQuery {
    pub take: usize,
    pub visibility: PostVisibility,
}

pub struct ListPostsHandler {
    repository: Arc<dyn PostRepository>,
}

impl ListPostsHandler {
    pub fn new(repository: Arc<dyn PostRepository>) -> Self {
        Self { repository }
    }

    /// Newest first, at most `take` posts the caller may see.
    pub async fn handle(&self, query: ListPostsQuery) -> Result<Vec<Post>, PostError> {
        let include_drafts = query.visibility == PostVisibility::IncludeDrafts;
        Ok(self.repository.list(query.take, include_drafts).await?)
    }
}
