//! In-memory PostRepository for tests and database-less development.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::blog::Post;
use crate::domain::foundation::{DomainError, ErrorCode, Slug};
use crate::ports::PostRepository;

#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_post(self, post: Post) -> Self {
        self.posts.write().unwrap().push(post);
        self
    }

    fn not_found(slug: &Slug) -> DomainError {
        DomainError::new(ErrorCode::PostNotFound, "Post not found")
            .with_detail("slug", slug.as_str())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self, take: usize, include_drafts: bool) -> Result<Vec<Post>, DomainError> {
        let mut posts = self.posts.read().unwrap().clone();
        posts.retain(|p| include_drafts || p.is_published());
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts.truncate(take);
        Ok(posts)
    }

    async fn get(&self, slug: &Slug) -> Result<Option<Post>, DomainError> {
        Ok(self
            .posts
            .read()
            .unwrap()
            .iter()
            .find(|p| &p.slug == slug)
            .cloned())
    }

    async fn create(&self, post: &Post) -> Result<(), DomainError> {
        let mut posts = self.posts.write().unwrap();
        if posts.iter().any(|p| p.slug == post.slug) {
            return Err(DomainError::new(ErrorCode::PostAlreadyExists, "Slug already in use")
                .with_detail("slug", post.slug.as_str()));
        }
        posts.push(post.clone());
        Ok(())
    }

    async fn update(&self, post: &Post) -> Result<(), DomainError> {
        let mut posts = self.posts.write().unwrap();
        let existing = posts
            .iter_mut()
            .find(|p| p.slug == post.slug)
            .ok_or_else(|| Self::not_found(&post.slug))?;
        existing.title = post.title.clone();
        existing.markdown = post.markdown.clone();
        existing.description = post.description.clone();
        existing.draft = post.draft;
        existing.updated_at = post.updated_at;
        Ok(())
    }

    async fn delete(&self, slug: &Slug) -> Result<(), DomainError> {
        let mut posts = self.posts.write().unwrap();
        let before = posts.len();
        posts.retain(|p| &p.slug != slug);
        if posts.len() == before {
            return Err(Self::not_found(slug));
        }
        Ok(())
    }
}
