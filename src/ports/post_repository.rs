//! Blog post repository port.
//!
//! Plain CRUD keyed on slug.

use async_trait::async_trait;

use crate::domain::blog::Post;
use crate::domain::foundation::{DomainError, Slug};

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Up to `take` posts, newest first. Drafts are skipped before the limit
    /// unless `include_drafts` is set.
    async fn list(&self, take: usize, include_drafts: bool) -> Result<Vec<Post>, DomainError>;

    async fn get(&self, slug: &Slug) -> Result<Option<Post>, DomainError>;

    /// # Errors
    ///
    /// - `PostAlreadyExists` if the slug is taken
    async fn create(&self, post: &Post) -> Result<(), DomainError>;

    /// Overwrites the post stored under `post.slug`.
    ///
    /// # Errors
    ///
    /// - `PostNotFound` if no post has that slug
    async fn update(&self, post: &Post) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `PostNotFound` if no post has that slug
    async fn delete(&self, slug: &Slug) -> Result<(), DomainError>;
}
