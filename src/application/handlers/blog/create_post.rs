//! CreatePostHandler - Command handler for new blog posts.

use std::sync::Arc;

use crate::domain::blog::{Post, PostError, PostForm};
use crate::domain::foundation::Timestamp;
use crate::ports::PostRepository;

#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub form: PostForm,
    pub now: Timestamp,
}

pub struct CreatePostHandler {
    repository: Arc<dyn PostRepository>,
}

impl CreatePostHandler {
    pub fn new(repository: Arc<dyn PostRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreatePostCommand) -> Result<Post, PostError> {
        let input = cmd.form.validate().map_err(PostError::Invalid)?;
        let post = Post::create(input, cmd.now);

        self.repository.create(&post).await?;

        tracing::info!(slug = %post.slug, "Post created");
        Ok(post)
    }
}
