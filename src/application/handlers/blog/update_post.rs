//! UpdatePostHandler - Command handler for the admin edit form.
//!
//! The edit form also carries the delete button, so one submission either
//! updates or deletes depending on `_action`.

use std::sync::Arc;

use crate::domain::blog::{Post, PostError, PostForm};
use crate::domain::foundation::{Slug, Timestamp};
use crate::ports::PostRepository;

#[derive(Debug, Clone)]
pub struct UpdatePostCommand {
    pub form: PostForm,
    pub now: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdatePostResult {
    Updated(Post),
    Deleted(Slug),
}

pub struct UpdatePostHandler {
    repository: Arc<dyn PostRepository>,
}

impl UpdatePostHandler {
    pub fn new(repository: Arc<dyn PostRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdatePostCommand) -> Result<UpdatePostResult, PostError> {
        if cmd.form.is_delete() {
            let delete = cmd.form.validate_delete().map_err(PostError::Invalid)?;
            self.repository.delete(&delete.slug).await?;
            tracing::info!(slug = %delete.slug, "Post deleted");
            return Ok(UpdatePostResult::Deleted(delete.slug));
        }

        let input = cmd.form.validate().map_err(PostError::Invalid)?;
        let mut post = self
            .repository
            .get(&input.slug)
            .await?
            .ok_or_else(|| PostError::NotFound(input.slug.to_string()))?;

        post.apply(input, cmd.now);
        self.repository.update(&post).await?;

        tracing::info!(slug = %post.slug, "Post updated");
        Ok(UpdatePostResult::Updated(post))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::blog::InMemoryPostRepository;
    use crate::domain::blog::PostInput;

    fn existing(slug: &str) -> Post {
        Post::create(
            PostInput {
                slug: Slug::parse(slug).unwrap(),
                title: "Original".to_string(),
                markdown: "old".to_string(),
                description: None,
                draft: false,
            },
            Timestamp::now().add_days(-1),
        )
    }

    fn edit(slug: &str, title: &str) -> PostForm {
        PostForm {
            title: Some(title.to_string()),
            slug: Some(slug.to_string()),
            markdown: Some("new".to_string()),
            ..PostForm::default()
        }
    }

    #[tokio::test]
    async fn updates_existing_post() {
        let repo = Arc::new(InMemoryPostRepository::new().with_post(existing("hello")));
        let handler = UpdatePostHandler::new(repo.clone());

        let result = handler
            .handle(UpdatePostCommand {
                form: edit("hello", "Edited"),
                now: Timestamp::now(),
            })
            .await
            .unwrap();

        assert!(matches!(result, UpdatePostResult::Updated(ref p) if p.title == "Edited"));
        let stored = repo.get(&Slug::parse("hello").unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.markdown, "new");
    }

    #[tokio::test]
    async fn update_of_missing_post_is_not_found() {
        let handler = UpdatePostHandler::new(Arc::new(InMemoryPostRepository::new()));

        let err = handler
            .handle(UpdatePostCommand {
                form: edit("ghost", "Edited"),
                now: Timestamp::now(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, PostError::NotFound("ghost".to_string()));
    }

    #[tokio::test]
    async fn delete_action_removes_post() {
        let repo = Arc::new(InMemoryPostRepository::new().with_post(existing("hello")));
        let handler = UpdatePostHandler::new(repo.clone());

        let result = handler
            .handle(UpdatePostCommand {
                form: PostForm {
                    action: Some("delete".to_string()),
                    slug: Some("hello".to_string()),
                    ..PostForm::default()
                },
                now: Timestamp::now(),
            })
            .await
            .unwrap();

        assert_eq!(result, UpdatePostResult::Deleted(Slug::parse("hello").unwrap()));
        assert!(repo.list(10, true).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_without_slug_reports_slug_error_only() {
        let handler = UpdatePostHandler::new(Arc::new(InMemoryPostRepository::new()));

        let err = handler
            .handle(UpdatePostCommand {
                form: PostForm {
                    action: Some("delete".to_string()),
                    ..PostForm::default()
                },
                now: Timestamp::now(),
            })
            .await
            .unwrap_err();

        match err {
            PostError::Invalid(errors) => {
                assert!(errors.slug.is_some());
                assert!(errors.title.is_none());
                assert!(errors.markdown.is_none());
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
