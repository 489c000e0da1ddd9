//! PostgreSQL implementation of PostRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::blog::Post;
use crate::domain::foundation::{DomainError, ErrorCode, PostId, Slug, Timestamp};
use crate::ports::PostRepository;

/// PostgreSQL implementation of the PostRepository port.
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a post.
#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    slug: String,
    title: String,
    markdown: String,
    description: Option<String>,
    draft: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = DomainError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let slug = Slug::parse(&row.slug).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid slug in posts: {}", e))
        })?;

        Ok(Post {
            id: PostId::from_uuid(row.id),
            slug,
            title: row.title,
            markdown: row.markdown,
            description: row.description,
            draft: row.draft,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

const SELECT_POST: &str =
    "SELECT id, slug, title, markdown, description, draft, created_at, updated_at FROM posts";

fn not_found(slug: &Slug) -> DomainError {
    DomainError::new(ErrorCode::PostNotFound, "Post not found").with_detail("slug", slug.as_str())
}

fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}

/// `LIMIT` takes a BIGINT; clamp instead of failing on absurd page sizes.
fn limit_for(take: usize) -> i64 {
    i64::try_from(take).unwrap_or(i64::MAX)
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list(&self, take: usize, include_drafts: bool) -> Result<Vec<Post>, DomainError> {
        let sql = if include_drafts {
            format!("{} ORDER BY created_at DESC LIMIT $1", SELECT_POST)
        } else {
            format!("{} WHERE NOT draft ORDER BY created_at DESC LIMIT $1", SELECT_POST)
        };
        let rows: Vec<PostRow> = sqlx::query_as(&sql)
            .bind(limit_for(take))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list posts", e))?;

        rows.into_iter().map(Post::try_from).collect()
    }

    async fn get(&self, slug: &Slug) -> Result<Option<Post>, DomainError> {
        let sql = format!("{} WHERE slug = $1", SELECT_POST);
        let row: Option<PostRow> = sqlx::query_as(&sql)
            .bind(slug.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find post", e))?;

        row.map(Post::try_from).transpose()
    }

    async fn create(&self, post: &Post) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, slug, title, markdown, description, draft, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(post.id.as_uuid())
        .bind(post.slug.as_str())
        .bind(&post.title)
        .bind(&post.markdown)
        .bind(&post.description)
        .bind(post.draft)
        .bind(post.created_at.as_datetime())
        .bind(post.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("posts_slug_key") {
                    return DomainError::new(ErrorCode::PostAlreadyExists, "Slug already in use")
                        .with_detail("slug", post.slug.as_str());
                }
            }
            db_error("create post", e)
        })?;

        Ok(())
    }

    async fn update(&self, post: &Post) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE posts SET
                title = $2,
                markdown = $3,
                description = $4,
                draft = $5,
                updated_at = $6
            WHERE slug = $1
            "#,
        )
        .bind(post.slug.as_str())
        .bind(&post.title)
        .bind(&post.markdown)
        .bind(&post.description)
        .bind(post.draft)
        .bind(post.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update post", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(&post.slug));
        }
        Ok(())
    }

    async fn delete(&self, slug: &Slug) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM posts WHERE slug = $1")
            .bind(slug.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete post", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(slug));
        }
        Ok(())
    }
}
