//! HTTP handlers for blog endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde_json::json;

use crate::adapters::blog::{render_feed, FeedChannel};
use crate::adapters::http::html::html;
use crate::adapters::http::middleware::AdminToken;
use crate::application::handlers::blog::{
    CreatePostCommand, CreatePostHandler, GetPostHandler, GetPostQuery, ListPostsHandler,
    ListPostsQuery, PostVisibility, UpdatePostCommand, UpdatePostHandler, UpdatePostResult,
};
use crate::domain::blog::{Post, PostError, PostForm};
use crate::domain::foundation::Timestamp;
use crate::ports::{MarkdownRenderer, PostRepository};

use super::dto::{PostResponse, PostSummaryResponse};

/// Feed size; older posts stay reachable from the site archive.
const FEED_ITEM_LIMIT: usize = 50;

/// Admin listing size.
const ADMIN_LIST_LIMIT: usize = 500;

#[derive(Clone)]
pub struct BlogAppState {
    pub posts: Arc<dyn PostRepository>,
    pub markdown: Arc<dyn MarkdownRenderer>,
    pub feed: FeedChannel,
    pub page_size: usize,
    pub admin: AdminToken,
}

impl BlogAppState {
    pub fn get_post_handler(&self) -> GetPostHandler {
        GetPostHandler::new(self.posts.clone())
    }

    pub fn list_posts_handler(&self) -> ListPostsHandler {
        ListPostsHandler::new(self.posts.clone())
    }

    pub fn create_post_handler(&self) -> CreatePostHandler {
        CreatePostHandler::new(self.posts.clone())
    }

    pub fn update_post_handler(&self) -> UpdatePostHandler {
        UpdatePostHandler::new(self.posts.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Public
// ════════════════════════════════════════════════════════════════════════════════

/// GET /posts - Published posts, newest first
pub async fn list_posts(
    State(state): State<BlogAppState>,
) -> Result<Json<Vec<PostSummaryResponse>>, PostApiError> {
    let posts = state
        .list_posts_handler()
        .handle(ListPostsQuery {
            take: state.page_size,
            visibility: PostVisibility::PublishedOnly,
        })
        .await?;

    Ok(Json(posts.iter().map(PostSummaryResponse::from).collect()))
}

/// GET /posts/:slug - Rendered post page
pub async fn get_post(
    State(state): State<BlogAppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, PostApiError> {
    let post = state
        .get_post_handler()
        .handle(GetPostQuery {
            slug,
            visibility: PostVisibility::PublishedOnly,
        })
        .await?;

    let body = state.markdown.render(&post.markdown);
    Ok(Html(post_page(&post, &body)))
}

/// GET /rss.xml
pub async fn rss_feed(State(state): State<BlogAppState>) -> Result<Response, PostApiError> {
    let posts = state
        .list_posts_handler()
        .handle(ListPostsQuery {
            take: FEED_ITEM_LIMIT,
            visibility: PostVisibility::PublishedOnly,
        })
        .await?;

    let xml = render_feed(&state.feed, &posts).map_err(PostError::from)?;
    Ok((
        [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
        xml,
    )
        .into_response())
}

// ════════════════════════════════════════════════════════════════════════════════
// Admin
// ════════════════════════════════════════════════════════════════════════════════

/// GET /posts/admin - Every post, drafts included
pub async fn admin_list_posts(
    State(state): State<BlogAppState>,
) -> Result<Json<Vec<PostSummaryResponse>>, PostApiError> {
    let posts = state
        .list_posts_handler()
        .handle(ListPostsQuery {
            take: ADMIN_LIST_LIMIT,
            visibility: PostVisibility::IncludeDrafts,
        })
        .await?;

    Ok(Json(posts.iter().map(PostSummaryResponse::from).collect()))
}

/// GET /posts/admin/:slug - Post source for the editor
pub async fn admin_get_post(
    State(state): State<BlogAppState>,
    Path(slug): Path<String>,
) -> Result<Json<PostResponse>, PostApiError> {
    let post = state
        .get_post_handler()
        .handle(GetPostQuery {
            slug,
            visibility: PostVisibility::IncludeDrafts,
        })
        .await?;

    Ok(Json(PostResponse::from(post)))
}

/// POST /posts/admin/new
pub async fn create_post(
    State(state): State<BlogAppState>,
    payload: Result<Json<PostForm>, JsonRejection>,
) -> Result<Redirect, PostApiError> {
    let Json(form) = payload?;

    let post = state
        .create_post_handler()
        .handle(CreatePostCommand {
            form,
            now: Timestamp::now(),
        })
        .await?;

    Ok(Redirect::to(&format!("/posts/admin/{}", post.slug)))
}

/// POST /posts/admin/:slug - Update, or delete when `_action` is `delete`
pub async fn update_post(
    State(state): State<BlogAppState>,
    Path(slug): Path<String>,
    payload: Result<Json<PostForm>, JsonRejection>,
) -> Result<Redirect, PostApiError> {
    let Json(mut form) = payload?;
    if form.slug.is_none() {
        form.slug = Some(slug);
    }

    let result = state
        .update_post_handler()
        .handle(UpdatePostCommand {
            form,
            now: Timestamp::now(),
        })
        .await?;

    Ok(match result {
        UpdatePostResult::Updated(post) => Redirect::to(&format!("/posts/admin/{}", post.slug)),
        UpdatePostResult::Deleted(_) => Redirect::to("/posts/admin"),
    })
}

fn post_page(post: &Post, body_html: &str) -> String {
    let description = post
        .description
        .as_deref()
        .map(|d| format!(r#"<meta name="description" content="{}">"#, html(d)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  {description}
</head>
<body>
  <main>
    <article>
      <h1>{title}</h1>
      {body_html}
    </article>
  </main>
</body>
</html>"#,
        title = html(&post.title),
    )
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper for blog errors.
#[derive(Debug)]
pub enum PostApiError {
    Post(PostError),
    Payload(JsonRejection),
}

impl From<PostError> for PostApiError {
    fn from(err: PostError) -> Self {
        Self::Post(err)
    }
}

impl From<JsonRejection> for PostApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Payload(rejection)
    }
}

impl IntoResponse for PostApiError {
    fn into_response(self) -> Response {
        let err = match self {
            PostApiError::Payload(rejection) => {
                return (
                    rejection.status(),
                    Json(json!({ "error": rejection.body_text() })),
                )
                    .into_response();
            }
            PostApiError::Post(err) => err,
        };

        match err {
            // The editor shows these next to each field.
            PostError::Invalid(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            PostError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Post not found" })),
            )
                .into_response(),
            PostError::AlreadyExists(slug) => (
                StatusCode::CONFLICT,
                Json(json!({ "error": format!("A post with slug \"{slug}\" already exists") })),
            )
                .into_response(),
            PostError::Storage(detail) => {
                tracing::error!(error = %detail, "Blog storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Database error" })),
                )
                    .into_response()
            }
        }
    }
}
