//! Axum router configuration for blog endpoints.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::adapters::http::middleware::require_admin;

use super::handlers::{
    admin_get_post, admin_list_posts, create_post, get_post, list_posts, rss_feed, update_post,
    BlogAppState,
};

/// Create the blog router.
///
/// # Routes
///
/// ## Public
/// - `GET /posts` - Published posts, newest first
/// - `GET /posts/:slug` - Rendered post
/// - `GET /rss.xml` - RSS 2.0 feed
///
/// ## Admin (Bearer admin token)
/// - `GET /posts/admin` - All posts, drafts included
/// - `POST /posts/admin/new` - Create, 303 to the editor
/// - `GET /posts/admin/:slug` - Post source
/// - `POST /posts/admin/:slug` - Update or delete, 303 to the editor or listing
pub fn blog_routes(state: &BlogAppState) -> Router<BlogAppState> {
    let admin = Router::new()
        .route("/posts/admin", get(admin_list_posts))
        .route("/posts/admin/new", post(create_post))
        .route(
            "/posts/admin/:slug",
            get(admin_get_post).post(update_post),
        )
        .route_layer(middleware::from_fn_with_state(
            state.admin.clone(),
            require_admin,
        ));

    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/:slug", get(get_post))
        .route("/rss.xml", get(rss_feed))
        .merge(admin)
}

/// Create the complete blog module router with its state applied.
pub fn blog_router(state: BlogAppState) -> Router {
    blog_routes(&state).with_state(state)
}
