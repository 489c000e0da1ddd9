//! Top-level router: module routers plus the cross-cutting layers.

use std::time::Duration;

use axum::{extract::Request, routing::get, Json, Router};
use http::{header, HeaderValue, Method, StatusCode};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Level;

use super::blog::{blog_router, BlogAppState};
use super::membership::{membership_router, MembershipAppState};

/// Settings for the layers wrapped around every route.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// The only origin allowed to make credentialed cross-origin calls.
    pub allowed_origin: String,
    pub request_timeout: Duration,
}

/// Build the full application router.
///
/// Blog routes are mounted only when `blog` is provided, i.e. when a database
/// is configured.
///
/// # Errors
///
/// Fails if `allowed_origin` cannot be used as a header value.
pub fn app_router(
    membership: MembershipAppState,
    blog: Option<BlogAppState>,
    settings: &HttpSettings,
) -> Result<Router, header::InvalidHeaderValue> {
    let origin = HeaderValue::from_str(&settings.allowed_origin)?;

    let mut router = Router::new()
        .route("/health", get(health))
        .merge(membership_router(membership));
    if let Some(blog) = blog {
        router = router.merge(blog_router(blog));
    }

    Ok(router
        .fallback(not_found)
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE])
                .allow_credentials(true),
        )
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        ))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}
