//! Admin authentication middleware for axum.
//!
//! The blog admin routes are guarded by a single shared token:
//!
//! ```text
//! Authorization: Bearer <admin token>
//! ```
//!
//! Comparison is constant time. When no token is configured every admin
//! request is refused.
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, routing::get, middleware};
//!
//! let admin = AdminToken::new(Some(secret));
//!
//! let app = Router::new()
//!     .route("/posts/admin/:slug", get(handler))
//!     .layer(middleware::from_fn_with_state(admin, require_admin));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use secrecy::{ExposeSecret, SecretString};

use crate::domain::membership::constant_time_compare;

/// Middleware state: the configured admin token, if any.
#[derive(Clone, Default)]
pub struct AdminToken(Option<Arc<SecretString>>);

impl AdminToken {
    pub fn new(token: Option<SecretString>) -> Self {
        Self(token.map(Arc::new))
    }

    fn accepts(&self, presented: &str) -> bool {
        match &self.0 {
            Some(expected) => {
                constant_time_compare(expected.expose_secret().as_bytes(), presented.as_bytes())
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for AdminToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AdminToken")
            .field(&self.0.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Rejects requests without the admin Bearer token.
pub async fn require_admin(
    State(admin): State<AdminToken>,
    request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) if admin.accepts(token) => next.run(request).await,
        Some(_) => {
            tracing::warn!(path = %request.uri().path(), "Rejected admin token");
            unauthorized()
        }
        None => {
            tracing::debug!(path = %request.uri().path(), "Missing admin token");
            unauthorized()
        }
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({ "error": "Unauthorized" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, middleware, routing::get, Router};
    use tower::ServiceExt;

    fn app(token: Option<&str>) -> Router {
        let admin = AdminToken::new(token.map(|t| SecretString::new(t.to_string())));
        Router::new()
            .route("/admin", get(|| async { "secret area" }))
            .layer(middleware::from_fn_with_state(admin, require_admin))
    }

    fn request(auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/admin");
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn accepts_matching_bearer_token() {
        let response = app(Some("s3cret"))
            .oneshot(request(Some("Bearer s3cret")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn rejects_wrong_token() {
        let response = app(Some("s3cret"))
            .oneshot(request(Some("Bearer guess")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn rejects_missing_header_and_other_schemes() {
        for auth in [None, Some("Basic czNjcmV0"), Some("s3cret")] {
            let response = app(Some("s3cret")).oneshot(request(auth)).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn refuses_everything_without_configured_token() {
        let response = app(None)
            .oneshot(request(Some("Bearer ")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn debug_hides_token() {
        let admin = AdminToken::new(Some(SecretString::new("s3cret".to_string())));
        assert!(!format!("{admin:?}").contains("s3cret"));
    }
}
