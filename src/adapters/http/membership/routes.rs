//! Axum router configuration for membership endpoints.
//!
//! This module defines the route structure for the Ko-fi webhook, magic-link
//! login and member content, and wires them to their handlers.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    auth_callback, auth_status, get_content, handle_kofi_webhook, login_page, logout,
    request_magic_link, MembershipAppState,
};

/// Create the membership router.
///
/// # Routes
///
/// ## Webhook (verified by Ko-fi token)
/// - `POST /webhook` - Record a subscription payment
///
/// ## Login
/// - `GET /login` - Login page
/// - `POST /login` - Email a magic link
/// - `GET /auth/callback` - Exchange the magic-link token for a session
/// - `GET /` - Same as `/auth/callback`; some auth redirects land on the root
/// - `GET /auth/status` - Session summary
/// - `GET /logout` - Clear the session
///
/// ## Content
/// - `GET /content/:slug` - Member page or paywall
pub fn membership_routes() -> Router<MembershipAppState> {
    Router::new()
        .route("/webhook", post(handle_kofi_webhook))
        .route("/login", get(login_page).post(request_magic_link))
        .route("/auth/callback", get(auth_callback))
        .route("/", get(auth_callback))
        .route("/auth/status", get(auth_status))
        .route("/logout", get(logout))
        .route("/content/:slug", get(get_content))
}

/// Create the complete membership module router with its state applied.
pub fn membership_router(state: MembershipAppState) -> Router {
    membership_routes().with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use secrecy::SecretString;
    use tower::ServiceExt;

    use crate::adapters::auth::MockAuthProvider;
    use crate::adapters::content::InMemoryContentCatalog;
    use crate::adapters::http::membership::SiteLinks;
    use crate::adapters::markdown::PulldownRenderer;
    use crate::adapters::membership::InMemoryMemberStore;
    use crate::domain::content::ProtectedContent;
    use crate::domain::foundation::{AuthError, EmailAddress, Slug, Timestamp};
    use crate::domain::membership::{
        KofiTokenVerifier, MemberRecord, MemberTier, RedirectPath, RedirectSigner,
    };

    const KOFI_TOKEN: &str = "kofi-verification-token";
    const COOKIE_SECRET: &str = "0123456789abcdef0123456789abcdef";

    // ════════════════════════════════════════════════════════════════════════════
    // Fixtures
    // ════════════════════════════════════════════════════════════════════════════

    fn signer() -> RedirectSigner {
        RedirectSigner::new(SecretString::new(COOKIE_SECRET.to_string()))
    }

    fn member(email: &str, tier: &str, expires_in_days: i64) -> MemberRecord {
        MemberRecord {
            email: EmailAddress::parse(email).unwrap(),
            tier: MemberTier::new(tier),
            expires_at: Timestamp::now().add_days(expires_in_days),
            ko_fi_transaction_id: None,
            ko_fi_name: None,
        }
    }

    fn entry(slug: &str, required_tier: Option<&str>) -> ProtectedContent {
        ProtectedContent {
            slug: Slug::parse(slug).unwrap(),
            title: "The Playlist".to_string(),
            teaser: "A debut novel.".to_string(),
            required_tier: required_tier.map(MemberTier::new),
            body_markdown: "Chapter **one**".to_string(),
        }
    }

    struct Fixture {
        auth: Arc<MockAuthProvider>,
        store: Arc<InMemoryMemberStore>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                auth: Arc::new(
                    MockAuthProvider::new()
                        .with_test_user("member-token", "member@example.com")
                        .with_test_user("lapsed-token", "lapsed@example.com")
                        .with_test_user("reader-token", "reader@example.com"),
                ),
                store: Arc::new(
                    InMemoryMemberStore::new()
                        .with_member(member("member@example.com", "Early book club", 10))
                        .with_member(member("lapsed@example.com", "member", -1)),
                ),
            }
        }

        fn with_auth(mut self, auth: MockAuthProvider) -> Self {
            self.auth = Arc::new(auth);
            self
        }

        fn with_store(mut self, store: InMemoryMemberStore) -> Self {
            self.store = Arc::new(store);
            self
        }

        fn app(&self) -> Router {
            let catalog = InMemoryContentCatalog::new()
                .with_entry(entry("the-playlist", None))
                .with_entry(entry("survivor-notes", Some("AI-pocalypse survivor")));
            membership_router(MembershipAppState {
                auth_provider: self.auth.clone(),
                member_store: self.store.clone(),
                content_catalog: Arc::new(catalog),
                markdown: Arc::new(PulldownRenderer::new()),
                webhook_verifier: Arc::new(KofiTokenVerifier::new(SecretString::new(
                    KOFI_TOKEN.to_string(),
                ))),
                redirect_signer: signer(),
                links: SiteLinks {
                    site_url: "https://tamm.in".to_string(),
                    api_url: "https://api.tamm.in".to_string(),
                    tiers_url: "https://ko-fi.com/tigresstamm/tiers".to_string(),
                },
            })
        }
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap()
    }

    fn webhook(form_body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/webhook")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form_body))
            .unwrap()
    }

    fn kofi_form(token: &str, event_type: &str, subscription: bool) -> String {
        let data = serde_json::json!({
            "verification_token": token,
            "type": event_type,
            "email": "New.Member@Example.com",
            "from_name": "New Member",
            "kofi_transaction_id": "txn-1",
            "is_subscription_payment": subscription,
            "tier_name": "Early book club",
        });
        format!("data={}", urlencoding::encode(&data.to_string()))
    }

    fn login(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn set_cookies(response: &axum::response::Response) -> Vec<String> {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Webhook
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn webhook_records_subscription() {
        let fixture = Fixture::new();
        let response = fixture
            .app()
            .oneshot(webhook(kofi_form(KOFI_TOKEN, "Subscription", true)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "OK");

        let stored = fixture
            .store
            .get(&EmailAddress::parse("new.member@example.com").unwrap())
            .unwrap();
        assert_eq!(stored.tier.as_str(), "Early book club");
    }

    #[tokio::test]
    async fn webhook_ignores_donations() {
        let response = Fixture::new()
            .app()
            .oneshot(webhook(kofi_form(KOFI_TOKEN, "Donation", false)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "OK - ignored");
    }

    #[tokio::test]
    async fn webhook_rejects_wrong_token() {
        let response = Fixture::new()
            .app()
            .oneshot(webhook(kofi_form("forged", "Subscription", true)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_string(response).await, "Unauthorized");
    }

    #[tokio::test]
    async fn webhook_without_data_field_is_bad_request() {
        let response = Fixture::new()
            .app()
            .oneshot(webhook("other=1".to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(response).await, "Missing data field");
    }

    #[tokio::test]
    async fn webhook_with_garbage_json_is_bad_request() {
        let response = Fixture::new()
            .app()
            .oneshot(webhook("data=%7Bnot-json".to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(response).await, "Invalid payload");
    }

    #[tokio::test]
    async fn webhook_store_failure_is_database_error() {
        let fixture = Fixture::new().with_store(InMemoryMemberStore::new().failing_writes());
        let response = fixture
            .app()
            .oneshot(webhook(kofi_form(KOFI_TOKEN, "Subscription", true)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(response).await, "Database error");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Login
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn login_page_renders_form() {
        let response = Fixture::new()
            .app()
            .oneshot(get("/login?redirect=/content/the-playlist"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("Send Magic Link"));
        assert!(body.contains(r#"const redirect = "/content/the-playlist";"#));
    }

    #[tokio::test]
    async fn login_sends_link_and_sets_signed_redirect() {
        let fixture = Fixture::new();
        let response = fixture
            .app()
            .oneshot(login(
                r#"{"email":"Member@Example.com","redirect":"/content/the-playlist"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookies = set_cookies(&response);
        assert_eq!(body_string(response).await, r#"{"success":true}"#);

        let sent = fixture.auth.sent_links();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].email.as_str(), "member@example.com");
        assert_eq!(sent[0].redirect_to, "https://api.tamm.in/auth/callback");

        let expected = signer()
            .sign(&RedirectPath::parse("/content/the-playlist").unwrap())
            .unwrap();
        assert_eq!(cookies.len(), 1);
        assert!(cookies[0].starts_with(&format!("tamm_redirect={expected};")));
        assert!(cookies[0].ends_with("Max-Age=600"));
    }

    #[tokio::test]
    async fn login_drops_offsite_redirect() {
        let response = Fixture::new()
            .app()
            .oneshot(login(
                r#"{"email":"member@example.com","redirect":"//evil.example"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(set_cookies(&response).is_empty());
    }

    #[tokio::test]
    async fn login_rejects_email_without_at_sign() {
        let response = Fixture::new()
            .app()
            .oneshot(login(r#"{"email":"not-an-email"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(response).await, r#"{"error":"Invalid email"}"#);
    }

    #[tokio::test]
    async fn login_refuses_non_members() {
        let fixture = Fixture::new();
        let response = fixture
            .app()
            .oneshot(login(r#"{"email":"lapsed@example.com"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = body_string(response).await;
        assert!(body.contains("No active membership found for this email."));
        assert!(fixture.auth.sent_links().is_empty());
    }

    #[tokio::test]
    async fn login_reports_provider_failure() {
        let fixture = Fixture::new().with_auth(
            MockAuthProvider::new()
                .with_send_error(AuthError::MagicLinkRejected("rate limited".to_string())),
        );
        let response = fixture
            .app()
            .oneshot(login(r#"{"email":"member@example.com"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_string(response).await,
            r#"{"error":"Failed to send magic link"}"#
        );
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Callback, status, logout
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn callback_without_token_serves_fragment_page() {
        for uri in ["/auth/callback", "/"] {
            let response = Fixture::new().app().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert!(body_string(response).await.contains("Completing login..."));
        }
    }

    #[tokio::test]
    async fn callback_sets_session_and_follows_signed_redirect() {
        let signed = signer()
            .sign(&RedirectPath::parse("/content/the-playlist").unwrap())
            .unwrap();
        let response = Fixture::new()
            .app()
            .oneshot(get_with_cookie(
                "/auth/callback?access_token=member-token",
                &format!("tamm_redirect={signed}"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://tamm.in/content/the-playlist"
        );
        let cookies = set_cookies(&response);
        assert!(cookies.iter().any(|c| c.starts_with("tamm_session=member-token;")
            && c.ends_with("Max-Age=2592000")));
        assert!(cookies.iter().any(|c| c.starts_with("tamm_redirect=;")
            && c.ends_with("Max-Age=0")));
    }

    #[tokio::test]
    async fn callback_ignores_tampered_redirect() {
        let response = Fixture::new()
            .app()
            .oneshot(get_with_cookie(
                "/?access_token=member-token",
                "tamm_redirect=%2Fadmin.deadbeef",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "https://tamm.in");
    }

    #[tokio::test]
    async fn callback_rejects_unknown_token() {
        let response = Fixture::new()
            .app()
            .oneshot(get("/auth/callback?access_token=bogus"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_string(response).await, "Invalid token");
    }

    #[tokio::test]
    async fn status_without_cookie_is_anonymous() {
        let response = Fixture::new().app().oneshot(get("/auth/status")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, r#"{"authenticated":false}"#);
    }

    #[tokio::test]
    async fn status_reports_membership() {
        let response = Fixture::new()
            .app()
            .oneshot(get_with_cookie("/auth/status", "tamm_session=member-token"))
            .await
            .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["authenticated"], true);
        assert_eq!(json["email"], "member@example.com");
        assert_eq!(json["isMember"], true);
        assert_eq!(json["tier"], "Early book club");
        assert!(json["expiresAt"].is_string());
    }

    #[tokio::test]
    async fn status_for_lapsed_member_has_null_tier() {
        let response = Fixture::new()
            .app()
            .oneshot(get_with_cookie("/auth/status", "tamm_session=lapsed-token"))
            .await
            .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["authenticated"], true);
        assert_eq!(json["isMember"], false);
        assert!(json["tier"].is_null());
        assert!(json["expiresAt"].is_null());
    }

    #[tokio::test]
    async fn logout_clears_session() {
        let response = Fixture::new().app().oneshot(get("/logout")).await.unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "https://tamm.in");
        let cookies = set_cookies(&response);
        assert_eq!(
            cookies,
            vec!["tamm_session=; Path=/; HttpOnly; Secure; SameSite=Lax; Max-Age=0".to_string()]
        );
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Content
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn member_sees_content() {
        let response = Fixture::new()
            .app()
            .oneshot(get_with_cookie("/content/the-playlist", "tamm_session=member-token"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_SECURITY_POLICY],
            "frame-ancestors https://tamm.in"
        );
        assert!(body_string(response).await.contains("<strong>one</strong>"));
    }

    #[tokio::test]
    async fn anonymous_visitor_gets_paywall() {
        let response = Fixture::new()
            .app()
            .oneshot(get("/content/the-playlist"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers()[header::X_FRAME_OPTIONS],
            "ALLOW-FROM https://tamm.in"
        );
        let body = body_string(response).await;
        assert!(body.contains("Already a member? Login"));
        assert!(!body.contains("<strong>one</strong>"));
    }

    #[tokio::test]
    async fn lapsed_member_paywall_names_email() {
        let response = Fixture::new()
            .app()
            .oneshot(get_with_cookie("/content/the-playlist", "tamm_session=lapsed-token"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_string(response)
            .await
            .contains("Your membership for lapsed@example.com has expired or is inactive."));
    }

    #[tokio::test]
    async fn lower_tier_member_gets_paywall_for_higher_tier_content() {
        let response = Fixture::new()
            .app()
            .oneshot(get_with_cookie("/content/survivor-notes", "tamm_session=member-token"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_string(response).await.contains("AI-pocalypse survivor"));
    }

    #[tokio::test]
    async fn invalid_token_gets_paywall() {
        let response = Fixture::new()
            .app()
            .oneshot(get_with_cookie("/content/the-playlist", "tamm_session=expired"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unknown_and_malformed_slugs_are_not_found() {
        let unknown = Fixture::new().app().oneshot(get("/content/nope")).await.unwrap();
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(unknown).await, "Content not found");

        let malformed = Fixture::new()
            .app()
            .oneshot(get("/content/Bad_Slug"))
            .await
            .unwrap();
        assert_eq!(malformed.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(malformed).await, "Not found");
    }
}
