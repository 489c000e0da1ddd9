//! HTTP handlers for membership endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::{Form, Json, Path, Query, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use crate::adapters::http::cookies::{self, REDIRECT_COOKIE, SESSION_COOKIE};
use crate::application::handlers::membership::{
    AccessContentHandler, AccessContentQuery, CompleteLoginCommand, CompleteLoginHandler,
    GetAuthStatusHandler, GetAuthStatusQuery, HandleKofiWebhookCommand, HandleKofiWebhookHandler,
    HandleKofiWebhookResult, RequestMagicLinkCommand, RequestMagicLinkHandler,
};
use crate::config::{KofiConfig, SiteConfig};
use crate::domain::content::{AccessDecision, ContentError};
use crate::domain::foundation::Timestamp;
use crate::domain::membership::{KofiTokenVerifier, MembershipError, RedirectSigner};
use crate::ports::{AuthProvider, ContentCatalog, MarkdownRenderer, MemberStore};

use super::dto::{
    AuthStatusResponse, CallbackQuery, ErrorResponse, KofiWebhookForm, LoginPageQuery,
    MagicLinkRequest, MagicLinkResponse,
};
use super::views;

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Public URLs the membership pages link and redirect to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLinks {
    /// Main site origin, no trailing slash. Login redirects land here.
    pub site_url: String,
    /// This service's public origin, no trailing slash.
    pub api_url: String,
    /// Where non-members can subscribe.
    pub tiers_url: String,
}

impl SiteLinks {
    pub fn from_config(site: &SiteConfig, kofi: &KofiConfig) -> Self {
        Self {
            site_url: site.site_origin().to_string(),
            api_url: site.api_origin().to_string(),
            tiers_url: kofi.tiers_url.clone(),
        }
    }

    /// Target of the emailed magic link.
    pub fn callback_url(&self) -> String {
        format!("{}/auth/callback", self.api_url)
    }
}

/// Shared application state containing all dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped dependencies
/// for efficient sharing across handlers.
#[derive(Clone)]
pub struct MembershipAppState {
    pub auth_provider: Arc<dyn AuthProvider>,
    pub member_store: Arc<dyn MemberStore>,
    pub content_catalog: Arc<dyn ContentCatalog>,
    pub markdown: Arc<dyn MarkdownRenderer>,
    pub webhook_verifier: Arc<KofiTokenVerifier>,
    pub redirect_signer: RedirectSigner,
    pub links: SiteLinks,
}

impl MembershipAppState {
    pub fn webhook_handler(&self) -> HandleKofiWebhookHandler {
        HandleKofiWebhookHandler::new(self.webhook_verifier.clone(), self.member_store.clone())
    }

    pub fn magic_link_handler(&self) -> RequestMagicLinkHandler {
        RequestMagicLinkHandler::new(
            self.member_store.clone(),
            self.auth_provider.clone(),
            self.links.callback_url(),
        )
    }

    pub fn complete_login_handler(&self) -> CompleteLoginHandler {
        CompleteLoginHandler::new(self.auth_provider.clone(), self.redirect_signer.clone())
    }

    pub fn auth_status_handler(&self) -> GetAuthStatusHandler {
        GetAuthStatusHandler::new(self.auth_provider.clone(), self.member_store.clone())
    }

    pub fn access_content_handler(&self) -> AccessContentHandler {
        AccessContentHandler::new(
            self.content_catalog.clone(),
            self.auth_provider.clone(),
            self.member_store.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Webhook
// ════════════════════════════════════════════════════════════════════════════════

/// POST /webhook - Ko-fi payment notification
pub async fn handle_kofi_webhook(
    State(state): State<MembershipAppState>,
    form: Result<Form<KofiWebhookForm>, FormRejection>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let data = form.ok().and_then(|Form(form)| form.data);

    let handler = state.webhook_handler();
    let cmd = HandleKofiWebhookCommand {
        data,
        received_at: Timestamp::now(),
    };

    let body = match handler.handle(cmd).await.map_err(MembershipApiError::text)? {
        HandleKofiWebhookResult::MembershipRecorded { .. } => "OK",
        HandleKofiWebhookResult::Ignored => "OK - ignored",
    };
    Ok((StatusCode::OK, body))
}

// ════════════════════════════════════════════════════════════════════════════════
// Login
// ════════════════════════════════════════════════════════════════════════════════

/// GET /login - Login page
pub async fn login_page(
    State(state): State<MembershipAppState>,
    Query(query): Query<LoginPageQuery>,
) -> Html<String> {
    let redirect = query.redirect.unwrap_or_default();
    Html(views::login_page(
        &state.links.site_url,
        &state.links.tiers_url,
        &redirect,
    ))
}

/// POST /login - Email a magic link to an active member
pub async fn request_magic_link(
    State(state): State<MembershipAppState>,
    payload: Result<Json<MagicLinkRequest>, JsonRejection>,
) -> Result<Response, MembershipApiError> {
    let Json(request) = payload.map_err(|e| {
        MembershipApiError::json(MembershipError::malformed_payload(e.body_text()))
    })?;

    let handler = state.magic_link_handler();
    let cmd = RequestMagicLinkCommand {
        email: request.email,
        redirect: request.redirect,
        requested_at: Timestamp::now(),
    };
    let result = handler.handle(cmd).await.map_err(MembershipApiError::json)?;

    let mut response = (StatusCode::OK, Json(MagicLinkResponse { success: true })).into_response();
    if let Some(path) = &result.redirect {
        let signed = state.redirect_signer.sign(path).map_err(MembershipApiError::json)?;
        append_cookie(response.headers_mut(), cookies::redirect_cookie(&signed));
    }
    Ok(response)
}

/// GET /auth/callback (and GET /) - Turn the magic-link token into a session
pub async fn auth_callback(
    State(state): State<MembershipAppState>,
    Query(query): Query<CallbackQuery>,
    headers: HeaderMap,
) -> Result<Response, MembershipApiError> {
    let Some(access_token) = query.access_token.filter(|t| !t.is_empty()) else {
        return Ok(Html(views::callback_fragment_page()).into_response());
    };

    let handler = state.complete_login_handler();
    let cmd = CompleteLoginCommand {
        access_token: access_token.clone(),
        redirect_cookie: cookies::read_cookie(&headers, REDIRECT_COOKIE),
    };
    let result = handler.handle(cmd).await.map_err(MembershipApiError::text)?;

    let location = match &result.redirect {
        Some(path) => format!("{}{}", state.links.site_url, path.as_str()),
        None => state.links.site_url.clone(),
    };

    let mut response = found(&location);
    append_cookie(response.headers_mut(), cookies::session_cookie(&access_token));
    append_cookie(response.headers_mut(), cookies::clear_cookie(REDIRECT_COOKIE));
    Ok(response)
}

/// GET /auth/status - Session and membership summary for the site header
pub async fn auth_status(
    State(state): State<MembershipAppState>,
    headers: HeaderMap,
) -> Json<AuthStatusResponse> {
    let handler = state.auth_status_handler();
    let query = GetAuthStatusQuery {
        session_token: cookies::read_cookie(&headers, SESSION_COOKIE),
        now: Timestamp::now(),
    };
    Json(AuthStatusResponse::from(handler.handle(query).await))
}

/// GET /logout
pub async fn logout(State(state): State<MembershipAppState>) -> Response {
    let mut response = found(&state.links.site_url);
    append_cookie(response.headers_mut(), cookies::clear_cookie(SESSION_COOKIE));
    response
}

// ════════════════════════════════════════════════════════════════════════════════
// Content
// ════════════════════════════════════════════════════════════════════════════════

/// GET /content/:slug - Member page or paywall, embeddable in the main site
pub async fn get_content(
    State(state): State<MembershipAppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ContentApiError> {
    let handler = state.access_content_handler();
    let query = AccessContentQuery {
        slug,
        session_token: cookies::read_cookie(&headers, SESSION_COOKIE),
        now: Timestamp::now(),
    };
    let result = handler.handle(query).await?;

    let (status, page) = match &result.decision {
        AccessDecision::Granted => {
            let body = state.markdown.render(&result.content.body_markdown);
            (StatusCode::OK, views::content_page(&result.content, &body))
        }
        AccessDecision::Paywall(reason) => (
            StatusCode::UNAUTHORIZED,
            views::paywall_page(&result.content, reason, &state.links.tiers_url),
        ),
    };
    Ok(framed_html(status, page, &state.links.site_url))
}

// ════════════════════════════════════════════════════════════════════════════════
// Response helpers
// ════════════════════════════════════════════════════════════════════════════════

fn found(location: &str) -> Response {
    let mut response = StatusCode::FOUND.into_response();
    match HeaderValue::from_str(location) {
        Ok(value) => {
            response.headers_mut().insert(header::LOCATION, value);
        }
        Err(_) => tracing::error!(location, "Redirect location is not a valid header value"),
    }
    response
}

fn append_cookie(headers: &mut HeaderMap, cookie: String) {
    if let Some(value) = cookies::header_value(cookie) {
        headers.append(header::SET_COOKIE, value);
    }
}

/// HTML that only the main site may frame.
fn framed_html(status: StatusCode, page: String, site_url: &str) -> Response {
    let mut response = (status, Html(page)).into_response();
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&format!("ALLOW-FROM {site_url}")) {
        headers.insert(header::X_FRAME_OPTIONS, value);
    }
    if let Ok(value) = HeaderValue::from_str(&format!("frame-ancestors {site_url}")) {
        headers.insert(header::CONTENT_SECURITY_POLICY, value);
    }
    response
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorBody {
    Text,
    Json,
}

/// API error wrapper for membership errors.
///
/// The webhook and callback answer in plain text; the login form reads
/// `{"error": ...}` JSON.
#[derive(Debug)]
pub struct MembershipApiError {
    error: MembershipError,
    body: ErrorBody,
}

impl MembershipApiError {
    pub fn text(error: MembershipError) -> Self {
        Self {
            error,
            body: ErrorBody::Text,
        }
    }

    pub fn json(error: MembershipError) -> Self {
        Self {
            error,
            body: ErrorBody::Json,
        }
    }

    fn status(&self) -> StatusCode {
        match &self.error {
            MembershipError::MissingPayload
            | MembershipError::MalformedPayload(_)
            | MembershipError::InvalidEmail => StatusCode::BAD_REQUEST,
            MembershipError::InvalidVerificationToken | MembershipError::InvalidSessionToken => {
                StatusCode::UNAUTHORIZED
            }
            MembershipError::NoActiveMembership => StatusCode::FORBIDDEN,
            MembershipError::MagicLinkFailed(_) | MembershipError::Infrastructure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<MembershipError> for MembershipApiError {
    fn from(err: MembershipError) -> Self {
        Self::json(err)
    }
}

impl IntoResponse for MembershipApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.error, code = %self.error.code(), "Membership request failed");
        } else {
            tracing::debug!(error = %self.error, status = status.as_u16(), "Membership request rejected");
        }

        let message = self.error.message();
        match self.body {
            ErrorBody::Text => (status, message).into_response(),
            ErrorBody::Json => (status, Json(ErrorResponse::new(message))).into_response(),
        }
    }
}

/// API error wrapper for content lookups. Plain text, like the rest of the
/// framed pages' failure modes.
#[derive(Debug)]
pub struct ContentApiError(ContentError);

impl From<ContentError> for ContentApiError {
    fn from(err: ContentError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ContentApiError {
    fn into_response(self) -> Response {
        match &self.0 {
            ContentError::InvalidSlug => (StatusCode::NOT_FOUND, "Not found").into_response(),
            ContentError::NotFound(_) => {
                (StatusCode::NOT_FOUND, "Content not found").into_response()
            }
            ContentError::Unavailable(detail) => {
                tracing::error!(error = %detail, "Protected content unavailable");
                (StatusCode::INTERNAL_SERVER_ERROR, "Content unavailable").into_response()
            }
        }
    }
}
