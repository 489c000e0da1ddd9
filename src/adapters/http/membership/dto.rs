//! HTTP DTOs for membership endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::content::Viewer;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Ko-fi posts `application/x-www-form-urlencoded` with a single `data` field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KofiWebhookForm {
    #[serde(default)]
    pub data: Option<String>,
}

/// Body of `POST /login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MagicLinkRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub redirect: Option<String>,
}

/// `GET /login?redirect=/content/x`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginPageQuery {
    #[serde(default)]
    pub redirect: Option<String>,
}

/// `GET /auth/callback?access_token=...`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub access_token: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MagicLinkResponse {
    pub success: bool,
}

/// JSON error body, `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Response for `GET /auth/status`.
///
/// Anonymous visitors get only `{"authenticated": false}`; signed-in visitors
/// always get every field, with `tier`/`expiresAt` null for non-members.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AuthStatusResponse {
    Anonymous {
        authenticated: bool,
    },
    #[serde(rename_all = "camelCase")]
    Authenticated {
        authenticated: bool,
        email: String,
        is_member: bool,
        tier: Option<String>,
        expires_at: Option<String>,
    },
}

impl From<Viewer> for AuthStatusResponse {
    fn from(viewer: Viewer) -> Self {
        match viewer {
            Viewer::Anonymous => AuthStatusResponse::Anonymous {
                authenticated: false,
            },
            Viewer::Authenticated { email, membership } => AuthStatusResponse::Authenticated {
                authenticated: true,
                email: email.as_str().to_string(),
                is_member: membership.is_some(),
                tier: membership.as_ref().map(|m| m.tier.as_str().to_string()),
                expires_at: membership.as_ref().map(|m| m.expires_at.to_iso_string()),
            },
        }
    }
}
