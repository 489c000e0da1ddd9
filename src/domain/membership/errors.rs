//! Membership-specific error types.
//!
//! Errors raised by the webhook, magic-link and status use cases.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | MissingPayload | 400 |
//! | MalformedPayload | 400 |
//! | InvalidEmail | 400 |
//! | InvalidVerificationToken | 401 |
//! | InvalidSessionToken | 401 |
//! | NoActiveMembership | 403 |
//! | MagicLinkFailed | 500 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode};

/// Membership-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// Webhook form had no `data` field.
    MissingPayload,

    /// Webhook `data` field was not a usable Ko-fi payload.
    MalformedPayload(String),

    /// Webhook verification token did not match.
    InvalidVerificationToken,

    /// Login form email failed the shape check.
    InvalidEmail,

    /// No member row with a future expiry for this email.
    NoActiveMembership,

    /// The auth provider did not recognise the session token.
    InvalidSessionToken,

    /// The auth provider refused or failed to send the magic link.
    MagicLinkFailed(String),

    /// Upstream store or network failure.
    Infrastructure(String),
}

impl MembershipError {
    pub fn malformed_payload(reason: impl Into<String>) -> Self {
        MembershipError::MalformedPayload(reason.into())
    }

    pub fn magic_link_failed(reason: impl Into<String>) -> Self {
        MembershipError::MagicLinkFailed(reason.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MembershipError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::MissingPayload
            | MembershipError::MalformedPayload(_)
            | MembershipError::InvalidEmail => ErrorCode::ValidationFailed,
            MembershipError::InvalidVerificationToken | MembershipError::InvalidSessionToken => {
                ErrorCode::Unauthorized
            }
            MembershipError::NoActiveMembership => ErrorCode::Forbidden,
            MembershipError::MagicLinkFailed(_) => ErrorCode::UpstreamError,
            MembershipError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns the message shown to the caller.
    ///
    /// Upstream details are deliberately left out; they are logged where the
    /// error is created.
    pub fn message(&self) -> String {
        match self {
            MembershipError::MissingPayload => "Missing data field".to_string(),
            MembershipError::MalformedPayload(_) => "Invalid payload".to_string(),
            MembershipError::InvalidVerificationToken => "Unauthorized".to_string(),
            MembershipError::InvalidEmail => "Invalid email".to_string(),
            MembershipError::NoActiveMembership => {
                "No active membership found for this email. Subscribe at ko-fi.com/tigresstamm to access member content."
                    .to_string()
            }
            MembershipError::InvalidSessionToken => "Invalid token".to_string(),
            MembershipError::MagicLinkFailed(_) => "Failed to send magic link".to_string(),
            MembershipError::Infrastructure(_) => "Database error".to_string(),
        }
    }
}

impl std::fmt::Display for MembershipError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MembershipError::MalformedPayload(reason) => write!(f, "Invalid payload: {}", reason),
            MembershipError::MagicLinkFailed(reason) => {
                write!(f, "Failed to send magic link: {}", reason)
            }
            MembershipError::Infrastructure(reason) => write!(f, "Infrastructure error: {}", reason),
            other => write!(f, "{}", other.message()),
        }
    }
}

impl std::error::Error for MembershipError {}

impl From<DomainError> for MembershipError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => MembershipError::MalformedPayload(err.message),
            _ => MembershipError::Infrastructure(err.to_string()),
        }
    }
}
