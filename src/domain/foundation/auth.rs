//! Authentication types for the domain layer.
//!
//! An `AuthenticatedUser` is whatever the auth provider's introspection
//! endpoint says the bearer token belongs to. The token itself is opaque to
//! this crate: it is never decoded or verified locally.

use super::{EmailAddress, UserId};
use thiserror::Error;

/// User resolved from a session token by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the auth provider.
    pub id: UserId,

    /// User's email address, normalised.
    pub email: EmailAddress,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: EmailAddress) -> Self {
        Self { id, email }
    }
}

/// Authentication errors surfaced by the `AuthProvider` port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, expired or revoked.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The provider refused to send a magic link.
    #[error("Magic link rejected: {0}")]
    MagicLinkRejected(String),

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if the visitor should be sent back to the login page.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken)
    }
}
