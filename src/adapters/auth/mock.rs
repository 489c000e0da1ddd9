//! Mock authentication adapter for testing.
//!
//! Implements the `AuthProvider` port without a real Supabase project.
//! Tokens are registered up front; sent magic links are recorded so tests
//! can assert on them.
//!
//! # Example
//!
//! ```ignore
//! use tamm_api::adapters::auth::MockAuthProvider;
//!
//! let auth = MockAuthProvider::new().with_test_user("valid-token", "ada@example.com");
//! let user = auth.get_user("valid-token").await?;
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, EmailAddress, UserId};
use crate::ports::AuthProvider;

/// A magic link the mock was asked to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMagicLink {
    pub email: EmailAddress,
    pub redirect_to: String,
}

/// Mock auth provider for testing.
///
/// Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockAuthProvider {
    /// Map of valid tokens to their associated users
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Links requested so far
    sent: RwLock<Vec<SentMagicLink>>,
    /// Optional error returned by `send_magic_link`
    send_error: RwLock<Option<AuthError>>,
    /// Optional error returned by `get_user`
    lookup_error: RwLock<Option<AuthError>>,
}

impl MockAuthProvider {
    /// Creates a new empty mock provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.write().unwrap().insert(token.into(), user);
        self
    }

    /// Adds a valid token for a user with the given email.
    pub fn with_test_user(self, token: impl Into<String>, email: &str) -> Self {
        let user = AuthenticatedUser::new(
            UserId::new(format!("user-{}", email)).unwrap(),
            EmailAddress::parse(email).unwrap(),
        );
        self.with_user(token, user)
    }

    /// Forces `send_magic_link` to fail.
    pub fn with_send_error(self, error: AuthError) -> Self {
        *self.send_error.write().unwrap() = Some(error);
        self
    }

    /// Forces `get_user` to fail.
    pub fn with_lookup_error(self, error: AuthError) -> Self {
        *self.lookup_error.write().unwrap() = Some(error);
        self
    }

    /// Magic links sent so far, oldest first.
    pub fn sent_links(&self) -> Vec<SentMagicLink> {
        self.sent.read().unwrap().clone()
    }
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    async fn send_magic_link(
        &self,
        email: &EmailAddress,
        redirect_to: &str,
    ) -> Result<(), AuthError> {
        if let Some(error) = self.send_error.read().unwrap().clone() {
            return Err(error);
        }

        self.sent.write().unwrap().push(SentMagicLink {
            email: email.clone(),
            redirect_to: redirect_to.to_string(),
        });
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self.lookup_error.read().unwrap().clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap()
            .get(access_token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
