//! Auth provider port for passwordless login.
//!
//! The provider owns the whole magic-link protocol: it emails the link,
//! issues the access token when the link is followed, and answers
//! introspection requests for that token. Tokens are never decoded locally.
//!
//! # Example
//!
//! ```ignore
//! async fn whoami(
//!     auth: Arc<dyn AuthProvider>,
//!     token: &str,
//! ) -> Result<EmailAddress, AuthError> {
//!     let user = auth.get_user(token).await?;
//!     Ok(user.email)
//! }
//! ```

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, EmailAddress};

/// Magic-link issuance and token introspection.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthError::MagicLinkRejected` when the provider refuses to send
/// - Return `AuthError::InvalidToken` when a token is unknown or expired
/// - Return `AuthError::ServiceUnavailable` for transport failures
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Emails a one-time login link that lands on `redirect_to`.
    async fn send_magic_link(&self, email: &EmailAddress, redirect_to: &str)
        -> Result<(), AuthError>;

    /// Resolves an access token to the user it was issued for.
    async fn get_user(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// Simple mock implementation for testing the trait
    struct TestAuthProvider {
        tokens: RwLock<HashMap<String, AuthenticatedUser>>,
        sent: RwLock<Vec<(String, String)>>,
    }

    impl TestAuthProvider {
        fn new() -> Self {
            Self {
                tokens: RwLock::new(HashMap::new()),
                sent: RwLock::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AuthProvider for TestAuthProvider {
        async fn send_magic_link(
            &self,
            email: &EmailAddress,
            redirect_to: &str,
        ) -> Result<(), AuthError> {
            self.sent
                .write()
                .unwrap()
                .push((email.to_string(), redirect_to.to_string()));
            Ok(())
        }

        async fn get_user(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError> {
            self.tokens
                .read()
                .unwrap()
                .get(access_token)
                .cloned()
                .ok_or(AuthError::InvalidToken)
        }
    }

    #[tokio::test]
    async fn trait_is_object_safe() {
        let provider = TestAuthProvider::new();
        let user = AuthenticatedUser::new(
            UserId::new("user-1").unwrap(),
            EmailAddress::parse("ada@example.com").unwrap(),
        );
        provider
            .tokens
            .write()
            .unwrap()
            .insert("tok".to_string(), user.clone());

        let dyn_provider: &dyn AuthProvider = &provider;
        assert_eq!(dyn_provider.get_user("tok").await.unwrap(), user);
        assert_eq!(
            dyn_provider.get_user("nope").await.unwrap_err(),
            AuthError::InvalidToken
        );

        dyn_provider
            .send_magic_link(&user.email, "https://api.example/auth/callback")
            .await
            .unwrap();
        assert_eq!(provider.sent.read().unwrap().len(), 1);
    }
}
