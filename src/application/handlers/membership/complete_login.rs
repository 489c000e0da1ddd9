//! CompleteLoginHandler - Command handler for the magic-link callback.

use std::sync::Arc;

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::membership::{MembershipError, RedirectPath, RedirectSigner};
use crate::ports::AuthProvider;

#[derive(Debug, Clone)]
pub struct CompleteLoginCommand {
    pub access_token: String,
    /// Raw `tamm_redirect` cookie value, if any.
    pub redirect_cookie: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CompleteLoginResult {
    pub user: AuthenticatedUser,
    /// Where to send the visitor, when a valid signed redirect was presented.
    pub redirect: Option<RedirectPath>,
}

/// Verifies the token from the magic link before it becomes the session
/// cookie.
pub struct CompleteLoginHandler {
    auth: Arc<dyn AuthProvider>,
    signer: RedirectSigner,
}

impl CompleteLoginHandler {
    pub fn new(auth: Arc<dyn AuthProvider>, signer: RedirectSigner) -> Self {
        Self { auth, signer }
    }

    pub async fn handle(
        &self,
        cmd: CompleteLoginCommand,
    ) -> Result<CompleteLoginResult, MembershipError> {
        let user = self.auth.get_user(&cmd.access_token).await.map_err(|e| {
            tracing::warn!(error = %e, "Magic link token rejected");
            MembershipError::InvalidSessionToken
        })?;

        let redirect = cmd
            .redirect_cookie
            .as_deref()
            .and_then(|value| self.signer.verify(value));

        tracing::info!(email = %user.email, "Login completed");
        Ok(CompleteLoginResult { user, redirect })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockAuthProvider;
    use secrecy::SecretString;

    fn signer() -> RedirectSigner {
        RedirectSigner::new(SecretString::new("0123456789abcdef0123456789abcdef".to_string()))
    }

    fn handler() -> CompleteLoginHandler {
        let auth = MockAuthProvider::new().with_test_user("good-token", "ada@example.com");
        CompleteLoginHandler::new(Arc::new(auth), signer())
    }

    #[tokio::test]
    async fn valid_token_completes_login() {
        let result = handler()
            .handle(CompleteLoginCommand {
                access_token: "good-token".to_string(),
                redirect_cookie: None,
            })
            .await
            .unwrap();

        assert_eq!(result.user.email.as_str(), "ada@example.com");
        assert!(result.redirect.is_none());
    }

    #[tokio::test]
    async fn signed_redirect_is_returned() {
        let path = RedirectPath::parse("/content/ai-guide").unwrap();
        let result = handler()
            .handle(CompleteLoginCommand {
                access_token: "good-token".to_string(),
                redirect_cookie: Some(signer().sign(&path).unwrap()),
            })
            .await
            .unwrap();

        assert_eq!(result.redirect, Some(path));
    }

    #[tokio::test]
    async fn unsigned_redirect_is_ignored() {
        let result = handler()
            .handle(CompleteLoginCommand {
                access_token: "good-token".to_string(),
                redirect_cookie: Some("/content/ai-guide".to_string()),
            })
            .await
            .unwrap();

        assert!(result.redirect.is_none());
    }

    #[tokio::test]
    async fn invalid_token_is_rejected() {
        let err = handler()
            .handle(CompleteLoginCommand {
                access_token: "forged".to_string(),
                redirect_cookie: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err, MembershipError::InvalidSessionToken);
    }
}
