//! RequestMagicLinkHandler - Command handler for the login form.

use std::sync::Arc;

use crate::domain::foundation::{AuthError, EmailAddress, Timestamp};
use crate::domain::membership::{MembershipError, RedirectPath};
use crate::ports::{AuthProvider, MemberStore};

/// Command to email a login link.
#[derive(Debug, Clone)]
pub struct RequestMagicLinkCommand {
    pub email: String,
    /// Page to return to after login, as submitted by the form.
    pub redirect: Option<String>,
    pub requested_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMagicLinkResult {
    pub email: EmailAddress,
    /// The submitted redirect if it is a safe site path.
    pub redirect: Option<RedirectPath>,
}

/// Handler for magic-link requests.
///
/// Links are only sent to emails with an active membership, so the auth
/// provider never creates accounts for non-members.
pub struct RequestMagicLinkHandler {
    store: Arc<dyn MemberStore>,
    auth: Arc<dyn AuthProvider>,
    callback_url: String,
}

impl RequestMagicLinkHandler {
    /// `callback_url` is where the emailed link lands, normally
    /// `<api url>/auth/callback`.
    pub fn new(
        store: Arc<dyn MemberStore>,
        auth: Arc<dyn AuthProvider>,
        callback_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            auth,
            callback_url: callback_url.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: RequestMagicLinkCommand,
    ) -> Result<RequestMagicLinkResult, MembershipError> {
        let email = EmailAddress::parse(&cmd.email).map_err(|_| MembershipError::InvalidEmail)?;

        let membership = self
            .store
            .find_active(&email, cmd.requested_at)
            .await
            .map_err(|e| {
                tracing::error!(email = %email, error = %e, "Member lookup failed");
                MembershipError::infrastructure(e.to_string())
            })?;
        if membership.is_none() {
            tracing::info!(email = %email, "Login refused, no active membership");
            return Err(MembershipError::NoActiveMembership);
        }

        self.auth
            .send_magic_link(&email, &self.callback_url)
            .await
            .map_err(|e| {
                tracing::error!(email = %email, error = %e, "Magic link request failed");
                match e {
                    AuthError::MagicLinkRejected(reason) => MembershipError::magic_link_failed(reason),
                    other => MembershipError::magic_link_failed(other.to_string()),
                }
            })?;

        let redirect = cmd.redirect.as_deref().and_then(|raw| {
            let parsed = RedirectPath::parse(raw);
            if parsed.is_none() {
                tracing::warn!(redirect = %raw, "Dropping unsafe login redirect");
            }
            parsed
        });

        tracing::info!(email = %email, "Magic link sent");
        Ok(RequestMagicLinkResult { email, redirect })
    }
}
