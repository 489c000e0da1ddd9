//! Resolves a session token into a [`Viewer`].

use crate::domain::content::Viewer;
use crate::domain::foundation::Timestamp;
use crate::ports::{AuthProvider, MemberStore};

/// Introspects the token and looks up the member row for its email.
///
/// Every failure degrades towards less access: a rejected token is an
/// anonymous viewer, a failed member lookup is a non-member.
pub(crate) async fn resolve_viewer(
    auth: &dyn AuthProvider,
    store: &dyn MemberStore,
    session_token: Option<&str>,
    now: Timestamp,
) -> Viewer {
    let Some(token) = session_token.filter(|t| !t.is_empty()) else {
        return Viewer::Anonymous;
    };

    let user = match auth.get_user(token).await {
        Ok(user) => user,
        Err(e) => {
            tracing::debug!(error = %e, "Session token rejected");
            return Viewer::Anonymous;
        }
    };

    let membership = match store.find_active(&user.email, now).await {
        Ok(membership) => membership,
        Err(e) => {
            tracing::warn!(email = %user.email, error = %e, "Member lookup failed");
            None
        }
    };

    Viewer::Authenticated {
        email: user.email,
        membership,
    }
}
