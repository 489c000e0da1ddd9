//! GetAuthStatusHandler - Query handler for the site's login indicator.

use std::sync::Arc;

use crate::domain::content::Viewer;
use crate::domain::foundation::Timestamp;
use crate::ports::{AuthProvider, MemberStore};

use super::viewer::resolve_viewer;

#[derive(Debug, Clone)]
pub struct GetAuthStatusQuery {
    pub session_token: Option<String>,
    pub now: Timestamp,
}

/// The viewer behind the session cookie.
pub type GetAuthStatusResult = Viewer;

pub struct GetAuthStatusHandler {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn MemberStore>,
}

impl GetAuthStatusHandler {
    pub fn new(auth: Arc<dyn AuthProvider>, store: Arc<dyn MemberStore>) -> Self {
        Self { auth, store }
    }

    /// Never fails: upstream errors read as signed out or not a member.
    pub async fn handle(&self, query: GetAuthStatusQuery) -> GetAuthStatusResult {
        resolve_viewer(
            self.auth.as_ref(),
            self.store.as_ref(),
            query.session_token.as_deref(),
            query.now,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockAuthProvider;
    use crate::adapters::membership::InMemoryMemberStore;
    use crate::domain::foundation::{AuthError, EmailAddress};
    use crate::domain::membership::{MemberRecord, MemberTier};

    fn store_with_member() -> InMemoryMemberStore {
        InMemoryMemberStore::new().with_member(MemberRecord {
            email: EmailAddress::parse("ada@example.com").unwrap(),
            tier: MemberTier::new("Early book club"),
            expires_at: Timestamp::now().add_days(3),
            ko_fi_transaction_id: None,
            ko_fi_name: None,
        })
    }

    fn query(token: Option<&str>) -> GetAuthStatusQuery {
        GetAuthStatusQuery {
            session_token: token.map(str::to_string),
            now: Timestamp::now(),
        }
    }

    #[tokio::test]
    async fn no_cookie_is_anonymous() {
        let handler = GetAuthStatusHandler::new(
            Arc::new(MockAuthProvider::new()),
            Arc::new(InMemoryMemberStore::new()),
        );
        assert_eq!(handler.handle(query(None)).await, Viewer::Anonymous);
        assert_eq!(handler.handle(query(Some(""))).await, Viewer::Anonymous);
    }

    #[tokio::test]
    async fn rejected_token_is_anonymous() {
        let auth = MockAuthProvider::new().with_lookup_error(AuthError::InvalidToken);
        let handler = GetAuthStatusHandler::new(Arc::new(auth), Arc::new(store_with_member()));
        assert_eq!(handler.handle(query(Some("t"))).await, Viewer::Anonymous);
    }

    #[tokio::test]
    async fn member_is_reported_with_tier() {
        let auth = MockAuthProvider::new().with_test_user("t", "ada@example.com");
        let handler = GetAuthStatusHandler::new(Arc::new(auth), Arc::new(store_with_member()));

        match handler.handle(query(Some("t"))).await {
            Viewer::Authenticated {
                membership: Some(m),
                ..
            } => assert_eq!(m.tier.as_str(), "Early book club"),
            other => panic!("unexpected viewer: {:?}", other),
        }
    }

    #[tokio::test]
    async fn signed_in_non_member() {
        let auth = MockAuthProvider::new().with_test_user("t", "bob@example.com");
        let handler = GetAuthStatusHandler::new(Arc::new(auth), Arc::new(store_with_member()));

        assert_eq!(
            handler.handle(query(Some("t"))).await,
            Viewer::Authenticated {
                email: EmailAddress::parse("bob@example.com").unwrap(),
                membership: None,
            }
        );
    }

    #[tokio::test]
    async fn store_failure_reads_as_non_member() {
        let auth = MockAuthProvider::new().with_test_user("t", "ada@example.com");
        let handler = GetAuthStatusHandler::new(
            Arc::new(auth),
            Arc::new(InMemoryMemberStore::new().failing_reads()),
        );

        assert!(matches!(
            handler.handle(query(Some("t"))).await,
            Viewer::Authenticated { membership: None, .. }
        ));
    }
}
