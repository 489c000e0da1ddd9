//! HandleKofiWebhookHandler - Command handler for Ko-fi payment notifications.

use std::sync::Arc;

use crate::domain::foundation::{EmailAddress, Timestamp};
use crate::domain::membership::{KofiTokenVerifier, MemberRecord, MembershipError};
use crate::ports::MemberStore;

/// Command to process one Ko-fi webhook delivery.
#[derive(Debug, Clone)]
pub struct HandleKofiWebhookCommand {
    /// The `data` form field, if present.
    pub data: Option<String>,
    pub received_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleKofiWebhookResult {
    /// Subscription payment stored; membership runs until `expires_at`.
    MembershipRecorded {
        email: EmailAddress,
        expires_at: Timestamp,
    },
    /// Verified, but not a subscription payment.
    Ignored,
}

/// Handler for Ko-fi webhooks.
///
/// Each qualifying payment upserts the member row with a fresh 30-day
/// expiry, so renewals need no special handling.
pub struct HandleKofiWebhookHandler {
    verifier: Arc<KofiTokenVerifier>,
    store: Arc<dyn MemberStore>,
}

impl HandleKofiWebhookHandler {
    pub fn new(verifier: Arc<KofiTokenVerifier>, store: Arc<dyn MemberStore>) -> Self {
        Self { verifier, store }
    }

    pub async fn handle(
        &self,
        cmd: HandleKofiWebhookCommand,
    ) -> Result<HandleKofiWebhookResult, MembershipError> {
        let payload = self.verifier.verify_and_parse(cmd.data.as_deref())?;

        if !payload.qualifies() {
            tracing::info!(event_type = ?payload.event_type, "Ignoring non-subscription payment");
            return Ok(HandleKofiWebhookResult::Ignored);
        }

        let email = EmailAddress::parse(&payload.email)
            .map_err(|e| MembershipError::malformed_payload(e.to_string()))?;
        let record = MemberRecord::from_payment(email, &payload, cmd.received_at);

        self.store.upsert(&record).await.map_err(|e| {
            tracing::error!(email = %record.email, error = %e, "Member upsert failed");
            MembershipError::infrastructure(e.to_string())
        })?;

        tracing::info!(
            email = %record.email,
            tier = %record.tier,
            expires_at = %record.expires_at.to_iso_string(),
            "Member upserted"
        );

        Ok(HandleKofiWebhookResult::MembershipRecorded {
            email: record.email,
            expires_at: record.expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::membership::InMemoryMemberStore;
    use secrecy::SecretString;

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn handler(store: Arc<InMemoryMemberStore>) -> HandleKofiWebhookHandler {
        let verifier = KofiTokenVerifier::new(SecretString::new("kofi-secret".to_string()));
        HandleKofiWebhookHandler::new(Arc::new(verifier), store)
    }

    fn data(token: &str, event_type: &str, subscription: bool, tier: Option<&str>) -> String {
        serde_json::json!({
            "verification_token": token,
            "type": event_type,
            "email": "Ada@Example.com",
            "from_name": "Ada",
            "is_subscription_payment": subscription,
            "kofi_transaction_id": "txn-9",
            "tier_name": tier,
        })
        .to_string()
    }

    fn command(data: Option<String>) -> HandleKofiWebhookCommand {
        HandleKofiWebhookCommand {
            data,
            received_at: Timestamp::now(),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn subscription_payment_upserts_member() {
        let store = Arc::new(InMemoryMemberStore::new());
        let cmd = command(Some(data("kofi-secret", "Subscription", true, Some("Early book club"))));
        let received_at = cmd.received_at;

        let result = handler(store.clone()).handle(cmd).await.unwrap();

        let email = EmailAddress::parse("ada@example.com").unwrap();
        assert_eq!(
            result,
            HandleKofiWebhookResult::MembershipRecorded {
                email: email.clone(),
                expires_at: received_at.add_days(30),
            }
        );
        let stored = store.get(&email).unwrap();
        assert_eq!(stored.tier.as_str(), "Early book club");
        assert_eq!(stored.ko_fi_transaction_id.as_deref(), Some("txn-9"));
        assert_eq!(stored.ko_fi_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn subscription_type_without_flag_qualifies() {
        let store = Arc::new(InMemoryMemberStore::new());
        let cmd = command(Some(data("kofi-secret", "Subscription", false, None)));

        let result = handler(store.clone()).handle(cmd).await.unwrap();

        assert!(matches!(result, HandleKofiWebhookResult::MembershipRecorded { .. }));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn renewal_extends_existing_member() {
        let store = Arc::new(InMemoryMemberStore::new());
        let first = command(Some(data("kofi-secret", "Subscription", true, None)));
        let mut second = command(Some(data("kofi-secret", "Subscription", true, None)));
        second.received_at = first.received_at.add_days(29);

        handler(store.clone()).handle(first).await.unwrap();
        handler(store.clone()).handle(second.clone()).await.unwrap();

        let email = EmailAddress::parse("ada@example.com").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&email).unwrap().expires_at, second.received_at.add_days(30));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Rejection Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn donation_is_ignored() {
        let store = Arc::new(InMemoryMemberStore::new());
        let cmd = command(Some(data("kofi-secret", "Donation", false, None)));

        let result = handler(store.clone()).handle(cmd).await.unwrap();

        assert_eq!(result, HandleKofiWebhookResult::Ignored);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn wrong_token_is_rejected_before_anything_is_stored() {
        let store = Arc::new(InMemoryMemberStore::new());
        let cmd = command(Some(data("guess", "Subscription", true, None)));

        let err = handler(store.clone()).handle(cmd).await.unwrap_err();

        assert_eq!(err, MembershipError::InvalidVerificationToken);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn missing_data_is_rejected() {
        let store = Arc::new(InMemoryMemberStore::new());
        let err = handler(store).handle(command(None)).await.unwrap_err();
        assert_eq!(err, MembershipError::MissingPayload);
    }

    #[tokio::test]
    async fn store_failure_is_infrastructure_error() {
        let store = Arc::new(InMemoryMemberStore::new().failing_writes());
        let cmd = command(Some(data("kofi-secret", "Subscription", true, None)));

        let err = handler(store).handle(cmd).await.unwrap_err();

        assert!(matches!(err, MembershipError::Infrastructure(_)));
        assert_eq!(err.message(), "Database error");
    }
}
