//! Member store port.
//!
//! Members live in an external table keyed on lower-cased email. Rows are
//! only ever upserted; expiry is what ends a membership.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EmailAddress, Timestamp};
use crate::domain::membership::{ActiveMembership, MemberRecord};

#[async_trait]
pub trait MemberStore: Send + Sync {
    /// Insert the record, or replace the existing row for the same email.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` / `UpstreamError` on store failure
    async fn upsert(&self, record: &MemberRecord) -> Result<(), DomainError>;

    /// The membership for `email` if it expires after `now`.
    async fn find_active(
        &self,
        email: &EmailAddress,
        now: Timestamp,
    ) -> Result<Option<ActiveMembership>, DomainError>;
}
