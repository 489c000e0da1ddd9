//! Member records as stored in the external members table.

use crate::domain::foundation::{EmailAddress, Timestamp};

use super::kofi_event::KofiPayload;
use super::tier::MemberTier;

/// Length of access granted by one subscription payment.
pub const MEMBERSHIP_PERIOD_DAYS: i64 = 30;

/// The row written for each qualifying Ko-fi payment.
///
/// Keyed on `email`; a later payment for the same email replaces the row and
/// so extends the membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRecord {
    pub email: EmailAddress,
    pub tier: MemberTier,
    pub expires_at: Timestamp,
    pub ko_fi_transaction_id: Option<String>,
    pub ko_fi_name: Option<String>,
}

impl MemberRecord {
    /// Builds the record for a payment received at `now`.
    pub fn from_payment(email: EmailAddress, payload: &KofiPayload, now: Timestamp) -> Self {
        Self {
            email,
            tier: MemberTier::from_optional(payload.tier_name.as_deref()),
            expires_at: now.add_days(MEMBERSHIP_PERIOD_DAYS),
            ko_fi_transaction_id: payload.kofi_transaction_id.clone(),
            ko_fi_name: payload.from_name.clone(),
        }
    }

    pub fn is_active_at(&self, now: &Timestamp) -> bool {
        self.expires_at.is_after(now)
    }

    pub fn to_active(&self) -> ActiveMembership {
        ActiveMembership {
            email: self.email.clone(),
            tier: self.tier.clone(),
            expires_at: self.expires_at,
        }
    }
}

/// Projection returned by active-membership lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveMembership {
    pub email: EmailAddress,
    pub tier: MemberTier,
    pub expires_at: Timestamp,
}

impl ActiveMembership {
    /// Whether this membership unlocks content gated on `required`.
    ///
    /// Content without a tier requirement is open to every active member.
    pub fn grants(&self, required: Option<&MemberTier>) -> bool {
        match required {
            Some(tier) => self.tier.satisfies(tier),
            None => true,
        }
    }
}
