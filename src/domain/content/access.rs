//! Access decision for protected content.

use crate::domain::foundation::EmailAddress;
use crate::domain::membership::{ActiveMembership, MemberTier};

use super::entry::ProtectedContent;

/// Who is asking for a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewer {
    /// No session cookie, or the token was not accepted.
    Anonymous,
    /// Token accepted; `membership` is `None` when no active member row exists.
    Authenticated {
        email: EmailAddress,
        membership: Option<ActiveMembership>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaywallReason {
    Anonymous,
    NotMember { email: EmailAddress },
    TierTooLow { email: EmailAddress, required: MemberTier },
}

impl PaywallReason {
    /// The signed-in email, if any, for the "login with a different email" link.
    pub fn email(&self) -> Option<&EmailAddress> {
        match self {
            PaywallReason::Anonymous => None,
            PaywallReason::NotMember { email } | PaywallReason::TierTooLow { email, .. } => {
                Some(email)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    Paywall(PaywallReason),
}

pub fn decide_access(content: &ProtectedContent, viewer: &Viewer) -> AccessDecision {
    match viewer {
        Viewer::Anonymous => AccessDecision::Paywall(PaywallReason::Anonymous),
        Viewer::Authenticated {
            email,
            membership: None,
        } => AccessDecision::Paywall(PaywallReason::NotMember {
            email: email.clone(),
        }),
        Viewer::Authenticated {
            email,
            membership: Some(membership),
        } => {
            if membership.grants(content.required_tier.as_ref()) {
                AccessDecision::Granted
            } else {
                AccessDecision::Paywall(PaywallReason::TierTooLow {
                    email: email.clone(),
                    // grants() only fails when a tier is required
                    required: content
                        .required_tier
                        .clone()
                        .unwrap_or_else(|| membership.tier.clone()),
                })
            }
        }
    }
}
