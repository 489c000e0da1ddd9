//! Membership module - Ko-fi payments, member records and login redirects.
//!
//! # Module Structure
//!
//! - `errors` - Membership-specific error types
//! - `kofi_event` - Ko-fi webhook payload
//! - `member` - Member record and active-membership projection
//! - `redirect` - Signed post-login redirect cookie
//! - `tier` - Tier names and the tier hierarchy
//! - `webhook_verifier` - Ko-fi verification token check

mod errors;
mod kofi_event;
mod member;
mod redirect;
mod tier;
mod webhook_verifier;

pub use errors::MembershipError;
pub use kofi_event::{KofiEventType, KofiPayload};
pub use member::{ActiveMembership, MemberRecord, MEMBERSHIP_PERIOD_DAYS};
pub use redirect::{RedirectPath, RedirectSigner};
pub use tier::{MemberTier, DEFAULT_TIER, TIER_HIERARCHY};
pub use webhook_verifier::{constant_time_compare, KofiTokenVerifier};
