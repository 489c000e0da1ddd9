//! Protected content entries.

use crate::domain::foundation::Slug;
use crate::domain::membership::MemberTier;

/// A member-only page.
///
/// `teaser` is shown on the paywall, `body_markdown` only to members whose
/// tier satisfies `required_tier`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedContent {
    pub slug: Slug,
    pub title: String,
    pub teaser: String,
    pub required_tier: Option<MemberTier>,
    pub body_markdown: String,
}
