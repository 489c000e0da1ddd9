//! Membership tier definitions.
//!
//! Tiers are free-form names coming from Ko-fi. The ones listed in
//! [`TIER_HIERARCHY`] are ranked: a higher tier includes access to content
//! gated on any lower tier.

use serde::{Deserialize, Serialize};

/// Ranked Ko-fi tiers, lowest first.
///
/// - "Early book club": creative content, early releases, book chapters, songs
/// - "AI-pocalypse survivor": AI guides, how-tos, experiments (includes book club)
pub const TIER_HIERARCHY: &[&str] = &["Early book club", "AI-pocalypse survivor"];

/// Tier stored when a payment carries no tier name.
pub const DEFAULT_TIER: &str = "member";

/// A membership tier name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberTier(String);

impl MemberTier {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            Self(DEFAULT_TIER.to_string())
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Tier name from an optional Ko-fi `tier_name`, falling back to
    /// [`DEFAULT_TIER`].
    pub fn from_optional(name: Option<&str>) -> Self {
        Self::new(name.unwrap_or(DEFAULT_TIER))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Position in [`TIER_HIERARCHY`], matched case-insensitively.
    pub fn rank(&self) -> Option<usize> {
        TIER_HIERARCHY
            .iter()
            .position(|tier| tier.eq_ignore_ascii_case(&self.0))
    }

    /// Whether a member on this tier may read content gated on `required`.
    ///
    /// Ranked tiers compare by rank. An unranked requirement is only met by
    /// the same tier name.
    pub fn satisfies(&self, required: &MemberTier) -> bool {
        match (self.rank(), required.rank()) {
            (Some(have), Some(need)) => have >= need,
            _ => self.0.eq_ignore_ascii_case(&required.0),
        }
    }
}

impl std::fmt::Display for MemberTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
