//! Protected content catalog port.

use async_trait::async_trait;

use crate::domain::content::{ContentError, ProtectedContent};
use crate::domain::foundation::Slug;

/// Read-only lookup of member-only pages.
#[async_trait]
pub trait ContentCatalog: Send + Sync {
    /// # Errors
    ///
    /// - `NotFound` when no entry exists for the slug
    /// - `Unavailable` when the entry exists but cannot be loaded
    async fn get(&self, slug: &Slug) -> Result<ProtectedContent, ContentError>;
}
