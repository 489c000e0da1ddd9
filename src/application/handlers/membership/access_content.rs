//! AccessContentHandler - Query handler for member-only pages.

use std::sync::Arc;

use crate::domain::content::{decide_access, AccessDecision, ContentError, ProtectedContent};
use crate::domain::foundation::{Slug, Timestamp};
use crate::ports::{AuthProvider, ContentCatalog, MemberStore};

use super::viewer::resolve_viewer;

#[derive(Debug, Clone)]
pub struct AccessContentQuery {
    /// Raw path segment; validated here.
    pub slug: String,
    pub session_token: Option<String>,
    pub now: Timestamp,
}

#[derive(Debug, Clone)]
pub struct AccessContentResult {
    pub content: ProtectedContent,
    pub decision: AccessDecision,
}

/// Resolves a content request to either the page or a paywall.
pub struct AccessContentHandler {
    catalog: Arc<dyn ContentCatalog>,
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn MemberStore>,
}

impl AccessContentHandler {
    pub fn new(
        catalog: Arc<dyn ContentCatalog>,
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn MemberStore>,
    ) -> Self {
        Self {
            catalog,
            auth,
            store,
        }
    }

    pub async fn handle(
        &self,
        query: AccessContentQuery,
    ) -> Result<AccessContentResult, ContentError> {
        let slug = Slug::parse(&query.slug).map_err(|_| ContentError::InvalidSlug)?;

        // Unknown slugs 404 without an auth round trip.
        let content = self.catalog.get(&slug).await?;

        let viewer = resolve_viewer(
            self.auth.as_ref(),
            self.store.as_ref(),
            query.session_token.as_deref(),
            query.now,
        )
        .await;
        let decision = decide_access(&content, &viewer);

        tracing::debug!(slug = %slug, decision = ?decision, "Content access decided");
        Ok(AccessContentResult { content, decision })
    }
}
