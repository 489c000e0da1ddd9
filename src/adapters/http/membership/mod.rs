//! HTTP adapter for membership endpoints.
//!
//! Ko-fi webhook, magic-link login, session status and member-only content.

pub mod dto;
mod handlers;
mod routes;
pub mod views;

pub use dto::{AuthStatusResponse, ErrorResponse, MagicLinkRequest, MagicLinkResponse};
pub use handlers::{ContentApiError, MembershipApiError, MembershipAppState, SiteLinks};
pub use routes::{membership_router, membership_routes};
