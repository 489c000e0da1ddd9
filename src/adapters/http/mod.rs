//! HTTP adapters - axum routes for the public API.
//!
//! Each module has its own state, handlers and routes; `router` stacks them
//! under the shared CORS, timeout and tracing layers.

pub mod blog;
pub mod cookies;
pub mod html;
pub mod membership;
pub mod middleware;
mod router;

// Re-export key types for convenience
pub use blog::{blog_router, BlogAppState};
pub use membership::{membership_router, MembershipAppState, SiteLinks};
pub use middleware::AdminToken;
pub use router::{app_router, HttpSettings};
