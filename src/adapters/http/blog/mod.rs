//! HTTP adapter for blog endpoints.
//!
//! Public post listing, rendered posts and the RSS feed, plus the
//! token-guarded admin editor API.

pub mod dto;
mod handlers;
mod routes;

pub use dto::{PostResponse, PostSummaryResponse};
pub use handlers::{BlogAppState, PostApiError};
pub use routes::{blog_router, blog_routes};
