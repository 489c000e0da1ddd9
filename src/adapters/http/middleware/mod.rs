//! HTTP middleware for axum.
//!
//! - `auth` - Admin Bearer token guard for the blog admin routes

pub mod auth;

pub use auth::{require_admin, AdminToken};
