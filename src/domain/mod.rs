//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `membership` - Ko-fi payments, member records, tiers and login redirects
//! - `content` - Member-only pages and the access decision
//! - `blog` - Blog posts and admin form validation
//! - `assets` - Cache-busting rules for static assets

pub mod assets;
pub mod blog;
pub mod content;
pub mod foundation;
pub mod membership;
