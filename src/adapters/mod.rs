//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Supabase Auth (magic links, token introspection)
//! - `membership` - Supabase `members` table
//! - `content` - Member-only pages from markdown files
//! - `markdown` - pulldown-cmark rendering
//! - `postgres` - Blog posts in PostgreSQL
//! - `blog` - In-memory posts and the RSS feed
//! - `assets` - Content-hashed file names for the static site build
//! - `http` - axum routes

pub mod assets;
pub mod auth;
pub mod blog;
pub mod content;
pub mod http;
pub mod markdown;
pub mod membership;
pub mod postgres;
