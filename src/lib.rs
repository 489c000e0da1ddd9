//! tamm-api - Membership gating and blog content API for tamm.in
//!
//! Ko-fi subscriptions become member rows in Supabase; members sign in with
//! a magic link and can then read protected pages. The same service serves
//! the blog's posts, admin editor API and RSS feed.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
