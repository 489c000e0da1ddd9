//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresPostRepository` - Blog posts in the `posts` table

mod post_repository;

pub use post_repository::PostgresPostRepository;
