//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Membership Ports
//!
//! - `AuthProvider` - Magic-link login and token introspection
//! - `MemberStore` - Member rows keyed on email
//!
//! ## Content Ports
//!
//! - `ContentCatalog` - Member-only pages by slug
//! - `PostRepository` - Blog post CRUD
//! - `MarkdownRenderer` - Markdown to safe HTML

mod auth_provider;
mod content_catalog;
mod markdown_renderer;
mod member_store;
mod post_repository;

pub use auth_provider::AuthProvider;
pub use content_catalog::ContentCatalog;
pub use markdown_renderer::MarkdownRenderer;
pub use member_store::MemberStore;
pub use post_repository::PostRepository;
