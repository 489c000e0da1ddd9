//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types used by the
//! membership, content and blog modules.

mod auth;
mod email;
mod errors;
mod ids;
mod slug;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use email::EmailAddress;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{PostId, UserId};
pub use slug::Slug;
pub use timestamp::Timestamp;
