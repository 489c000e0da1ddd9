//! Content module - Member-only pages and the access decision for them.

mod access;
mod entry;
mod errors;

pub use access::{decide_access, AccessDecision, PaywallReason, Viewer};
pub use entry::ProtectedContent;
pub use errors::ContentError;
