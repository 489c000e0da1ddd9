//! Membership handlers.
//!
//! ## Commands
//! - Processing Ko-fi webhooks
//! - Requesting a magic link
//! - Completing login from the magic link
//!
//! ## Queries
//! - Auth status for the current session
//! - Access to member-only content

mod access_content;
mod complete_login;
mod get_auth_status;
mod handle_kofi_webhook;
mod request_magic_link;
mod viewer;

// Commands
pub use complete_login::{CompleteLoginCommand, CompleteLoginHandler, CompleteLoginResult};
pub use handle_kofi_webhook::{
    HandleKofiWebhookCommand, HandleKofiWebhookHandler, HandleKofiWebhookResult,
};
pub use request_magic_link::{
    RequestMagicLinkCommand, RequestMagicLinkHandler, RequestMagicLinkResult,
};

// Queries
pub use access_content::{AccessContentHandler, AccessContentQuery, AccessContentResult};
pub use get_auth_status::{GetAuthStatusHandler, GetAuthStatusQuery, GetAuthStatusResult};
