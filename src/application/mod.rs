//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (write) and query handlers (read) are kept separate.

pub mod handlers;

pub use handlers::blog::{
    CreatePostCommand, CreatePostHandler, GetPostHandler, GetPostQuery, ListPostsHandler,
    ListPostsQuery, PostVisibility, UpdatePostCommand, UpdatePostHandler, UpdatePostResult,
};
pub use handlers::membership::{
    AccessContentHandler, AccessContentQuery, AccessContentResult, CompleteLoginCommand,
    CompleteLoginHandler, CompleteLoginResult, GetAuthStatusHandler, GetAuthStatusQuery,
    GetAuthStatusResult, HandleKofiWebhookCommand, HandleKofiWebhookHandler,
    HandleKofiWebhookResult, RequestMagicLinkCommand, RequestMagicLinkHandler,
    RequestMagicLinkResult,
};
