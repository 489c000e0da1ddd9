//! Blog handlers.
//!
//! ## Commands
//! - Creating posts
//! - Updating or deleting posts from the edit form
//!
//! ## Queries
//! - Single post by slug
//! - Newest posts

mod create_post;
mod get_post;
mod update_post;

pub use create_post::{CreatePostCommand, CreatePostHandler};
pub use get_post::{GetPostHandler, GetPostQuery, ListPostsHandler, ListPostsQuery, PostVisibility};
pub use update_post::{UpdatePostCommand, UpdatePostHandler, UpdatePostResult};
