//! Blog adapters.
//!
//! - `in_memory` - `PostRepository` without a database
//! - `rss` - RSS 2.0 feed rendering

mod in_memory;
mod rss;

pub use in_memory::InMemoryPostRepository;
pub use rss::{render_feed, FeedChannel, FEED_DESCRIPTION, FEED_TITLE};
