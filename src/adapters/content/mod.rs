//! Protected content adapters.
//!
//! - `fs_catalog` - Markdown files with YAML front matter
//! - `in_memory` - Fixed entries for tests

mod fs_catalog;
mod in_memory;

pub use fs_catalog::FsContentCatalog;
pub use in_memory::InMemoryContentCatalog;
