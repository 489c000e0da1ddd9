//! Static asset adapters.

mod hasher;

pub use hasher::{AssetHasher, HashReport};
