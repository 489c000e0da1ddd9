//! Authentication adapters.
//!
//! Implementations of the `AuthProvider` port:
//!
//! - `supabase` - Supabase Auth magic links and token introspection
//! - `mock` - Test implementation that doesn't require external services

mod mock;
mod supabase;

pub use mock::{MockAuthProvider, SentMagicLink};
pub use supabase::SupabaseAuthProvider;
