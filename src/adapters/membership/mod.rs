//! Membership adapters.
//!
//! Implementations of the `MemberStore` port:
//!
//! - `supabase_member_store` - Supabase PostgREST `members` table
//! - `in_memory` - Process-local store for tests

mod in_memory;
mod supabase_member_store;

pub use in_memory::InMemoryMemberStore;
pub use supabase_member_store::SupabaseMemberStore;
