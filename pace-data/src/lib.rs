//! Read-only dashboard table access (organizations, processes, activity
//! runs) used by the chat context assembler. Production reads go through
//! Supabase PostgREST; tests fake the [`DashboardDb`] trait.

mod error;
mod postgrest;
mod traits;
mod types;

pub use error::{DataError, Result};
pub use postgrest::PostgrestDb;
pub use traits::DashboardDb;
pub use types::{Organization, Process, RunSummary};
