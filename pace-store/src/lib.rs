//! Document store adapter for the Pace dashboard.
//!
//! Everything durable (knowledge bases, skills, audit log, pending changes,
//! chat logs) lives in a key-blob object store behind the [`DocumentStore`]
//! trait. Production uses Supabase Storage; tests use the in-memory store.

mod error;
mod memory;
mod supabase;
mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use supabase::SupabaseStore;
pub use traits::{DocumentStore, ListOptions, ObjectInfo, UploadOptions};

/// Bucket names, logically namespaced the way the dashboard lays them out.
pub mod buckets {
    pub const KNOWLEDGE_BASE: &str = "knowledge-base";
    pub const SKILLS: &str = "skills";
    pub const CHANGE_LOG: &str = "change-log";
    pub const PENDING_CHANGES: &str = "pending-changes";
    pub const CHAT_LOGS: &str = "chat-logs";
}
