//! Tool catalog and executor for the dashboard chat.
//!
//! The catalog declares the operations the model may request; the executor
//! performs them against the document store. Tool failures are data, not
//! exceptions: `execute` always returns a JSON value, with failures encoded
//! as `{"error": ...}` so the conversation loop can relay them to the model.

mod catalog;
mod executor;
pub mod kb;
mod records;

pub use catalog::tool_catalog;
pub use executor::ToolExecutor;
pub use records::{ChangeLogEntry, ChangeStatus, PendingChange, Priority, Skill};

/// Identity stamped on every audit entry and queued change.
pub const CHAT_IDENTITY: &str = "dashboard-chat";

/// Process used whenever neither the tool arguments nor the request supply
/// one (the Invoice Processing demo process).
pub const DEFAULT_PROCESS_ID: &str = "edbee70e-72bd-4573-ae80-cd3888f6a75f";
