use crate::error::Result;
use crate::types::{Organization, Process, RunSummary};
use async_trait::async_trait;

/// Dashboard table reads consumed by the context assembler. Every caller
/// treats a failure as "no context", so implementations only need to be
/// best-effort.
#[async_trait]
pub trait DashboardDb: Send + Sync {
    /// Runs for a process (all processes when `process_id` is `None`),
    /// most recently updated first.
    async fn recent_runs(&self, process_id: Option<&str>, limit: usize)
    -> Result<Vec<RunSummary>>;

    /// All organizations, oldest first.
    async fn organizations(&self) -> Result<Vec<Organization>>;

    /// Processes belonging to an organization, oldest first.
    async fn processes(&self, org_id: &str) -> Result<Vec<Process>>;

    /// Total run count for a process.
    async fn run_count(&self, process_id: &str) -> Result<u64>;
}
