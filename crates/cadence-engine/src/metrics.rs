//! Per-call metrics for the tick coordinator.
//!
//! [`TickMetrics`] captures what a single `tick()` call did, enabling
//! telemetry and budget tuning by the embedding simulation loop.

use cadence_core::TickId;

/// Counters collected during a single `tick()` call.
///
/// The coordinator returns these from every call and keeps the most
/// recent copy available through
/// [`LevelTicks::last_metrics`](crate::LevelTicks::last_metrics).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickMetrics {
    /// The tick this call processed.
    pub tick: TickId,
    /// Cache entries whose cached tick was due and were inspected.
    pub candidates_scanned: usize,
    /// Containers moved into the ready set by the collect phase.
    pub containers_ready: usize,
    /// Actions handed to the callback.
    pub executed: usize,
    /// Containers still holding due actions when the budget ran out.
    pub leftover_containers: usize,
    /// Whether the budget cut the batch short.
    pub budget_exhausted: bool,
    /// Pending actions across all containers after the call.
    pub pending_after: usize,
    /// Cumulative number of actions dropped because their chunk was not loaded.
    pub routing_failures: u64,
}
