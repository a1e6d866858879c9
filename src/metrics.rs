//! Aggregate scheduling metrics.

use serde::{Deserialize, Serialize};

use crate::workload::CompletedProcess;

/// Workload-level averages over completed processes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Mean ticks spent ready but not running.
    pub avg_waiting: f64,
    /// Mean ticks from arrival to completion.
    pub avg_turnaround: f64,
}

/// Average waiting and turnaround over `completed`.
///
/// An empty slice yields zeroed metrics rather than a division by zero; a
/// report built before anything finishes is still well-formed.
pub fn summarize(completed: &[CompletedProcess]) -> Metrics {
    if completed.is_empty() {
        return Metrics::default();
    }
    let n = completed.len() as f64;
    // Sums can exceed u64 for extreme workloads.
    let waiting: u128 = completed.iter().map(|p| u128::from(p.waiting)).sum();
    let turnaround: u128 = completed.iter().map(|p| u128::from(p.turnaround)).sum();
    Metrics {
        avg_waiting: waiting as f64 / n,
        avg_turnaround: turnaround as f64 / n,
    }
}
