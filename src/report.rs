//! Terminal results of a simulation run.

use serde::{Deserialize, Serialize};

use crate::metrics::Metrics;
use crate::timeline::Timeline;
use crate::workload::CompletedProcess;

/// Everything a run produces: per-process records, the occupancy timeline,
/// and workload-level averages.
///
/// A report can be taken mid-run (it then covers only what has finished and
/// executed so far); the report of a completed run is final and will not
/// change on further [`crate::Engine::step`] calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimReport {
    /// Finished processes in completion order.
    pub completed: Vec<CompletedProcess>,
    /// Per-process CPU occupancy, run-length encoded.
    pub timeline: Timeline,
    /// Averages over `completed`.
    pub metrics: Metrics,
}

impl SimReport {
    /// Tick boundary of the last completion; zero if nothing finished.
    pub fn makespan(&self) -> u64 {
        self.completed
            .iter()
            .map(|p| p.completed_at)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics;

    #[test]
    fn makespan_is_the_last_completion_boundary() {
        let completed = vec![
            CompletedProcess {
                id: "P1".into(),
                arrival: 0,
                burst: 5,
                priority: 0,
                started_at: 0,
                completed_at: 5,
                waiting: 0,
                turnaround: 5,
            },
            CompletedProcess {
                id: "P2".into(),
                arrival: 1,
                burst: 3,
                priority: 0,
                started_at: 5,
                completed_at: 8,
                waiting: 4,
                turnaround: 7,
            },
        ];
        let metrics = metrics::summarize(&completed);
        let report = SimReport {
            completed,
            timeline: Timeline::default(),
            metrics,
        };
        assert_eq!(report.makespan(), 8);
    }

    #[test]
    fn empty_report_has_zero_makespan() {
        let report = SimReport {
            completed: Vec::new(),
            timeline: Timeline::default(),
            metrics: Metrics::default(),
        };
        assert_eq!(report.makespan(), 0);
    }
}
