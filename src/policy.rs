//! Scheduling policies and ready-queue selection.
//!
//! ## Determinism
//! Selection is a pure function of the ready queue and the process table.
//! FCFS and round-robin take the queue head; SJF and priority scan for the
//! minimum key and break ties by `(key, arrival, workload position)`, so two
//! runs of the same workload always pick the same process.
//!
//! ## Design notes
//! The serde-facing [`PolicyKind`] carries no payload so it can live in a
//! scenario file; [`Policy::resolve`] pairs it with the quantum and rejects
//! mismatches before the engine starts.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;
use crate::workload::{ProcId, ProcRun};

/// Policy selector as it appears in scenario files and on the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    /// First-come first-served: strict arrival order, non-preemptive.
    Fcfs,
    /// Shortest job first by remaining burst, non-preemptive.
    Sjf,
    /// Lowest priority value first, non-preemptive.
    Priority,
    /// Fixed-quantum round-robin.
    RoundRobin,
}

impl PolicyKind {
    /// Parse a CLI spelling. Accepts the serde names plus the `rr` shorthand.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "fcfs" => Some(Self::Fcfs),
            "sjf" => Some(Self::Sjf),
            "priority" => Some(Self::Priority),
            "rr" | "round-robin" => Some(Self::RoundRobin),
            _ => None,
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::Priority => "priority",
            Self::RoundRobin => "round-robin",
        };
        f.write_str(name)
    }
}

/// Error for a policy name [`PolicyKind::from_str`] does not recognize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPolicy(pub String);

impl fmt::Display for UnknownPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown policy: {} (expected fcfs, sjf, priority, or rr)",
            self.0
        )
    }
}

impl std::error::Error for UnknownPolicy {}

impl FromStr for PolicyKind {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownPolicy(s.to_string()))
    }
}

/// A policy with its parameters checked and bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Fcfs,
    Sjf,
    Priority,
    RoundRobin {
        /// Ticks a process may hold the CPU before requeueing. Always >= 1.
        quantum: u64,
    },
}

impl Policy {
    /// Bind a policy kind to its quantum, rejecting mismatched configuration.
    ///
    /// A quantum is required (and must be non-zero) for round-robin and must
    /// be absent for every other policy.
    pub fn resolve(kind: PolicyKind, quantum: Option<u64>) -> Result<Self, ValidationError> {
        match (kind, quantum) {
            (PolicyKind::RoundRobin, None) => Err(ValidationError::MissingQuantum),
            (PolicyKind::RoundRobin, Some(0)) => Err(ValidationError::ZeroQuantum),
            (PolicyKind::RoundRobin, Some(quantum)) => Ok(Self::RoundRobin { quantum }),
            (kind, Some(_)) => Err(ValidationError::UnexpectedQuantum { policy: kind }),
            (PolicyKind::Fcfs, None) => Ok(Self::Fcfs),
            (PolicyKind::Sjf, None) => Ok(Self::Sjf),
            (PolicyKind::Priority, None) => Ok(Self::Priority),
        }
    }

    #[inline(always)]
    pub fn kind(&self) -> PolicyKind {
        match self {
            Self::Fcfs => PolicyKind::Fcfs,
            Self::Sjf => PolicyKind::Sjf,
            Self::Priority => PolicyKind::Priority,
            Self::RoundRobin { .. } => PolicyKind::RoundRobin,
        }
    }

    /// Remove and return the next process to run from the ready queue.
    ///
    /// Relative order of the processes left behind is preserved in all
    /// cases, so a scan-based pick does not disturb FIFO history.
    pub fn select_next(
        &self,
        ready: &mut VecDeque<ProcId>,
        procs: &[ProcRun],
    ) -> Option<ProcId> {
        match self {
            Self::Fcfs | Self::RoundRobin { .. } => ready.pop_front(),
            Self::Sjf => take_min_by(ready, procs, |p| p.remaining),
            Self::Priority => take_min_by(ready, procs, |p| p.def.priority),
        }
    }
}

/// Pull the queue entry minimizing `(key, arrival, workload position)`.
fn take_min_by(
    ready: &mut VecDeque<ProcId>,
    procs: &[ProcRun],
    key: impl Fn(&ProcRun) -> u64,
) -> Option<ProcId> {
    let pos = ready
        .iter()
        .enumerate()
        .min_by_key(|&(_, &pid)| {
            let p = &procs[pid.index()];
            (key(p), p.def.arrival, pid)
        })
        .map(|(pos, _)| pos)?;
    ready.remove(pos)
}
