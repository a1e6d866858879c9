//! Workload schema, validation, and per-process run state.
//!
//! ## Scope
//! The serde-facing input types ([`ProcessSpec`], [`Scenario`]), the
//! validated form the engine consumes ([`ProcessDef`], [`ProcRun`]), and the
//! terminal record emitted for finished processes ([`CompletedProcess`]).
//!
//! ## Invariants
//! - Validation happens once, up front: [`normalize`] either rejects the
//!   whole workload or yields defs with unique ids, non-zero bursts, and an
//!   end-of-run bound that fits the tick clock.
//! - [`ProcId`] is the process's position in the submitted workload. That
//!   position doubles as the final tie-break key everywhere ordering
//!   matters, which is what pins runs to a single deterministic outcome.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::errors::ValidationError;
use crate::policy::PolicyKind;

/// Current schema version stamped into generated scenarios.
pub const SCHEMA_VERSION: u32 = 1;

/// Identifier for a process within one run: its index in the workload.
///
/// Submission order is the stable tie-break of last resort, so the id is the
/// index rather than the display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcId(u32);

impl ProcId {
    #[inline(always)]
    pub fn from_u32(raw: u32) -> Self {
        Self(raw)
    }

    #[inline(always)]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Index into the run's process table.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One process as submitted: arrival tick, CPU demand, and scheduling weight.
///
/// `id` is optional; omitted ids are auto-assigned as `P1`, `P2`, ... by
/// workload position during validation. Lower `priority` values are more
/// urgent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Display name. Auto-assigned when absent.
    #[serde(default)]
    pub id: Option<String>,
    /// Tick at which the process becomes schedulable.
    #[serde(default)]
    pub arrival: u64,
    /// Total CPU ticks required. Must be at least one.
    pub burst: u64,
    /// Scheduling weight for the priority policy; lower is more urgent.
    #[serde(default)]
    pub priority: u64,
}

impl ProcessSpec {
    pub fn new(id: impl Into<String>, arrival: u64, burst: u64) -> Self {
        Self {
            id: Some(id.into()),
            arrival,
            burst,
            priority: 0,
        }
    }

    pub fn with_priority(mut self, priority: u64) -> Self {
        self.priority = priority;
        self
    }
}

/// A complete simulation input: workload plus policy selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Schema version, bumped on breaking format changes.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// Processes to schedule, in submission order.
    pub processes: Vec<ProcessSpec>,
    /// Policy governing ready-queue selection.
    pub policy: PolicyKind,
    /// Time slice for round-robin. Required iff `policy` is round-robin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<u64>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl Scenario {
    pub fn new(processes: Vec<ProcessSpec>, policy: PolicyKind) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            processes,
            policy,
            quantum: None,
        }
    }

    pub fn with_quantum(mut self, quantum: u64) -> Self {
        self.quantum = Some(quantum);
        self
    }
}

/// A validated process descriptor: id resolved, burst known non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessDef {
    pub id: String,
    pub arrival: u64,
    pub burst: u64,
    pub priority: u64,
}

/// Check a workload and resolve auto-assigned ids.
///
/// Rejects empty workloads, zero bursts, duplicate ids (including a supplied
/// id colliding with an auto-assigned one), and workloads whose end bound
/// overflows the tick clock. The returned defs are in submission order, so
/// index `i` is the process's [`ProcId`].
pub fn normalize(processes: &[ProcessSpec]) -> Result<Vec<ProcessDef>, ValidationError> {
    if processes.is_empty() {
        return Err(ValidationError::EmptyWorkload);
    }

    let mut defs = Vec::with_capacity(processes.len());
    let mut seen = BTreeSet::new();
    for (idx, spec) in processes.iter().enumerate() {
        let id = match &spec.id {
            Some(id) => id.clone(),
            None => format!("P{}", idx + 1),
        };
        if spec.burst == 0 {
            return Err(ValidationError::ZeroBurst { id });
        }
        if !seen.insert(id.clone()) {
            return Err(ValidationError::DuplicateId { id });
        }
        defs.push(ProcessDef {
            id,
            arrival: spec.arrival,
            burst: spec.burst,
            priority: spec.priority,
        });
    }

    // No tick a run touches exceeds the latest arrival plus the total burst
    // (the clock only steps by executed ticks or jumps to a pending
    // arrival), so that sum must itself fit the u64 clock.
    let mut latest = 0;
    for (idx, def) in defs.iter().enumerate() {
        if def.arrival > defs[latest].arrival {
            latest = idx;
        }
    }
    let horizon = defs
        .iter()
        .try_fold(0u64, |sum, def| sum.checked_add(def.burst))
        .and_then(|total| defs[latest].arrival.checked_add(total));
    if horizon.is_none() {
        return Err(ValidationError::WorkloadTooLong {
            id: defs[latest].id.clone(),
        });
    }
    Ok(defs)
}

/// Lifecycle of a process across a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcState {
    /// Not yet arrived.
    Pending,
    /// Waiting in the ready queue.
    Ready,
    /// Occupying the CPU.
    Running,
    /// Finished all burst ticks.
    Done,
}

/// Run-time record for one process: validated descriptor plus the mutable
/// fields the engine updates tick by tick.
#[derive(Debug, Clone)]
pub struct ProcRun {
    pub def: ProcessDef,
    pub state: ProcState,
    /// Burst ticks still owed. Counts down from `def.burst` to zero.
    pub remaining: u64,
    /// Tick at which the process first occupied the CPU.
    pub started_at: Option<u64>,
    /// Tick boundary at which the final burst tick finished.
    pub completed_at: Option<u64>,
}

impl ProcRun {
    pub fn new(def: ProcessDef) -> Self {
        let remaining = def.burst;
        Self {
            def,
            state: ProcState::Pending,
            remaining,
            started_at: None,
            completed_at: None,
        }
    }

    /// Project the terminal record. Callable only once the process is done.
    pub fn completed_record(&self) -> CompletedProcess {
        debug_assert_eq!(self.state, ProcState::Done);
        let started_at = self.started_at.unwrap_or(self.def.arrival);
        let completed_at = self.completed_at.unwrap_or(self.def.arrival + self.def.burst);
        debug_assert!(completed_at >= self.def.arrival + self.def.burst);
        let turnaround = completed_at - self.def.arrival;
        let waiting = turnaround - self.def.burst;
        CompletedProcess {
            id: self.def.id.clone(),
            arrival: self.def.arrival,
            burst: self.def.burst,
            priority: self.def.priority,
            started_at,
            completed_at,
            waiting,
            turnaround,
        }
    }
}

/// Terminal record for a finished process.
///
/// `waiting` and `turnaround` are derived at completion and never exist in a
/// partial state: `turnaround = completed_at - arrival`, and `waiting` is the
/// turnaround minus the burst actually executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedProcess {
    pub id: String,
    pub arrival: u64,
    pub burst: u64,
    pub priority: u64,
    /// Tick of first CPU occupancy.
    pub started_at: u64,
    /// Tick boundary after the final burst tick.
    pub completed_at: u64,
    /// Ticks spent ready but not running.
    pub waiting: u64,
    /// Ticks from arrival to completion.
    pub turnaround: u64,
}
