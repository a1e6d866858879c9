//! Error types for workload validation and engine runs.
//!
//! Errors are stage-specific: [`ValidationError`] covers everything that can
//! be rejected before the first tick, [`EngineError`] covers defensive aborts
//! mid-run. A workload that passes validation cannot stall, so callers that
//! construct an [`crate::Engine`] from checked input may treat `EngineError`
//! as an internal fault rather than a user mistake.

use std::fmt;

use crate::policy::PolicyKind;

/// A workload or policy configuration the engine refuses to run.
///
/// Raised by [`crate::Engine::new`] before any tick executes; a rejected
/// scenario leaves no partial state behind.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    /// The workload contains no processes.
    EmptyWorkload,
    /// A process declared a burst of zero ticks.
    ZeroBurst {
        /// Id of the offending process (assigned id if it was auto-named).
        id: String,
    },
    /// Two processes resolved to the same id.
    DuplicateId { id: String },
    /// The workload's end bound (latest arrival plus total burst) overflows
    /// the `u64` tick clock.
    WorkloadTooLong {
        /// Id of the latest-arriving process, the one anchoring the bound.
        id: String,
    },
    /// Round-robin was requested without a quantum.
    MissingQuantum,
    /// Round-robin was requested with a quantum of zero ticks.
    ZeroQuantum,
    /// A quantum was supplied for a policy that does not use one.
    UnexpectedQuantum { policy: PolicyKind },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWorkload => write!(f, "workload contains no processes"),
            Self::ZeroBurst { id } => {
                write!(f, "process {id}: burst must be at least one tick")
            }
            Self::DuplicateId { id } => write!(f, "duplicate process id: {id}"),
            Self::WorkloadTooLong { id } => {
                write!(f, "process {id}: arrival plus total burst overflows the tick clock")
            }
            Self::MissingQuantum => {
                write!(f, "round-robin requires a quantum")
            }
            Self::ZeroQuantum => {
                write!(f, "round-robin quantum must be at least one tick")
            }
            Self::UnexpectedQuantum { policy } => {
                write!(f, "policy {policy} does not take a quantum")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Defensive abort raised while a run is in flight.
///
/// None of these are reachable from a validated scenario; they exist so that
/// an internal invariant break surfaces as an error instead of a wedged loop.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    /// The CPU went idle with incomplete processes and no pending arrival to
    /// fast-forward to.
    Stalled {
        /// Clock value at the moment the stall was detected.
        clock: u64,
        /// Number of processes that had not completed.
        incomplete: usize,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stalled { clock, incomplete } => write!(
                f,
                "scheduler stalled at tick {clock}: {incomplete} incomplete process(es) and no pending arrival"
            ),
        }
    }
}

impl std::error::Error for EngineError {}
