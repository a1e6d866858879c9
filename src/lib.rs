//! Deterministic tick-stepped CPU-scheduling simulator.
//!
//! ## Scope
//! Replays a workload of processes (arrival tick, burst length, optional
//! priority) over a single CPU under one of four policies: first-come
//! first-served, non-preemptive shortest-job-first, non-preemptive priority,
//! and fixed-quantum round-robin. The output is a per-process occupancy
//! timeline plus waiting and turnaround figures.
//!
//! ## Key invariants
//! - Determinism: a scenario replays to an identical report every time. No
//!   wall clocks, no randomness, no iteration-order dependence.
//! - Single occupancy: at most one process holds the CPU per tick, and every
//!   burst tick demanded is executed exactly once.
//! - Stable tie-breaks: equal-keyed candidates are ordered by arrival, then
//!   by workload position.
//! - Validation before simulation: a scenario the engine accepts cannot fail
//!   mid-run for input reasons. That includes arithmetic: the workload's end
//!   bound is checked to fit the tick clock up front.
//!
//! ## Tick flow
//! One [`Engine::step`] is `admit -> preempt (round-robin) -> select ->
//! execute -> completion check`, with idle gaps between arrivals
//! fast-forwarded rather than simulated tick by tick. The ordering is
//! load-bearing; see [`engine`] for details and [`policy`] for selection
//! rules.
//!
//! ## Notable entry points
//! - [`Scenario`] / [`ProcessSpec`]: serde-facing workload description.
//! - [`Engine`]: pull-based driver ([`Engine::step`],
//!   [`Engine::run_to_completion`]).
//! - [`SimReport`]: completed records, [`Timeline`], and [`Metrics`].
//! - [`TickSnapshot`]: advisory between-step view for visualization hosts.
//!
//! ```
//! use schedsim_rs::{Engine, PolicyKind, ProcessSpec, Scenario};
//!
//! let scenario = Scenario::new(
//!     vec![ProcessSpec::new("P1", 0, 5), ProcessSpec::new("P2", 1, 3)],
//!     PolicyKind::Fcfs,
//! );
//! let mut engine = Engine::new(&scenario)?;
//! let report = engine.run_to_completion()?;
//! assert_eq!(report.metrics.avg_waiting, 2.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod engine;
pub mod errors;
pub mod metrics;
pub mod policy;
pub mod report;
pub mod timeline;
pub mod workload;

pub use engine::{Engine, StepOutcome, TickSnapshot};
pub use errors::{EngineError, ValidationError};
pub use metrics::{summarize, Metrics};
pub use policy::{Policy, PolicyKind, UnknownPolicy};
pub use report::SimReport;
pub use timeline::{Span, Timeline};
pub use workload::{
    normalize, CompletedProcess, ProcId, ProcessDef, ProcessSpec, Scenario, SCHEMA_VERSION,
};
