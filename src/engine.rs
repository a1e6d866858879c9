//! Tick-stepped scheduling engine.
//!
//! ## Tick order
//! Every executed tick applies, in this exact order:
//! 1. admission of processes whose arrival equals the clock, in workload
//!    order;
//! 2. round-robin preemption when the incumbent's quantum is spent (running
//!    after admission means fresh same-tick arrivals queue ahead of the
//!    preempted incumbent);
//! 3. selection of the next occupant, per policy, if the CPU is free;
//! 4. execution of one burst tick;
//! 5. completion check (a process finishing exactly at a quantum boundary
//!    completes here, so it is never requeued by step 2 on the next tick).
//!
//! An iteration that leaves the CPU unoccupied either terminates the run or
//! fast-forwards the clock to the next pending arrival and restarts from
//! admission. Skipped idle ticks record no occupancy, and an executed tick
//! always advances the clock by exactly one.
//!
//! ## Determinism
//! The engine consults no clocks, timers, or randomness; pacing belongs to
//! the host, which calls [`Engine::step`] at whatever cadence it likes.
//! Equal scenarios replay to identical reports.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::errors::{EngineError, ValidationError};
use crate::metrics;
use crate::policy::{Policy, PolicyKind};
use crate::report::SimReport;
use crate::timeline::TimelineBuilder;
use crate::workload::{self, CompletedProcess, ProcId, ProcRun, ProcState, Scenario};

/// Result of one [`Engine::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// One tick executed: `pid` occupied the CPU for `[tick, tick + 1)`.
    Ran { tick: u64, pid: ProcId },
    /// Every process has completed; nothing was executed.
    Done,
}

/// Advisory view of run state between steps, for visualization hosts.
///
/// Ids are display names, ready for rendering; the engine's own bookkeeping
/// is not exposed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSnapshot {
    /// Ticks of simulated time elapsed. Equals the makespan once complete.
    pub clock: u64,
    /// Processes awaiting the CPU, in queue order.
    pub ready: Vec<String>,
    /// Process occupying the CPU, if any.
    pub running: Option<String>,
    /// Finished processes, in completion order.
    pub completed: Vec<String>,
}

/// Deterministic single-CPU scheduler over a validated workload.
///
/// Construction validates the scenario in full; a constructed engine cannot
/// fail for input reasons. Drive it with [`Engine::step`] for tick-at-a-time
/// control or [`Engine::run_to_completion`] for the final report in one call.
#[derive(Debug)]
pub struct Engine {
    policy: Policy,
    procs: Vec<ProcRun>,
    clock: u64,
    ready: VecDeque<ProcId>,
    running: Option<ProcId>,
    /// Ticks the incumbent has held the CPU since it was last selected.
    quantum_used: u64,
    completed: Vec<ProcId>,
    timeline: TimelineBuilder,
}

impl Engine {
    /// Validate `scenario` and build an engine positioned before tick zero.
    ///
    /// No simulation state exists on error; a rejected scenario costs
    /// nothing.
    pub fn new(scenario: &Scenario) -> Result<Self, ValidationError> {
        let policy = Policy::resolve(scenario.policy, scenario.quantum)?;
        let defs = workload::normalize(&scenario.processes)?;
        let procs: Vec<ProcRun> = defs.into_iter().map(ProcRun::new).collect();
        let timeline = TimelineBuilder::new(procs.len());
        Ok(Self {
            policy,
            procs,
            clock: 0,
            ready: VecDeque::new(),
            running: None,
            quantum_used: 0,
            completed: Vec::new(),
            timeline,
        })
    }

    #[inline(always)]
    pub fn clock(&self) -> u64 {
        self.clock
    }

    #[inline(always)]
    pub fn policy_kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    #[inline(always)]
    pub fn is_complete(&self) -> bool {
        self.completed.len() == self.procs.len()
    }

    /// Execute exactly one occupied tick, fast-forwarding over idle gaps, or
    /// report that the run has terminated.
    ///
    /// Calling `step` after completion is a no-op returning
    /// [`StepOutcome::Done`].
    pub fn step(&mut self) -> Result<StepOutcome, EngineError> {
        loop {
            self.admit();
            self.preempt_expired();
            self.select();
            match self.running {
                Some(pid) => {
                    let tick = self.clock;
                    self.execute(pid, tick);
                    self.clock += 1;
                    return Ok(StepOutcome::Ran { tick, pid });
                }
                None => {
                    if self.is_complete() {
                        return Ok(StepOutcome::Done);
                    }
                    self.fast_forward()?;
                }
            }
        }
    }

    /// Drive the run to termination and return the final report.
    pub fn run_to_completion(&mut self) -> Result<SimReport, EngineError> {
        while !matches!(self.step()?, StepOutcome::Done) {}
        Ok(self.report())
    }

    /// Results so far. Final once [`Engine::is_complete`] returns true.
    pub fn report(&self) -> SimReport {
        let completed: Vec<CompletedProcess> = self
            .completed
            .iter()
            .map(|&pid| self.procs[pid.index()].completed_record())
            .collect();
        let metrics = metrics::summarize(&completed);
        let timeline = self
            .timeline
            .build(self.procs.iter().map(|p| p.def.id.as_str()));
        SimReport {
            completed,
            timeline,
            metrics,
        }
    }

    /// Advisory state view for hosts rendering the run.
    pub fn snapshot(&self) -> TickSnapshot {
        let name = |pid: ProcId| self.procs[pid.index()].def.id.clone();
        TickSnapshot {
            clock: self.clock,
            ready: self.ready.iter().map(|&pid| name(pid)).collect(),
            running: self.running.map(name),
            completed: self.completed.iter().map(|&pid| name(pid)).collect(),
        }
    }

    /// Queue every pending process whose arrival tick is now.
    fn admit(&mut self) {
        for idx in 0..self.procs.len() {
            let p = &mut self.procs[idx];
            if p.state == ProcState::Pending && p.def.arrival == self.clock {
                p.state = ProcState::Ready;
                self.ready.push_back(ProcId::from_u32(idx as u32));
            }
        }
    }

    /// Round-robin only: requeue the incumbent once its quantum is spent.
    fn preempt_expired(&mut self) {
        let Policy::RoundRobin { quantum } = self.policy else {
            return;
        };
        let Some(pid) = self.running else { return };
        if self.quantum_used >= quantum {
            let p = &mut self.procs[pid.index()];
            debug_assert_eq!(p.state, ProcState::Running);
            debug_assert!(p.remaining > 0);
            p.state = ProcState::Ready;
            self.ready.push_back(pid);
            self.running = None;
            self.quantum_used = 0;
        }
    }

    /// Give a free CPU to the policy's pick and pin its start time.
    fn select(&mut self) {
        if self.running.is_some() {
            return;
        }
        let Some(pid) = self.policy.select_next(&mut self.ready, &self.procs) else {
            return;
        };
        let p = &mut self.procs[pid.index()];
        debug_assert_eq!(p.state, ProcState::Ready);
        p.state = ProcState::Running;
        if p.started_at.is_none() {
            p.started_at = Some(self.clock);
        }
        self.running = Some(pid);
        self.quantum_used = 0;
    }

    /// Run one burst tick and retire the process if that was its last.
    fn execute(&mut self, pid: ProcId, tick: u64) {
        let finished = {
            let p = &mut self.procs[pid.index()];
            debug_assert_eq!(p.state, ProcState::Running);
            debug_assert!(p.remaining > 0);
            p.remaining -= 1;
            p.remaining == 0
        };
        self.timeline.record(pid, tick);
        self.quantum_used += 1;
        if finished {
            let p = &mut self.procs[pid.index()];
            p.state = ProcState::Done;
            p.completed_at = Some(tick + 1);
            self.completed.push(pid);
            self.running = None;
            self.quantum_used = 0;
        }
    }

    /// Jump the clock to the next pending arrival, or abort if there is
    /// nothing left to wait for.
    fn fast_forward(&mut self) -> Result<(), EngineError> {
        debug_assert!(self.running.is_none() && self.ready.is_empty());
        let next_arrival = self
            .procs
            .iter()
            .filter(|p| p.state == ProcState::Pending)
            .map(|p| p.def.arrival)
            .min();
        match next_arrival {
            Some(arrival) => {
                debug_assert!(arrival > self.clock);
                self.clock = arrival;
                Ok(())
            }
            None => Err(EngineError::Stalled {
                clock: self.clock,
                incomplete: self.procs.len() - self.completed.len(),
            }),
        }
    }
}
