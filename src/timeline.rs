//! Run-length-encoded record of CPU occupancy.
//!
//! Occupancy is captured one tick at a time and collapsed on the fly: a tick
//! that extends the process's most recent span grows that span instead of
//! appending a new one, so an unbroken run of any length is exactly one
//! [`Span`]. Idle ticks record nothing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::workload::ProcId;

/// Half-open tick interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: u64,
    pub end: u64,
}

impl Span {
    #[inline(always)]
    pub fn new(start: u64, end: u64) -> Self {
        debug_assert!(start < end, "span must cover at least one tick");
        Self { start, end }
    }

    /// Number of ticks covered.
    #[inline(always)]
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Finished timeline: display id to its ordered, disjoint occupancy spans.
///
/// Only processes that occupied the CPU at least once have an entry. Spans
/// within an entry are ordered by start and never touch (touching spans were
/// merged during recording).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    pub spans: BTreeMap<String, Vec<Span>>,
}

impl Timeline {
    /// Spans for one process; empty if it never ran.
    pub fn get(&self, id: &str) -> &[Span] {
        self.spans.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total ticks of recorded occupancy across all processes.
    pub fn busy_ticks(&self) -> u64 {
        self.spans
            .values()
            .flat_map(|spans| spans.iter())
            .map(Span::len)
            .sum()
    }
}

/// Accumulates per-tick occupancy during a run.
///
/// Events must arrive in nondecreasing clock order; that is what lets
/// merging look only at the last span.
#[derive(Debug, Clone, Default)]
pub struct TimelineBuilder {
    per_proc: Vec<Vec<Span>>,
}

impl TimelineBuilder {
    pub fn new(procs: usize) -> Self {
        Self {
            per_proc: vec![Vec::new(); procs],
        }
    }

    /// Record that `pid` occupied the CPU for `[tick, tick + 1)`.
    pub fn record(&mut self, pid: ProcId, tick: u64) {
        let spans = &mut self.per_proc[pid.index()];
        if let Some(last) = spans.last_mut() {
            debug_assert!(last.end <= tick, "occupancy must be recorded in clock order");
            if last.end == tick {
                last.end = tick + 1;
                return;
            }
        }
        spans.push(Span::new(tick, tick + 1));
    }

    /// Spans recorded so far for one process.
    pub fn spans(&self, pid: ProcId) -> &[Span] {
        &self.per_proc[pid.index()]
    }

    /// Assemble a [`Timeline`], naming each slot with the id at the same
    /// position in `ids`. Processes with no recorded occupancy are omitted.
    pub fn build<'a, I>(&self, ids: I) -> Timeline
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut spans = BTreeMap::new();
        for (per, id) in self.per_proc.iter().zip(ids) {
            if !per.is_empty() {
                spans.insert(id.to_string(), per.clone());
            }
        }
        Timeline { spans }
    }
}
