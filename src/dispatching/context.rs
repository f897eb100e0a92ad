//! Scheduling context for dispatching rule evaluation.

use std::collections::HashMap;

/// Runtime dispatcher state passed to dispatching rules.
///
/// Contains the simulated clock and per-process bookkeeping needed by
/// context-aware rules (remaining burst for SRTF, queue entry for FCFS).
#[derive(Debug, Clone, Default)]
pub struct SchedulingContext {
    /// Current simulation time (ticks).
    pub current_time: i64,
    /// Remaining CPU time per process (process_id → ticks).
    pub remaining: HashMap<u32, i64>,
    /// Tick at which each process last entered the ready queue.
    pub ready_since: HashMap<u32, i64>,
}

impl SchedulingContext {
    /// Creates a context at the given time.
    pub fn at_time(current_time: i64) -> Self {
        Self {
            current_time,
            ..Default::default()
        }
    }

    /// Sets remaining work for a process.
    pub fn with_remaining(mut self, process_id: u32, ticks: i64) -> Self {
        self.remaining.insert(process_id, ticks);
        self
    }

    /// Sets the ready-queue entry time for a process.
    pub fn with_ready_since(mut self, process_id: u32, time: i64) -> Self {
        self.ready_since.insert(process_id, time);
        self
    }
}
