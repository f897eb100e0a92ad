//! Round-robin dispatcher.
//!
//! # Algorithm
//!
//! 1. Processes enter a FIFO ready queue in arrival order.
//! 2. The head of the queue runs for `min(quantum, remaining)`.
//! 3. Processes that arrived during that slice are enqueued first, then the
//!    preempted process goes to the back of the queue.
//! 4. With an empty queue the clock jumps to the next arrival.

use std::collections::VecDeque;

use crate::models::{Process, ProcessOutcome, Slice, Timeline};

use super::{SchedulerError, Simulation};

/// Round-robin dispatcher with a fixed time slice.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    quantum: i64,
}

impl RoundRobin {
    /// Creates a round-robin dispatcher. The quantum must be positive.
    pub fn new(quantum: i64) -> Result<Self, SchedulerError> {
        if quantum <= 0 {
            return Err(SchedulerError::InvalidQuantum(quantum));
        }
        Ok(Self { quantum })
    }

    /// The configured time slice.
    pub fn quantum(&self) -> i64 {
        self.quantum
    }

    /// Upper bound on the number of time slices [`run`](Self::run) executes:
    /// the sum of `ceil(burst / quantum)` over all processes.
    pub fn slice_bound(&self, processes: &[Process]) -> u64 {
        let quantum = self.quantum.unsigned_abs();
        processes
            .iter()
            .map(|p| p.burst_time.max(0).unsigned_abs().div_ceil(quantum))
            .fold(0u64, u64::saturating_add)
    }

    /// Simulates the workload. Outcomes are returned in completion order.
    ///
    /// Runs one loop iteration per time slice; bound the work with
    /// [`slice_bound`](Self::slice_bound) first.
    pub fn run(&self, processes: &[Process]) -> Simulation {
        let n = processes.len();
        let mut arrival_order: Vec<usize> = (0..n).collect();
        arrival_order.sort_by_key(|&i| processes[i].arrival_time);

        let mut remaining: Vec<i64> = processes.iter().map(|p| p.burst_time).collect();
        let mut first_run: Vec<Option<i64>> = vec![None; n];
        let mut queue: VecDeque<usize> = VecDeque::with_capacity(n);
        let mut admitted = 0;
        let mut outcomes = Vec::with_capacity(n);
        let mut timeline = Timeline::new();
        let mut clock: i64 = 0;

        loop {
            while admitted < n && processes[arrival_order[admitted]].has_arrived(clock) {
                queue.push_back(arrival_order[admitted]);
                admitted += 1;
            }

            let Some(idx) = queue.pop_front() else {
                if admitted >= n {
                    break;
                }
                clock = processes[arrival_order[admitted]].arrival_time;
                continue;
            };

            let run = self.quantum.min(remaining[idx]);
            first_run[idx].get_or_insert(clock);
            let end = clock.saturating_add(run);
            timeline.push(Slice::new(processes[idx].id, clock, end));
            clock = end;
            remaining[idx] -= run;

            while admitted < n && processes[arrival_order[admitted]].has_arrived(clock) {
                queue.push_back(arrival_order[admitted]);
                admitted += 1;
            }

            if remaining[idx] > 0 {
                queue.push_back(idx);
            } else {
                let outcome = ProcessOutcome::completed(&processes[idx], clock)
                    .with_first_run(first_run[idx].unwrap_or(clock));
                outcomes.push(outcome);
            }
        }

        Simulation { outcomes, timeline }
    }
}
