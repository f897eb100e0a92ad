//! Per-process outcome and the aggregate scheduling result.
//!
//! These are the records carried back to the front end inside a
//! `schedulerResult` message, so their field names follow the wire
//! contract (camelCase, `averageTAT`, `averageWT`).

use serde::{Deserialize, Serialize};

use super::{Process, Timeline};

/// The completed record of a single process.
///
/// `turn_around_time = completion_time - arrival_time` and
/// `waiting_time = turn_around_time - burst_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessOutcome {
    pub id: u32,
    pub arrival_time: i64,
    pub burst_time: i64,
    pub priority: i32,
    /// Tick at which the last burst slice ended.
    pub completion_time: i64,
    pub waiting_time: i64,
    pub turn_around_time: i64,
    /// Tick at which the process first got the CPU.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_run_time: Option<i64>,
}

impl ProcessOutcome {
    /// Builds the outcome of `process` finishing at `completion_time`.
    pub fn completed(process: &Process, completion_time: i64) -> Self {
        let turn_around_time = completion_time - process.arrival_time;
        Self {
            id: process.id,
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            priority: process.priority,
            completion_time,
            waiting_time: turn_around_time - process.burst_time,
            turn_around_time,
            first_run_time: None,
        }
    }

    /// Records when the process was first dispatched.
    pub fn with_first_run(mut self, time: i64) -> Self {
        self.first_run_time = Some(time);
        self
    }

    /// Response time: first dispatch minus arrival.
    pub fn response_time(&self) -> Option<i64> {
        self.first_run_time.map(|t| t - self.arrival_time)
    }
}

/// The outcome of one scheduling run.
///
/// `processes` are listed in completion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Algorithm label the run used (e.g. `"RR(q=2)"`).
    #[serde(default)]
    pub algorithm: String,
    pub processes: Vec<ProcessOutcome>,
    #[serde(rename = "averageTAT")]
    pub average_tat: f64,
    #[serde(rename = "averageWT")]
    pub average_wt: f64,
    /// Wall-clock time spent computing the schedule, in seconds.
    #[serde(rename = "schedulingOverhead")]
    pub scheduling_overhead: f64,
    /// CPU occupancy over simulated time.
    #[serde(default)]
    pub timeline: Timeline,
}

impl ScheduleResult {
    /// Assembles a result, computing the averages from `processes`.
    pub fn new(
        algorithm: impl Into<String>,
        processes: Vec<ProcessOutcome>,
        timeline: Timeline,
        scheduling_overhead: f64,
    ) -> Self {
        let (average_tat, average_wt) = averages(&processes);
        Self {
            algorithm: algorithm.into(),
            processes,
            average_tat,
            average_wt,
            scheduling_overhead,
            timeline,
        }
    }

    /// Finds the outcome for a process.
    pub fn outcome(&self, id: u32) -> Option<&ProcessOutcome> {
        self.processes.iter().find(|p| p.id == id)
    }
}

fn averages(processes: &[ProcessOutcome]) -> (f64, f64) {
    if processes.is_empty() {
        return (0.0, 0.0);
    }
    let n = processes.len() as f64;
    let tat: f64 = processes.iter().map(|p| p.turn_around_time as f64).sum();
    let wt: f64 = processes.iter().map(|p| p.waiting_time as f64).sum();
    (tat / n, wt / n)
}
