//! Schedule quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg Turnaround | mean(completion - arrival) |
//! | Avg Waiting | mean(turnaround - burst) |
//! | Avg Response | mean(first dispatch - arrival) |
//! | Max Waiting | Largest single wait |
//! | Makespan | Latest completion time |
//! | CPU Utilization | busy time / makespan |
//! | Throughput | processes completed / makespan |
//! | Context Switches | changes of running process |

use serde::Serialize;

use crate::models::{ProcessOutcome, Timeline};

/// Schedule performance indicators. Times are in ticks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleKpi {
    pub avg_turnaround: f64,
    pub avg_waiting: f64,
    pub avg_response: f64,
    pub max_waiting: i64,
    pub makespan: i64,
    /// Fraction of the makespan the CPU was busy (0.0..1.0).
    pub cpu_utilization: f64,
    /// Completed processes per tick.
    pub throughput: f64,
    pub context_switches: usize,
}

impl ScheduleKpi {
    /// Computes KPIs from the outcomes and timeline of one run.
    pub fn calculate(outcomes: &[ProcessOutcome], timeline: &Timeline) -> Self {
        let makespan = timeline.makespan();
        let count = outcomes.len();

        let avg_turnaround = mean(outcomes.iter().map(|o| o.turn_around_time), count);
        let avg_waiting = mean(outcomes.iter().map(|o| o.waiting_time), count);
        let avg_response = mean(
            outcomes
                .iter()
                .map(|o| o.response_time().unwrap_or(o.waiting_time)),
            count,
        );

        let throughput = if makespan > 0 {
            count as f64 / makespan as f64
        } else {
            0.0
        };

        Self {
            avg_turnaround,
            avg_waiting,
            avg_response,
            max_waiting: outcomes.iter().map(|o| o.waiting_time).max().unwrap_or(0),
            makespan,
            cpu_utilization: timeline.utilization().unwrap_or(0.0),
            throughput,
            context_switches: timeline.context_switches(),
        }
    }
}

/// Mean of `count` tick values, summed as f64 so the total cannot overflow.
fn mean(values: impl Iterator<Item = i64>, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    values.map(|v| v as f64).sum::<f64>() / count as f64
}
