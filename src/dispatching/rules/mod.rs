//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Arrival-based**: FCFS
//! - **Burst-based**: SJF, LJF, SRTF
//! - **Aging**: HRRN
//! - **Priority**: PRIORITY
//!
//! # Score Convention
//! All rules return lower scores for processes that should run first.

use super::{DispatchingRule, RuleScore, SchedulingContext};
use crate::models::Process;

// ======================== Arrival-based rules ========================

/// First Come First Served.
///
/// Orders by the time a process entered the ready queue. Uses
/// `context.ready_since` when set, falling back to the arrival time.
#[derive(Debug, Clone, Copy)]
pub struct Fcfs;

impl DispatchingRule for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn evaluate(&self, process: &Process, context: &SchedulingContext) -> RuleScore {
        context
            .ready_since
            .get(&process.id)
            .copied()
            .unwrap_or(process.arrival_time) as f64
    }

    fn description(&self) -> &'static str {
        "First Come First Served"
    }
}

// ======================== Burst-based rules ========================

/// Shortest Job First.
///
/// Prioritizes the shortest total burst. Minimizes average waiting time
/// among non-preemptive policies when all jobs are available.
#[derive(Debug, Clone, Copy)]
pub struct Sjf;

impl DispatchingRule for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn evaluate(&self, process: &Process, _context: &SchedulingContext) -> RuleScore {
        process.burst_time as f64
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}

/// Longest Job First.
#[derive(Debug, Clone, Copy)]
pub struct Ljf;

impl DispatchingRule for Ljf {
    fn name(&self) -> &'static str {
        "LJF"
    }

    fn evaluate(&self, process: &Process, _context: &SchedulingContext) -> RuleScore {
        -(process.burst_time as f64)
    }

    fn description(&self) -> &'static str {
        "Longest Job First"
    }
}

/// Shortest Remaining Time First.
///
/// Uses `context.remaining`, falling back to the full burst for a process
/// that has not run yet.
#[derive(Debug, Clone, Copy)]
pub struct Srtf;

impl DispatchingRule for Srtf {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn evaluate(&self, process: &Process, context: &SchedulingContext) -> RuleScore {
        context
            .remaining
            .get(&process.id)
            .copied()
            .unwrap_or(process.burst_time) as f64
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Time First"
    }
}

// ======================== Aging rules ========================

/// Highest Response Ratio Next.
///
/// Response ratio = (waiting + burst) / burst, where waiting is measured
/// from arrival to `context.current_time`. Long-waiting processes age
/// upward, so long jobs cannot starve behind a stream of short ones.
#[derive(Debug, Clone, Copy)]
pub struct Hrrn;

impl DispatchingRule for Hrrn {
    fn name(&self) -> &'static str {
        "HRRN"
    }

    fn evaluate(&self, process: &Process, context: &SchedulingContext) -> RuleScore {
        if process.burst_time <= 0 {
            return f64::MAX;
        }
        let waiting = (context.current_time - process.arrival_time).max(0) as f64;
        let burst = process.burst_time as f64;
        -((waiting + burst) / burst) // Higher ratio = higher priority → negate
    }

    fn description(&self) -> &'static str {
        "Highest Response Ratio Next"
    }
}

// ======================== Priority-based rule ========================

/// Static priority rule.
///
/// Lower `priority` values run first.
#[derive(Debug, Clone, Copy)]
pub struct Priority;

impl DispatchingRule for Priority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, process: &Process, _context: &SchedulingContext) -> RuleScore {
        process.priority as f64
    }

    fn description(&self) -> &'static str {
        "Static Priority"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_process(id: u32, arrival: i64, burst: i64, priority: i32) -> Process {
        Process::new(id)
            .with_arrival(arrival)
            .with_burst(burst)
            .with_priority(priority)
    }

    #[test]
    fn test_fcfs() {
        let ctx = SchedulingContext::at_time(10);
        let early = make_process(1, 2, 5, 0);
        let late = make_process(2, 6, 5, 0);
        assert!(Fcfs.evaluate(&early, &ctx) < Fcfs.evaluate(&late, &ctx));
    }

    #[test]
    fn test_fcfs_ready_since_overrides_arrival() {
        // Process 1 arrived first but was re-queued after a time slice.
        let ctx = SchedulingContext::at_time(10)
            .with_ready_since(1, 8)
            .with_ready_since(2, 6);
        let p1 = make_process(1, 0, 5, 0);
        let p2 = make_process(2, 6, 5, 0);
        assert!(Fcfs.evaluate(&p2, &ctx) < Fcfs.evaluate(&p1, &ctx));
    }

    #[test]
    fn test_sjf() {
        let ctx = SchedulingContext::at_time(0);
        let short = make_process(1, 0, 2, 0);
        let long = make_process(2, 0, 9, 0);
        assert!(Sjf.evaluate(&short, &ctx) < Sjf.evaluate(&long, &ctx));
    }

    #[test]
    fn test_ljf() {
        let ctx = SchedulingContext::at_time(0);
        let short = make_process(1, 0, 2, 0);
        let long = make_process(2, 0, 9, 0);
        assert!(Ljf.evaluate(&long, &ctx) < Ljf.evaluate(&short, &ctx));
    }

    #[test]
    fn test_srtf_with_context() {
        let ctx = SchedulingContext::at_time(4)
            .with_remaining(1, 1)
            .with_remaining(2, 6);
        let p1 = make_process(1, 0, 10, 0);
        let p2 = make_process(2, 0, 6, 0);
        assert!(Srtf.evaluate(&p1, &ctx) < Srtf.evaluate(&p2, &ctx));
    }

    #[test]
    fn test_srtf_fallback() {
        let ctx = SchedulingContext::at_time(0);
        let p1 = make_process(1, 0, 3, 0);
        let p2 = make_process(2, 0, 6, 0);
        assert!(Srtf.evaluate(&p1, &ctx) < Srtf.evaluate(&p2, &ctx));
    }

    #[test]
    fn test_hrrn_ages_long_waiters() {
        let ctx = SchedulingContext::at_time(20);
        // Waited 20 with burst 10 → ratio 3.0
        let old_long = make_process(1, 0, 10, 0);
        // Waited 0 with burst 1 → ratio 1.0
        let new_short = make_process(2, 20, 1, 0);
        assert!(Hrrn.evaluate(&old_long, &ctx) < Hrrn.evaluate(&new_short, &ctx));
    }

    #[test]
    fn test_hrrn_zero_burst() {
        let ctx = SchedulingContext::at_time(0);
        assert_eq!(Hrrn.evaluate(&make_process(1, 0, 0, 0), &ctx), f64::MAX);
    }

    #[test]
    fn test_priority_lower_value_first() {
        let ctx = SchedulingContext::at_time(0);
        let urgent = make_process(1, 0, 5, 1);
        let relaxed = make_process(2, 0, 5, 10);
        assert!(Priority.evaluate(&urgent, &ctx) < Priority.evaluate(&relaxed, &ctx));
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(Fcfs.description(), "First Come First Served");
        assert_eq!(Srtf.name(), "SRTF");
    }
}
