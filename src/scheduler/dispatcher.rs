//! Rule-driven single-CPU dispatcher.
//!
//! # Algorithm
//!
//! 1. Advance a simulated clock from t=0.
//! 2. Whenever the CPU is free, the ready set is every unfinished process
//!    that has arrived. If it is empty, jump the clock to the next arrival.
//! 3. The rule engine picks one ready process.
//! 4. Non-preemptive: the pick runs to completion. Preemptive: the pick
//!    runs until it finishes or the next arrival, whichever comes first,
//!    and the choice is made again.
//!
//! # Complexity
//! O(n² · r) where n = processes and r = rules in the engine.

use crate::dispatching::{RuleEngine, SchedulingContext};
use crate::models::{Process, ProcessOutcome, Slice, Timeline};

use super::Simulation;

/// Single-CPU dispatcher driven by a [`RuleEngine`].
///
/// # Example
///
/// ```
/// use cpu_schedule::dispatching::{rules, RuleEngine};
/// use cpu_schedule::models::Process;
/// use cpu_schedule::scheduler::Dispatcher;
///
/// let processes = vec![
///     Process::new(1).with_burst(6),
///     Process::new(2).with_burst(2),
/// ];
/// let dispatcher = Dispatcher::new(RuleEngine::new().with_rule(rules::Sjf));
/// let sim = dispatcher.run(&processes);
/// assert_eq!(sim.outcomes[0].id, 2);
/// assert_eq!(sim.timeline.makespan(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct Dispatcher {
    rule_engine: RuleEngine,
    preemptive: bool,
}

impl Dispatcher {
    /// Creates a non-preemptive dispatcher.
    pub fn new(rule_engine: RuleEngine) -> Self {
        Self {
            rule_engine,
            preemptive: false,
        }
    }

    /// Lets a newly arrived process take the CPU from the running one.
    pub fn preemptive(mut self, preemptive: bool) -> Self {
        self.preemptive = preemptive;
        self
    }

    /// Simulates the workload. Outcomes are returned in completion order.
    ///
    /// Times are exact only for workloads that pass
    /// [`check_horizon`](crate::validation::check_horizon).
    pub fn run(&self, processes: &[Process]) -> Simulation {
        let n = processes.len();
        let mut remaining: Vec<i64> = processes.iter().map(|p| p.burst_time).collect();
        let mut first_run: Vec<Option<i64>> = vec![None; n];
        let mut finished = vec![false; n];
        let mut outcomes = Vec::with_capacity(n);
        let mut timeline = Timeline::new();
        let mut clock: i64 = 0;

        while outcomes.len() < n {
            let ready: Vec<usize> = (0..n)
                .filter(|&i| !finished[i] && processes[i].has_arrived(clock))
                .collect();

            if ready.is_empty() {
                // CPU idle until the next arrival
                match next_arrival(processes, &finished, clock) {
                    Some(t) => {
                        clock = t;
                        continue;
                    }
                    None => break,
                }
            }

            let candidates: Vec<Process> = ready.iter().map(|&i| processes[i].clone()).collect();
            let mut context = SchedulingContext::at_time(clock);
            for &i in &ready {
                context.remaining.insert(processes[i].id, remaining[i]);
            }

            let Some(pick) = self.rule_engine.select_best(&candidates, &context) else {
                break;
            };
            let idx = ready[pick];

            let mut run_until = clock.saturating_add(remaining[idx]);
            if self.preemptive {
                if let Some(t) = next_arrival(processes, &finished, clock) {
                    run_until = run_until.min(t);
                }
            }

            first_run[idx].get_or_insert(clock);
            timeline.push(Slice::new(processes[idx].id, clock, run_until));
            remaining[idx] -= run_until - clock;
            clock = run_until;

            if remaining[idx] <= 0 {
                finished[idx] = true;
                let outcome = ProcessOutcome::completed(&processes[idx], clock)
                    .with_first_run(first_run[idx].unwrap_or(clock));
                outcomes.push(outcome);
            }
        }

        Simulation { outcomes, timeline }
    }
}

/// Earliest arrival strictly after `clock` among unfinished processes.
fn next_arrival(processes: &[Process], finished: &[bool], clock: i64) -> Option<i64> {
    processes
        .iter()
        .zip(finished)
        .filter(|(p, done)| !**done && p.arrival_time > clock)
        .map(|(p, _)| p.arrival_time)
        .min()
}
