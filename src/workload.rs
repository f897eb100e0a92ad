//! Random workload generation.
//!
//! Produces process lists for experimenting with the schedulers. With a
//! seed the output is reproducible.

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::Process;

/// Shape of a generated workload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadSpec {
    /// Number of processes.
    pub count: u32,
    /// Arrivals are drawn from `0..=max_arrival`.
    pub max_arrival: i64,
    pub burst: RangeInclusive<i64>,
    pub priority: RangeInclusive<i32>,
    /// RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for WorkloadSpec {
    fn default() -> Self {
        Self {
            count: 5,
            max_arrival: 10,
            burst: 1..=10,
            priority: 1..=5,
            seed: None,
        }
    }
}

impl WorkloadSpec {
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_arrival(mut self, max_arrival: i64) -> Self {
        self.max_arrival = max_arrival;
        self
    }

    /// Draws a workload. Ids run from 1 in arrival order.
    pub fn generate(&self) -> Vec<Process> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let burst_lo = (*self.burst.start()).max(1);
        let burst_hi = (*self.burst.end()).max(burst_lo);
        let prio_lo = *self.priority.start();
        let prio_hi = (*self.priority.end()).max(prio_lo);
        let max_arrival = self.max_arrival.max(0);

        let mut arrivals: Vec<i64> = (0..self.count)
            .map(|_| rng.random_range(0..=max_arrival))
            .collect();
        arrivals.sort_unstable();

        arrivals
            .into_iter()
            .zip(1..)
            .map(|(arrival, id)| {
                Process::new(id)
                    .with_arrival(arrival)
                    .with_burst(rng.random_range(burst_lo..=burst_hi))
                    .with_priority(rng.random_range(prio_lo..=prio_hi))
            })
            .collect()
    }
}
