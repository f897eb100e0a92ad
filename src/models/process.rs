//! Process model.
//!
//! A process is a single CPU burst waiting to be dispatched. It arrives at
//! a point on the simulated clock, needs a fixed amount of CPU time, and
//! carries a static priority.
//!
//! # Time Representation
//! All times are integer ticks relative to the simulation epoch (t=0).
//! The consumer defines what a tick means.

use serde::{Deserialize, Serialize};

/// A process to be scheduled on a single CPU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    /// Process identifier, unique within a workload.
    pub id: u32,
    /// Tick at which the process becomes ready.
    pub arrival_time: i64,
    /// Total CPU time required.
    pub burst_time: i64,
    /// Static priority (lower value = more urgent).
    pub priority: i32,
}

impl Process {
    /// Creates a process arriving at t=0 with no work and priority 0.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            arrival_time: 0,
            burst_time: 0,
            priority: 0,
        }
    }

    /// Sets the arrival time.
    pub fn with_arrival(mut self, arrival_time: i64) -> Self {
        self.arrival_time = arrival_time;
        self
    }

    /// Sets the CPU burst length.
    pub fn with_burst(mut self, burst_time: i64) -> Self {
        self.burst_time = burst_time;
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Whether the process has arrived by `time`.
    #[inline]
    pub fn has_arrived(&self, time: i64) -> bool {
        self.arrival_time <= time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_builder() {
        let p = Process::new(3)
            .with_arrival(4)
            .with_burst(7)
            .with_priority(2);

        assert_eq!(p.id, 3);
        assert_eq!(p.arrival_time, 4);
        assert_eq!(p.burst_time, 7);
        assert_eq!(p.priority, 2);
    }

    #[test]
    fn test_has_arrived() {
        let p = Process::new(1).with_arrival(5);
        assert!(!p.has_arrived(4));
        assert!(p.has_arrived(5));
        assert!(p.has_arrived(6));
    }

    #[test]
    fn test_serde_camel_case() {
        let p = Process::new(1).with_arrival(2).with_burst(3).with_priority(4);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["arrivalTime"], 2);
        assert_eq!(json["burstTime"], 3);
    }
}
