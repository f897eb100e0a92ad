//! Algorithm selection.
//!
//! Maps the front end's selector values onto a dispatching policy.

use std::fmt;
use std::str::FromStr;

use super::SchedulerError;
use crate::dispatching::{rules, RuleEngine};

/// Time slice used by round robin when none is configured.
pub const DEFAULT_QUANTUM: i64 = 2;

/// A CPU scheduling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// First Come First Served (non-preemptive).
    Fcfs,
    /// Shortest Job First (non-preemptive).
    Sjf,
    /// Longest Job First (non-preemptive).
    Ljf,
    /// Shortest Remaining Time First (preemptive SJF).
    Srtf,
    /// Highest Response Ratio Next (non-preemptive).
    Hrrn,
    /// Static priority, lower value first (non-preemptive).
    Priority,
    /// Round robin with a fixed time slice.
    RoundRobin { quantum: i64 },
}

impl Algorithm {
    /// Parses a selector value, giving round robin the supplied quantum.
    ///
    /// Matching is case-insensitive.
    pub fn parse(name: &str, quantum: i64) -> Result<Self, SchedulerError> {
        let algorithm = match name.trim().to_ascii_uppercase().as_str() {
            "FCFS" | "FIFO" => Self::Fcfs,
            "SJF" => Self::Sjf,
            "LJF" => Self::Ljf,
            "SRTF" => Self::Srtf,
            "HRRN" => Self::Hrrn,
            "PRIORITY" => Self::Priority,
            "RR" | "ROUNDROBIN" | "ROUND-ROBIN" => Self::RoundRobin { quantum },
            _ => return Err(SchedulerError::UnknownAlgorithm(name.to_string())),
        };
        algorithm.check()?;
        Ok(algorithm)
    }

    /// Rejects parameters the dispatcher cannot run with.
    pub fn check(&self) -> Result<(), SchedulerError> {
        match *self {
            Self::RoundRobin { quantum } if quantum <= 0 => {
                Err(SchedulerError::InvalidQuantum(quantum))
            }
            _ => Ok(()),
        }
    }

    /// Whether a running process can lose the CPU before it finishes.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Self::Srtf | Self::RoundRobin { .. })
    }

    /// How the next process is picked under this algorithm.
    ///
    /// Rule-driven policies break ties by arrival time and then by input
    /// order.
    pub fn policy(&self) -> Policy {
        let engine = match *self {
            Self::RoundRobin { quantum } => return Policy::TimeSlice { quantum },
            Self::Fcfs => RuleEngine::new().with_rule(rules::Fcfs),
            Self::Sjf => RuleEngine::new()
                .with_rule(rules::Sjf)
                .with_tie_breaker(rules::Fcfs),
            Self::Ljf => RuleEngine::new()
                .with_rule(rules::Ljf)
                .with_tie_breaker(rules::Fcfs),
            Self::Srtf => RuleEngine::new()
                .with_rule(rules::Srtf)
                .with_tie_breaker(rules::Fcfs),
            Self::Hrrn => RuleEngine::new()
                .with_rule(rules::Hrrn)
                .with_tie_breaker(rules::Fcfs),
            Self::Priority => RuleEngine::new()
                .with_rule(rules::Priority)
                .with_tie_breaker(rules::Fcfs),
        };
        Policy::Rules {
            engine,
            preemptive: self.is_preemptive(),
        }
    }
}

/// Dispatch mechanism behind an [`Algorithm`].
#[derive(Debug, Clone)]
pub enum Policy {
    /// A rule engine chooses among ready processes.
    Rules { engine: RuleEngine, preemptive: bool },
    /// FIFO ready queue with a fixed time slice.
    TimeSlice { quantum: i64 },
}

impl FromStr for Algorithm {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, DEFAULT_QUANTUM)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fcfs => f.write_str("FCFS"),
            Self::Sjf => f.write_str("SJF"),
            Self::Ljf => f.write_str("LJF"),
            Self::Srtf => f.write_str("SRTF"),
            Self::Hrrn => f.write_str("HRRN"),
            Self::Priority => f.write_str("Priority"),
            Self::RoundRobin { quantum } => write!(f, "RR(q={quantum})"),
        }
    }
}
