//! CPU schedulers and KPI evaluation.
//!
//! Two dispatch strategies cover every [`Algorithm`]:
//!
//! - [`Dispatcher`]: rule-driven selection among ready processes (FCFS,
//!   SJF, LJF, SRTF, HRRN, Priority), optionally preemptive at arrivals.
//! - [`RoundRobin`]: FIFO ready queue with a fixed time slice.
//!
//! [`run`] is the backend entry point behind the `runScheduler` channel:
//! parse the process text, validate it, dispatch, and time the dispatch.

mod algorithm;
mod dispatcher;
mod kpi;
mod round_robin;

pub use algorithm::{Algorithm, Policy, DEFAULT_QUANTUM};
pub use dispatcher::Dispatcher;
pub use kpi::ScheduleKpi;
pub use round_robin::RoundRobin;

use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::SchedulerConfig;
use crate::models::{Process, ProcessOutcome, ScheduleResult, Timeline};
use crate::parse::{parse_processes, ParseError};
use crate::protocol::SchedulingRequest;
use crate::validation::{check_horizon, validate_processes, ValidationError};

/// Why a scheduling request could not be served.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulerError {
    #[error("Invalid algorithm choice: {0}")]
    UnknownAlgorithm(String),
    #[error("round robin quantum must be positive, got {0}")]
    InvalidQuantum(i64),
    #[error("round robin needs {needed} time slices, limit is {limit}")]
    TooManySlices { needed: u64, limit: u64 },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("{}", join_messages(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Outcomes and CPU timeline of one simulated run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Simulation {
    /// Per-process outcomes in completion order.
    pub outcomes: Vec<ProcessOutcome>,
    pub timeline: Timeline,
}

impl Simulation {
    /// KPIs of this run.
    pub fn kpi(&self) -> ScheduleKpi {
        ScheduleKpi::calculate(&self.outcomes, &self.timeline)
    }
}

/// Simulates `processes` under `algorithm`.
///
/// The workload must finish by [`MAX_TICK`](crate::validation::MAX_TICK),
/// and round robin may not need more than `config.max_slices` slices.
pub fn simulate(
    algorithm: Algorithm,
    processes: &[Process],
    config: &SchedulerConfig,
) -> Result<Simulation, SchedulerError> {
    algorithm.check()?;
    check_horizon(processes).map_err(SchedulerError::Invalid)?;

    let simulation = match algorithm.policy() {
        Policy::Rules { engine, preemptive } => {
            Dispatcher::new(engine).preemptive(preemptive).run(processes)
        }
        Policy::TimeSlice { quantum } => {
            let round_robin = RoundRobin::new(quantum)?;
            let needed = round_robin.slice_bound(processes);
            let limit = config.max_slices;
            if needed > limit {
                return Err(SchedulerError::TooManySlices { needed, limit });
            }
            round_robin.run(processes)
        }
    };
    Ok(simulation)
}

/// Serves one scheduling request.
///
/// `schedulingOverhead` in the result is the wall-clock time of the
/// simulation itself, excluding parsing and validation.
pub fn run(
    request: &SchedulingRequest,
    config: &SchedulerConfig,
) -> Result<ScheduleResult, SchedulerError> {
    let algorithm = Algorithm::parse(&request.algorithm, config.round_robin_quantum)?;
    let processes = parse_processes(&request.input)?;
    validate_processes(&processes).map_err(SchedulerError::Invalid)?;

    debug!(%algorithm, processes = processes.len(), "dispatching");
    let started = Instant::now();
    let simulation = simulate(algorithm, &processes, config)?;
    let overhead = started.elapsed().as_secs_f64();

    let result = ScheduleResult::new(
        algorithm.to_string(),
        simulation.outcomes,
        simulation.timeline,
        overhead,
    );
    info!(
        %algorithm,
        average_tat = result.average_tat,
        average_wt = result.average_wt,
        overhead_s = overhead,
        "schedule computed"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    fn request(algorithm: &str, input: &str) -> SchedulingRequest {
        SchedulingRequest::new(algorithm, input)
    }

    const WORKLOAD: &str = "1,0,5,2;2,1,3,1;3,2,8,3";

    #[test]
    fn test_run_fcfs() {
        let result = run(&request("FCFS", WORKLOAD), &SchedulerConfig::default()).unwrap();
        assert_eq!(result.algorithm, "FCFS");
        assert_eq!(result.processes.len(), 3);
        // TAT: 5, 7, 14 → 26/3 ; WT: 0, 4, 6 → 10/3
        assert!((result.average_tat - 26.0 / 3.0).abs() < 1e-10);
        assert!((result.average_wt - 10.0 / 3.0).abs() < 1e-10);
        assert!(result.scheduling_overhead >= 0.0);
    }

    #[test]
    fn test_run_priority_and_sjf_agree_here() {
        // After P1, P2 has both the shortest burst and the best priority.
        let sjf = run(&request("SJF", WORKLOAD), &SchedulerConfig::default()).unwrap();
        let prio = run(&request("Priority", WORKLOAD), &SchedulerConfig::default()).unwrap();
        let order = |r: &ScheduleResult| r.processes.iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(order(&sjf), vec![1, 2, 3]);
        assert_eq!(order(&prio), vec![1, 2, 3]);
    }

    #[test]
    fn test_run_round_robin_uses_config_quantum() {
        let config = SchedulerConfig {
            round_robin_quantum: 4,
            ..SchedulerConfig::default()
        };
        let result = run(&request("RR", WORKLOAD), &config).unwrap();
        assert_eq!(result.algorithm, "RR(q=4)");
        let total_burst: i64 = result.processes.iter().map(|p| p.burst_time).sum();
        assert_eq!(result.timeline.busy_time(), total_burst);
    }

    #[test]
    fn test_run_unknown_algorithm() {
        let err = run(&request("MLFQ", WORKLOAD), &SchedulerConfig::default()).unwrap_err();
        assert_eq!(err, SchedulerError::UnknownAlgorithm("MLFQ".into()));
    }

    #[test]
    fn test_run_parse_error() {
        let err = run(&request("FCFS", "1,0,5"), &SchedulerConfig::default()).unwrap_err();
        assert!(matches!(err, SchedulerError::Parse(ParseError::FieldCount { .. })));
    }

    #[test]
    fn test_run_validation_error_message() {
        let err = run(&request("FCFS", "1,0,0,1;1,0,2,1"), &SchedulerConfig::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Process 1 has non-positive burst time 0; Duplicate process ID: 1"
        );
    }

    #[test]
    fn test_simulate_every_algorithm_conserves_work() {
        let processes = parse_processes("1,0,7,3;2,2,4,1;3,4,1,2;4,5,4,4").unwrap();
        for algorithm in [
            Algorithm::Fcfs,
            Algorithm::Sjf,
            Algorithm::Ljf,
            Algorithm::Srtf,
            Algorithm::Hrrn,
            Algorithm::Priority,
            Algorithm::RoundRobin { quantum: 2 },
        ] {
            let sim = simulate(algorithm, &processes, &SchedulerConfig::default()).unwrap();
            assert_eq!(sim.outcomes.len(), 4, "{algorithm}");
            assert_eq!(sim.timeline.busy_time(), 16, "{algorithm}");
            assert_eq!(sim.kpi().makespan, 16, "{algorithm}");
            assert!(sim.outcomes.iter().all(|o| o.waiting_time >= 0), "{algorithm}");
        }
    }

    #[test]
    fn test_simulate_rejects_bad_quantum() {
        let err = simulate(
            Algorithm::RoundRobin { quantum: 0 },
            &[],
            &SchedulerConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, SchedulerError::InvalidQuantum(0));
    }

    #[test]
    fn test_run_rejects_work_past_time_limit() {
        let err = run(
            &request("FCFS", "1,0,9223372036854775807,0;2,0,1,0"),
            &SchedulerConfig::default(),
        )
        .unwrap_err();
        match err {
            SchedulerError::Invalid(errors) => {
                assert_eq!(errors[0].kind, ValidationErrorKind::HorizonExceeded);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_simulate_checks_time_limit_without_validation() {
        let processes = vec![
            Process::new(1).with_burst(i64::MAX),
            Process::new(2).with_burst(i64::MAX),
        ];
        for algorithm in [Algorithm::Srtf, Algorithm::RoundRobin { quantum: 2 }] {
            let err = simulate(algorithm, &processes, &SchedulerConfig::default()).unwrap_err();
            assert!(matches!(err, SchedulerError::Invalid(_)), "{algorithm}");
        }
    }

    #[test]
    fn test_sjf_exact_near_time_limit() {
        // Bursts differ by 3 near 2^52 and sum to 2^53 - 1.
        let input = "1,0,4503599627370497,0;2,0,4503599627370494,0";
        let result = run(&request("SJF", input), &SchedulerConfig::default()).unwrap();
        let order: Vec<u32> = result.processes.iter().map(|p| p.id).collect();
        assert_eq!(order, vec![2, 1]);
        assert_eq!(result.processes[1].completion_time, (1_i64 << 53) - 1);
    }

    #[test]
    fn test_sjf_past_time_limit_is_rejected() {
        let input = "1,0,9007199254740993,0;2,0,9007199254740992,0";
        let err = run(&request("SJF", input), &SchedulerConfig::default()).unwrap_err();
        assert!(matches!(err, SchedulerError::Invalid(_)));
    }

    #[test]
    fn test_round_robin_slice_limit() {
        let config = SchedulerConfig {
            max_slices: 1_000,
            ..SchedulerConfig::default()
        };
        let err = run(&request("RR", "1,0,20000000,0;2,0,20000000,0"), &config).unwrap_err();
        assert_eq!(
            err,
            SchedulerError::TooManySlices {
                needed: 20_000_000,
                limit: 1_000
            }
        );
        assert_eq!(
            err.to_string(),
            "round robin needs 20000000 time slices, limit is 1000"
        );

        // Exactly at the limit is allowed.
        let ok = run(&request("RR", "1,0,1000,0;2,0,1000,0"), &config).unwrap();
        assert_eq!(ok.timeline.busy_time(), 2_000);
    }

    #[test]
    fn test_default_slice_limit_rejects_huge_round_robin() {
        let err = run(
            &request("RR", "1,0,4000000000000000,0;2,0,1,0"),
            &SchedulerConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SchedulerError::TooManySlices { .. }));
    }

    #[test]
    fn test_run_ljf() {
        let result = run(&request("LJF", "1,0,2,0;2,0,9,0;3,0,5,0"), &SchedulerConfig::default())
            .unwrap();
        let order: Vec<u32> = result.processes.iter().map(|p| p.id).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }
}
