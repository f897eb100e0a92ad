//! Input validation for a process workload.
//!
//! Checks structural integrity of the processes before scheduling.
//! Detects:
//! - Duplicate process IDs
//! - Negative arrival times
//! - Non-positive burst times
//! - Workloads that cannot finish by [`MAX_TICK`]
//!
//! All problems are collected, not just the first one.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::Process;

/// Latest tick a schedule may reach (2^53).
///
/// Every simulated time stays within this bound, so clock arithmetic
/// cannot overflow `i64` and rule scores are exact as `f64`.
pub const MAX_TICK: i64 = 1 << 53;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending process.
    pub process_id: u32,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes share the same ID.
    DuplicateId,
    /// A process arrives before t=0.
    NegativeArrival,
    /// A process needs no CPU time (or negative time).
    NonPositiveBurst,
    /// Latest arrival plus total burst exceeds [`MAX_TICK`].
    HorizonExceeded,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, process_id: u32, message: impl Into<String>) -> Self {
        Self {
            kind,
            process_id,
            message: message.into(),
        }
    }
}

/// Validates a workload.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues
/// in input order.
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for p in processes {
        if !ids.insert(p.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                p.id,
                format!("Duplicate process ID: {}", p.id),
            ));
        }

        if p.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                p.id,
                format!(
                    "Process {} has negative arrival time {}",
                    p.id, p.arrival_time
                ),
            ));
        }

        if p.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                p.id,
                format!(
                    "Process {} has non-positive burst time {}",
                    p.id, p.burst_time
                ),
            ));
        }
    }

    errors.extend(horizon_error(processes));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks only that the workload finishes by [`MAX_TICK`].
///
/// The schedulers rely on this bound; [`validate_processes`] includes it.
pub fn check_horizon(processes: &[Process]) -> ValidationResult {
    match horizon_error(processes) {
        Some(error) => Err(vec![error]),
        None => Ok(()),
    }
}

/// No schedule of a single CPU ends later than the latest arrival plus
/// the total burst. Reports the first process that pushes past the limit.
fn horizon_error(processes: &[Process]) -> Option<ValidationError> {
    let mut latest_arrival: i128 = 0;
    let mut total_burst: i128 = 0;
    for p in processes {
        latest_arrival = latest_arrival.max(i128::from(p.arrival_time));
        total_burst += i128::from(p.burst_time.max(0));
        if latest_arrival + total_burst > i128::from(MAX_TICK) {
            return Some(ValidationError::new(
                ValidationErrorKind::HorizonExceeded,
                p.id,
                format!(
                    "Process {} pushes the schedule past the time limit of {} ticks",
                    p.id, MAX_TICK
                ),
            ));
        }
    }
    None
}
