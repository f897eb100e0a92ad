//! Process-list text format.
//!
//! The front end sends the workload as a single string of records:
//!
//! ```text
//! id,arrival,burst,priority;id,arrival,burst,priority;...
//! ```
//!
//! Whitespace around records and fields is ignored and empty records
//! (a trailing `;`, blank lines) are skipped.

use thiserror::Error;

use crate::models::Process;

/// Number of comma-separated fields per record.
pub const FIELDS_PER_RECORD: usize = 4;

const FIELD_NAMES: [&str; FIELDS_PER_RECORD] = ["id", "arrival", "burst", "priority"];

/// Why a process list could not be parsed. Record numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no processes in input")]
    Empty,
    #[error("record {record}: expected 4 fields (id,arrival,burst,priority), found {found}")]
    FieldCount { record: usize, found: usize },
    #[error("record {record}: {field} '{value}' is not an integer")]
    InvalidNumber {
        record: usize,
        field: &'static str,
        value: String,
    },
}

/// Parses a process list.
///
/// # Example
/// ```
/// use cpu_schedule::parse::parse_processes;
///
/// let ps = parse_processes("1,0,5,2; 2,1,3,1").unwrap();
/// assert_eq!(ps.len(), 2);
/// assert_eq!(ps[1].burst_time, 3);
/// ```
pub fn parse_processes(input: &str) -> Result<Vec<Process>, ParseError> {
    let mut processes = Vec::new();

    let records = input
        .split(';')
        .map(str::trim)
        .filter(|r| !r.is_empty());

    for (idx, record) in records.enumerate() {
        processes.push(parse_record(idx + 1, record)?);
    }

    if processes.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(processes)
}

fn parse_record(record: usize, text: &str) -> Result<Process, ParseError> {
    let fields: Vec<&str> = text.split(',').map(str::trim).collect();
    if fields.len() != FIELDS_PER_RECORD {
        return Err(ParseError::FieldCount {
            record,
            found: fields.len(),
        });
    }

    let number = |i: usize| -> Result<i64, ParseError> {
        fields[i].parse::<i64>().map_err(|_| ParseError::InvalidNumber {
            record,
            field: FIELD_NAMES[i],
            value: fields[i].to_string(),
        })
    };

    let id = u32::try_from(number(0)?).map_err(|_| ParseError::InvalidNumber {
        record,
        field: FIELD_NAMES[0],
        value: fields[0].to_string(),
    })?;
    let priority = i32::try_from(number(3)?).map_err(|_| ParseError::InvalidNumber {
        record,
        field: FIELD_NAMES[3],
        value: fields[3].to_string(),
    })?;

    Ok(Process::new(id)
        .with_arrival(number(1)?)
        .with_burst(number(2)?)
        .with_priority(priority))
}

/// Formats processes back into the record format accepted by [`parse_processes`].
pub fn format_processes(processes: &[Process]) -> String {
    processes
        .iter()
        .map(|p| {
            format!(
                "{},{},{},{}",
                p.id, p.arrival_time, p.burst_time, p.priority
            )
        })
        .collect::<Vec<_>>()
        .join(";")
}
