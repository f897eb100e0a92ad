//! Result renderer.
//!
//! [`render`] is a pure function from a validated [`Reply`] to the state of
//! the result panel. Nothing is mutated in place; the caller swaps the
//! whole [`DisplayState`].

use std::fmt::Write as _;

use serde::Serialize;

use crate::models::{ProcessOutcome, ScheduleResult, Timeline};
use crate::protocol::Reply;

/// Visual state of the result panel.
///
/// A single value, so the success and failure styles can never both apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visual {
    /// Nothing requested yet.
    #[default]
    Idle,
    Success,
    Failure,
}

impl Visual {
    /// CSS class the front end applies for this state.
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Success => Some("success"),
            Self::Failure => Some("failure"),
        }
    }
}

/// Everything the result panel shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    /// Main result region: error text or the process list as JSON.
    pub result_text: String,
    /// The process list as a text table; empty unless the run succeeded.
    pub process_table: String,
    pub average_tat_text: String,
    pub average_wt_text: String,
    pub overhead_text: String,
    /// Whether the averages/overhead summary is shown.
    pub summary_visible: bool,
    pub visual: Visual,
}

impl DisplayState {
    /// The pre-trigger state.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Classes to set on the result element; the rest are removed.
    pub fn css_classes(&self) -> Vec<&'static str> {
        self.visual.css_class().into_iter().collect()
    }
}

/// Renders a reply.
///
/// # Example
/// ```
/// use cpu_schedule::protocol::Reply;
/// use cpu_schedule::render::{render, Visual};
///
/// let state = render(&Reply::Error("invalid input".into()));
/// assert_eq!(state.result_text, "Error: invalid input");
/// assert_eq!(state.visual, Visual::Failure);
/// ```
pub fn render(reply: &Reply) -> DisplayState {
    match reply {
        Reply::Error(error) => DisplayState {
            result_text: format!("Error: {error}"),
            visual: Visual::Failure,
            ..DisplayState::default()
        },
        Reply::Success(result) => render_result(result),
    }
}

fn render_result(result: &ScheduleResult) -> DisplayState {
    let result_text = serde_json::to_string_pretty(&result.processes)
        .unwrap_or_else(|e| format!("<unprintable process list: {e}>"));

    DisplayState {
        result_text,
        process_table: process_table(&result.processes),
        average_tat_text: format!("Average Turnaround Time: {}", result.average_tat),
        average_wt_text: format!("Average Waiting Time: {}", result.average_wt),
        overhead_text: format!("Scheduling Overhead: {:.6} s", result.scheduling_overhead),
        summary_visible: true,
        visual: Visual::Success,
    }
}

/// Plain-text table of process outcomes.
pub fn process_table(processes: &[ProcessOutcome]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4} {:>8} {:>6} {:>9} {:>11} {:>8} {:>11}",
        "ID", "Arrival", "Burst", "Priority", "Completion", "Waiting", "Turnaround"
    );
    for p in processes {
        let _ = writeln!(
            out,
            "{:>4} {:>8} {:>6} {:>9} {:>11} {:>8} {:>11}",
            p.id,
            p.arrival_time,
            p.burst_time,
            p.priority,
            p.completion_time,
            p.waiting_time,
            p.turn_around_time
        );
    }
    out
}

/// Two-line text Gantt chart: a bar of process labels over a time axis.
/// Idle gaps are labelled `--`.
pub fn gantt(timeline: &Timeline) -> String {
    let mut segments: Vec<(String, i64)> = Vec::new();
    let mut cursor = 0;
    for slice in &timeline.slices {
        if slice.start > cursor {
            segments.push(("--".to_string(), cursor));
        }
        segments.push((format!("P{}", slice.process_id), slice.start));
        cursor = slice.end;
    }

    if segments.is_empty() {
        return String::new();
    }

    let mut bar = String::from("|");
    let mut axis = String::new();
    for (label, start) in &segments {
        let width = label.len().max(2) + 2;
        let _ = write!(bar, "{label:^width$}|");
        let _ = write!(axis, "{start:<w$}", w = width + 1);
    }
    let _ = write!(axis, "{}", timeline.makespan());

    format!("{bar}\n{axis}")
}
