//! Timeline (Gantt) model.
//!
//! A timeline records which process held the CPU over which interval of
//! simulated time. Gaps between slices are idle CPU time.

use serde::{Deserialize, Serialize};

/// CPU occupancy over simulated time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    /// Slices in chronological order.
    pub slices: Vec<Slice>,
}

/// A process holding the CPU over `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slice {
    pub process_id: u32,
    pub start: i64,
    pub end: i64,
}

impl Slice {
    /// Creates a new slice.
    pub fn new(process_id: u32, start: i64, end: i64) -> Self {
        Self {
            process_id,
            start,
            end,
        }
    }

    /// Length of the slice in ticks.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a slice. Zero-length slices are dropped, and a slice that
    /// continues the previous one for the same process is merged into it.
    pub fn push(&mut self, slice: Slice) {
        if slice.duration() <= 0 {
            return;
        }
        if let Some(last) = self.slices.last_mut() {
            if last.process_id == slice.process_id && last.end == slice.start {
                last.end = slice.end;
                return;
            }
        }
        self.slices.push(slice);
    }

    /// Whether no process ever ran.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Number of slices.
    pub fn slice_count(&self) -> usize {
        self.slices.len()
    }

    /// Latest end time across all slices.
    pub fn makespan(&self) -> i64 {
        self.slices.iter().map(|s| s.end).max().unwrap_or(0)
    }

    /// Total time the CPU was busy.
    pub fn busy_time(&self) -> i64 {
        self.slices.iter().map(Slice::duration).sum()
    }

    /// Total time the CPU sat idle between t=0 and the makespan.
    pub fn idle_time(&self) -> i64 {
        self.makespan() - self.busy_time()
    }

    /// Busy time over makespan. `None` for an empty timeline.
    pub fn utilization(&self) -> Option<f64> {
        let horizon = self.makespan();
        if horizon <= 0 {
            return None;
        }
        Some(self.busy_time() as f64 / horizon as f64)
    }

    /// All slices of a given process.
    pub fn slices_for(&self, process_id: u32) -> Vec<&Slice> {
        self.slices
            .iter()
            .filter(|s| s.process_id == process_id)
            .collect()
    }

    /// End of the last slice of a process.
    pub fn completion_time(&self, process_id: u32) -> Option<i64> {
        self.slices_for(process_id).iter().map(|s| s.end).max()
    }

    /// Start of the first slice of a process.
    pub fn first_run_time(&self, process_id: u32) -> Option<i64> {
        self.slices_for(process_id).iter().map(|s| s.start).min()
    }

    /// Number of times the running process changes between consecutive slices.
    pub fn context_switches(&self) -> usize {
        self.slices
            .windows(2)
            .filter(|w| w[0].process_id != w[1].process_id)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_timeline() -> Timeline {
        let mut t = Timeline::new();
        t.push(Slice::new(1, 0, 2));
        t.push(Slice::new(2, 2, 4));
        t.push(Slice::new(1, 4, 5));
        t.push(Slice::new(3, 7, 10));
        t
    }

    #[test]
    fn test_makespan_and_busy() {
        let t = sample_timeline();
        assert_eq!(t.makespan(), 10);
        assert_eq!(t.busy_time(), 8);
        assert_eq!(t.idle_time(), 2);
        assert!((t.utilization().unwrap() - 0.8).abs() < 1e-10);
    }

    #[test]
    fn test_merge_adjacent_same_process() {
        let mut t = Timeline::new();
        t.push(Slice::new(1, 0, 2));
        t.push(Slice::new(1, 2, 4));
        assert_eq!(t.slice_count(), 1);
        assert_eq!(t.slices[0], Slice::new(1, 0, 4));
    }

    #[test]
    fn test_no_merge_across_gap() {
        let mut t = Timeline::new();
        t.push(Slice::new(1, 0, 2));
        t.push(Slice::new(1, 3, 4));
        assert_eq!(t.slice_count(), 2);
    }

    #[test]
    fn test_zero_length_dropped() {
        let mut t = Timeline::new();
        t.push(Slice::new(1, 3, 3));
        assert!(t.is_empty());
    }

    #[test]
    fn test_per_process_queries() {
        let t = sample_timeline();
        assert_eq!(t.slices_for(1).len(), 2);
        assert_eq!(t.completion_time(1), Some(5));
        assert_eq!(t.first_run_time(3), Some(7));
        assert_eq!(t.completion_time(99), None);
    }

    #[test]
    fn test_context_switches() {
        let t = sample_timeline();
        assert_eq!(t.context_switches(), 3);
        assert_eq!(Timeline::new().context_switches(), 0);
    }

    #[test]
    fn test_empty_timeline() {
        let t = Timeline::new();
        assert_eq!(t.makespan(), 0);
        assert!(t.utilization().is_none());
    }
}
