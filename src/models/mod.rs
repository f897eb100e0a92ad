//! CPU scheduling domain models.
//!
//! Provides the data types for a single-CPU scheduling problem and its
//! solution.
//!
//! | Type | Role |
//! |------|------|
//! | `Process` | Input: arrival, burst, priority |
//! | `ProcessOutcome` | Output: completion, waiting, turnaround |
//! | `Timeline` | Output: which process ran when |
//! | `ScheduleResult` | Output: outcomes, averages, overhead |

mod outcome;
mod process;
mod timeline;

pub use outcome::{ProcessOutcome, ScheduleResult};
pub use process::Process;
pub use timeline::{Slice, Timeline};
