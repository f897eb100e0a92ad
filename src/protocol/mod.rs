//! Front-end / backend message contract.
//!
//! Two named channels carry JSON payloads:
//!
//! | Channel | Direction | Payload |
//! |---------|-----------|---------|
//! | `runScheduler` | front end → backend | `{ algorithm, input }` |
//! | `schedulerResult` | backend → front end | `{ error?, result? }` |
//!
//! Every message travels inside an [`Envelope`] carrying a [`RequestId`],
//! so a reply can always be matched to the request that produced it.
//! Replies are validated into the tagged [`Reply`] before anything
//! renders them.

mod envelope;
mod reply;

pub use envelope::{decode_line, encode_line, Envelope, RequestId};
pub use reply::{Reply, WireReply};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Channel carrying [`SchedulingRequest`]s.
pub const RUN_SCHEDULER: &str = "runScheduler";
/// Channel carrying replies.
pub const SCHEDULER_RESULT: &str = "schedulerResult";

/// Protocol-level failures.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected message on '{expected}', got '{found}'")]
    UnexpectedChannel {
        expected: &'static str,
        found: String,
    },
    #[error("reply carries neither an error nor a result")]
    MissingResult,
}

/// A request to run one algorithm over one workload.
///
/// Built fresh for every trigger and not retained after sending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingRequest {
    /// Selector value, e.g. `"FCFS"` or `"RR"`.
    pub algorithm: String,
    /// Raw process text, see [`crate::parse`].
    pub input: String,
}

impl SchedulingRequest {
    pub fn new(algorithm: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            input: input.into(),
        }
    }
}
