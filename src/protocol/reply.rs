//! Reply payloads: the loose wire shape and its validated form.

use serde::{Deserialize, Serialize};

use super::ProtocolError;
use crate::models::ScheduleResult;

/// Reply as it appears on the `schedulerResult` channel.
///
/// Both fields are optional on the wire; absent fields are omitted rather
/// than sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ScheduleResult>,
}

/// A validated reply: exactly one of error or result.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Error(String),
    Success(ScheduleResult),
}

impl Reply {
    /// Builds a reply from a scheduling outcome.
    pub fn from_outcome<E: std::fmt::Display>(outcome: Result<ScheduleResult, E>) -> Self {
        match outcome {
            Ok(result) => Reply::Success(result),
            Err(e) => Reply::Error(e.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }
}

impl TryFrom<WireReply> for Reply {
    type Error = ProtocolError;

    /// A non-empty `error` takes precedence over any `result`; an empty
    /// error string counts as absent.
    fn try_from(wire: WireReply) -> Result<Self, ProtocolError> {
        match wire {
            WireReply {
                error: Some(error), ..
            } if !error.is_empty() => Ok(Reply::Error(error)),
            WireReply {
                result: Some(result),
                ..
            } => Ok(Reply::Success(result)),
            _ => Err(ProtocolError::MissingResult),
        }
    }
}

impl From<Reply> for WireReply {
    fn from(reply: Reply) -> Self {
        match reply {
            Reply::Error(error) => Self {
                error: Some(error),
                result: None,
            },
            Reply::Success(result) => Self {
                error: None,
                result: Some(result),
            },
        }
    }
}
