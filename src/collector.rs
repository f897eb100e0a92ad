//! Input collector: the two form controls that produce a request.

use tracing::debug;

use crate::protocol::SchedulingRequest;
use crate::service::{ClientError, PendingReply, SchedulerClient};

/// Current values of the algorithm selector and the process text box.
///
/// Nothing is validated here; the backend owns all checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputCollector {
    algorithm: String,
    process_input: String,
}

impl InputCollector {
    pub fn new(algorithm: impl Into<String>, process_input: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            process_input: process_input.into(),
        }
    }

    pub fn select_algorithm(&mut self, algorithm: impl Into<String>) {
        self.algorithm = algorithm.into();
    }

    pub fn set_process_input(&mut self, input: impl Into<String>) {
        self.process_input = input.into();
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn process_input(&self) -> &str {
        &self.process_input
    }

    /// Builds a fresh request from the current control values.
    pub fn collect(&self) -> SchedulingRequest {
        debug!(algorithm = %self.algorithm, input = %self.process_input, "collecting request");
        SchedulingRequest::new(self.algorithm.clone(), self.process_input.clone())
    }

    /// Trigger action: collect and send.
    pub async fn submit(&self, client: &SchedulerClient) -> Result<PendingReply, ClientError> {
        client.submit(self.collect()).await
    }
}
