//! Backend side: serves `runScheduler` requests.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::config::SchedulerConfig;
use crate::protocol::{Envelope, Reply, SchedulingRequest, WireReply, SCHEDULER_RESULT};
use crate::scheduler;

/// Request-side and reply-side ends of a running service.
#[derive(Debug)]
pub struct ServiceChannels {
    pub requests: mpsc::Sender<Envelope<SchedulingRequest>>,
    pub replies: mpsc::Receiver<Envelope<WireReply>>,
}

/// The scheduler backend.
///
/// Each request is simulated on the blocking pool, so a large workload
/// never stalls the runtime, and requests complete independently: replies
/// may leave in a different order than their requests arrived. The reply
/// envelope always carries the id of its request.
#[derive(Debug)]
pub struct SchedulerService;

impl SchedulerService {
    /// Spawns the service on the current runtime.
    pub fn spawn(config: SchedulerConfig) -> (ServiceChannels, JoinHandle<()>) {
        let (request_tx, request_rx) = mpsc::channel(config.queue_capacity);
        let (reply_tx, reply_rx) = mpsc::channel(config.queue_capacity);
        let task = tokio::spawn(serve(config, request_rx, reply_tx));
        let channels = ServiceChannels {
            requests: request_tx,
            replies: reply_rx,
        };
        (channels, task)
    }
}

/// Drains `requests` until every sender is dropped.
///
/// Returns once the request channel closes; in-flight requests still
/// deliver their replies afterwards.
pub async fn serve(
    config: SchedulerConfig,
    mut requests: mpsc::Receiver<Envelope<SchedulingRequest>>,
    replies: mpsc::Sender<Envelope<WireReply>>,
) {
    while let Some(envelope) = requests.recv().await {
        let Envelope { id, payload, .. } = envelope;
        debug!(%id, algorithm = %payload.algorithm, "request received");

        let config = config.clone();
        let replies = replies.clone();
        tokio::spawn(async move {
            let reply = handle_request(payload, config).await;
            if let Reply::Error(message) = &reply {
                warn!(%id, %message, "request failed");
            }
            let envelope = Envelope::new(id, SCHEDULER_RESULT, WireReply::from(reply));
            if replies.send(envelope).await.is_err() {
                debug!(%id, "reply channel closed, dropping reply");
            }
        });
    }
    debug!("request channel closed");
}

/// Runs one request to a reply. Never fails: every error becomes
/// [`Reply::Error`].
pub async fn handle_request(request: SchedulingRequest, config: SchedulerConfig) -> Reply {
    let outcome = tokio::task::spawn_blocking(move || scheduler::run(&request, &config)).await;
    match outcome {
        Ok(result) => Reply::from_outcome(result),
        Err(join_error) => {
            error!(%join_error, "scheduler task aborted");
            Reply::Error(format!("scheduler task aborted: {join_error}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::RequestId;

    #[tokio::test]
    async fn test_reply_keeps_request_id() {
        let (mut channels, _task) = SchedulerService::spawn(SchedulerConfig::default());
        channels
            .requests
            .send(Envelope::new(
                RequestId(42),
                crate::protocol::RUN_SCHEDULER,
                SchedulingRequest::new("FCFS", "1,0,3,1"),
            ))
            .await
            .unwrap();

        let reply = channels.replies.recv().await.unwrap();
        assert_eq!(reply.id, RequestId(42));
        assert_eq!(reply.channel, SCHEDULER_RESULT);
        let result = reply.payload.result.unwrap();
        assert_eq!(result.average_tat, 3.0);
    }

    #[tokio::test]
    async fn test_error_reply() {
        let reply = handle_request(
            SchedulingRequest::new("NOPE", "1,0,3,1"),
            SchedulerConfig::default(),
        )
        .await;
        assert_eq!(reply, Reply::Error("Invalid algorithm choice: NOPE".into()));
    }

    #[tokio::test]
    async fn test_service_stops_when_requests_close() {
        let (channels, task) = SchedulerService::spawn(SchedulerConfig::default());
        let ServiceChannels {
            requests,
            mut replies,
        } = channels;
        drop(requests);
        task.await.unwrap();
        assert!(replies.recv().await.is_none());
    }
}
