//! Front-end side: sends requests and routes replies back to their callers.
//!
//! Every request gets a fresh [`RequestId`] and a slot in
//! [`PendingRequests`]. A router task reads the reply channel and hands
//! each reply to the slot with the matching id, so two overlapping
//! requests can never receive each other's result.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::server::{SchedulerService, ServiceChannels};
use crate::config::SchedulerConfig;
use crate::protocol::{Envelope, Reply, RequestId, SchedulingRequest, WireReply, RUN_SCHEDULER};

/// Client-side failures. A scheduling failure is not one of these: it
/// arrives as [`Reply::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("scheduler service is not running")]
    Closed,
    #[error("no reply to request {0} within {1:?}")]
    Timeout(RequestId, Duration),
    #[error("request {0} was abandoned before a reply arrived")]
    Abandoned(RequestId),
}

/// Outstanding requests keyed by id.
#[derive(Debug, Default)]
pub struct PendingRequests {
    slots: Mutex<HashMap<RequestId, oneshot::Sender<Reply>>>,
}

impl PendingRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a slot for `id`.
    pub fn register(&self, id: RequestId) -> oneshot::Receiver<Reply> {
        let (tx, rx) = oneshot::channel();
        self.lock().insert(id, tx);
        rx
    }

    /// Delivers `reply` to the slot for `id`. Returns `false` if no such
    /// request is outstanding.
    pub fn resolve(&self, id: RequestId, reply: Reply) -> bool {
        match self.lock().remove(&id) {
            // The waiter may have given up; that still counts as resolved.
            Some(tx) => {
                let _ = tx.send(reply);
                true
            }
            None => false,
        }
    }

    /// Drops the slot for `id` without a reply.
    pub fn cancel(&self, id: RequestId) {
        self.lock().remove(&id);
    }

    /// Drops every slot; waiters observe [`ClientError::Abandoned`].
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<RequestId, oneshot::Sender<Reply>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A reply that has not arrived yet.
#[derive(Debug)]
pub struct PendingReply {
    id: RequestId,
    rx: oneshot::Receiver<Reply>,
    timeout: Option<Duration>,
    pending: Arc<PendingRequests>,
}

impl PendingReply {
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Waits for the reply, up to the configured timeout if any.
    pub async fn wait(self) -> Result<Reply, ClientError> {
        let id = self.id;
        let received = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, self.rx).await {
                Ok(received) => received,
                Err(_) => {
                    self.pending.cancel(id);
                    return Err(ClientError::Timeout(id, limit));
                }
            },
            None => self.rx.await,
        };
        received.map_err(|_| ClientError::Abandoned(id))
    }
}

/// Sends scheduling requests and matches replies to them.
#[derive(Debug)]
pub struct SchedulerClient {
    requests: mpsc::Sender<Envelope<SchedulingRequest>>,
    pending: Arc<PendingRequests>,
    next_id: AtomicU64,
    timeout: Option<Duration>,
    router: JoinHandle<()>,
}

impl SchedulerClient {
    /// Attaches to a request sender and a reply receiver.
    pub fn new(channels: ServiceChannels, config: &SchedulerConfig) -> Self {
        let pending = Arc::new(PendingRequests::new());
        let router = tokio::spawn(route_replies(channels.replies, Arc::clone(&pending)));
        Self {
            requests: channels.requests,
            pending,
            next_id: AtomicU64::new(1),
            timeout: config.request_timeout(),
            router,
        }
    }

    /// Spawns an in-process [`SchedulerService`] and connects to it.
    pub fn connect(config: SchedulerConfig) -> Self {
        let (channels, _service) = SchedulerService::spawn(config.clone());
        Self::new(channels, &config)
    }

    /// Sends a request and returns a handle to its reply.
    pub async fn submit(&self, request: SchedulingRequest) -> Result<PendingReply, ClientError> {
        let id = RequestId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let rx = self.pending.register(id);
        debug!(%id, algorithm = %request.algorithm, "sending request");

        let envelope = Envelope::new(id, RUN_SCHEDULER, request);
        if self.requests.send(envelope).await.is_err() {
            self.pending.cancel(id);
            return Err(ClientError::Closed);
        }

        Ok(PendingReply {
            id,
            rx,
            timeout: self.timeout,
            pending: Arc::clone(&self.pending),
        })
    }

    /// Sends a request and waits for its reply.
    pub async fn request(&self, request: SchedulingRequest) -> Result<Reply, ClientError> {
        self.submit(request).await?.wait().await
    }

    /// Number of requests still waiting for a reply.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Drop for SchedulerClient {
    fn drop(&mut self) {
        self.router.abort();
    }
}

/// Routes replies to their pending slots until the reply channel closes.
async fn route_replies(
    mut replies: mpsc::Receiver<Envelope<WireReply>>,
    pending: Arc<PendingRequests>,
) {
    while let Some(envelope) = replies.recv().await {
        let id = envelope.id;
        let reply = Reply::try_from(envelope.payload)
            .unwrap_or_else(|e| Reply::Error(format!("malformed reply: {e}")));

        if !pending.resolve(id, reply) {
            warn!(%id, "reply for unknown request dropped");
        }
    }
    debug!("reply channel closed");
    pending.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::SCHEDULER_RESULT;

    fn manual_client(config: &SchedulerConfig) -> (
        SchedulerClient,
        mpsc::Receiver<Envelope<SchedulingRequest>>,
        mpsc::Sender<Envelope<WireReply>>,
    ) {
        let (request_tx, request_rx) = mpsc::channel(8);
        let (reply_tx, reply_rx) = mpsc::channel(8);
        let client = SchedulerClient::new(
            ServiceChannels {
                requests: request_tx,
                replies: reply_rx,
            },
            config,
        );
        (client, request_rx, reply_tx)
    }

    fn error_reply(id: RequestId, message: &str) -> Envelope<WireReply> {
        Envelope::new(id, SCHEDULER_RESULT, WireReply::from(Reply::Error(message.into())))
    }

    #[tokio::test]
    async fn test_round_trip_through_service() {
        let client = SchedulerClient::connect(SchedulerConfig::default());
        let reply = client
            .request(SchedulingRequest::new("SJF", "1,0,4,1;2,0,1,1"))
            .await
            .unwrap();
        match reply {
            Reply::Success(r) => assert_eq!(r.processes[0].id, 2),
            Reply::Error(e) => panic!("unexpected error: {e}"),
        }
        assert_eq!(client.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_out_of_order_replies_reach_their_requests() {
        let (client, mut requests, replies) = manual_client(&SchedulerConfig::default());

        let first = client.submit(SchedulingRequest::new("FCFS", "a")).await.unwrap();
        let second = client.submit(SchedulingRequest::new("FCFS", "b")).await.unwrap();
        assert_ne!(first.id(), second.id());
        assert_eq!(client.pending_count(), 2);

        let r1 = requests.recv().await.unwrap();
        let r2 = requests.recv().await.unwrap();
        assert_eq!(r1.payload.input, "a");

        // Answer the second request first.
        replies.send(error_reply(r2.id, "second")).await.unwrap();
        replies.send(error_reply(r1.id, "first")).await.unwrap();

        assert_eq!(first.wait().await.unwrap(), Reply::Error("first".into()));
        assert_eq!(second.wait().await.unwrap(), Reply::Error("second".into()));
    }

    #[tokio::test]
    async fn test_unknown_reply_is_dropped() {
        let (client, mut requests, replies) = manual_client(&SchedulerConfig::default());
        let pending = client.submit(SchedulingRequest::new("FCFS", "x")).await.unwrap();
        let req = requests.recv().await.unwrap();

        replies.send(error_reply(RequestId(999), "stray")).await.unwrap();
        replies.send(error_reply(req.id, "mine")).await.unwrap();
        assert_eq!(pending.wait().await.unwrap(), Reply::Error("mine".into()));
    }

    #[tokio::test]
    async fn test_malformed_reply_becomes_error() {
        let (client, mut requests, replies) = manual_client(&SchedulerConfig::default());
        let pending = client.submit(SchedulingRequest::new("FCFS", "x")).await.unwrap();
        let req = requests.recv().await.unwrap();

        replies
            .send(Envelope::new(req.id, SCHEDULER_RESULT, WireReply::default()))
            .await
            .unwrap();
        match pending.wait().await.unwrap() {
            Reply::Error(e) => assert!(e.starts_with("malformed reply")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_cancels_slot() {
        let config = SchedulerConfig {
            request_timeout_ms: Some(100),
            ..SchedulerConfig::default()
        };
        let (client, _requests, _replies) = manual_client(&config);
        let pending = client.submit(SchedulingRequest::new("FCFS", "x")).await.unwrap();
        let id = pending.id();

        let err = pending.wait().await.unwrap_err();
        assert_eq!(err, ClientError::Timeout(id, Duration::from_millis(100)));
        assert_eq!(client.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_closed_service() {
        let (client, requests, _replies) = manual_client(&SchedulerConfig::default());
        drop(requests);
        let err = client
            .submit(SchedulingRequest::new("FCFS", "x"))
            .await
            .unwrap_err();
        assert_eq!(err, ClientError::Closed);
        assert_eq!(client.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_reply_channel_closing_abandons_waiters() {
        let (client, _requests, replies) = manual_client(&SchedulerConfig::default());
        let pending = client.submit(SchedulingRequest::new("FCFS", "x")).await.unwrap();
        let id = pending.id();
        drop(replies);
        assert_eq!(pending.wait().await.unwrap_err(), ClientError::Abandoned(id));
    }

    #[test]
    fn test_pending_requests_resolve() {
        let pending = PendingRequests::new();
        let mut rx = pending.register(RequestId(1));
        assert_eq!(pending.len(), 1);
        assert!(pending.resolve(RequestId(1), Reply::Error("x".into())));
        assert!(!pending.resolve(RequestId(1), Reply::Error("y".into())));
        assert_eq!(rx.try_recv().unwrap(), Reply::Error("x".into()));
        assert!(pending.is_empty());
    }
}
