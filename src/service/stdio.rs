//! Line-delimited JSON transport over a byte stream.
//!
//! The desktop front end launches the backend as a child process and talks
//! to it over stdin/stdout: one request envelope per input line, one reply
//! envelope per output line. Nothing else is ever written to the output.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::server::serve;
use crate::config::SchedulerConfig;
use crate::protocol::{
    decode_line, encode_line, Envelope, Reply, RequestId, SchedulingRequest, WireReply,
    RUN_SCHEDULER, SCHEDULER_RESULT,
};

/// Serves requests read from `reader` and writes replies to `writer` until
/// the input ends and every in-flight request has been answered.
///
/// A line that cannot be decoded gets an error reply with
/// [`RequestId::UNCORRELATED`]; serving continues with the next line.
pub async fn serve_lines<R, W>(reader: R, mut writer: W, config: SchedulerConfig) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (request_tx, request_rx) = mpsc::channel(config.queue_capacity);
    let (reply_tx, mut reply_rx) = mpsc::channel::<Envelope<WireReply>>(config.queue_capacity);

    let service = tokio::spawn(serve(config, request_rx, reply_tx.clone()));

    let writer_task = tokio::spawn(async move {
        while let Some(envelope) = reply_rx.recv().await {
            match encode_line(&envelope) {
                Ok(line) => {
                    writer.write_all(line.as_bytes()).await?;
                    writer.flush().await?;
                }
                Err(e) => warn!(id = %envelope.id, error = %e, "failed to encode reply"),
            }
        }
        writer.flush().await
    });

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match decode_line::<SchedulingRequest>(&line, RUN_SCHEDULER) {
            Ok(envelope) => {
                if request_tx.send(envelope).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                warn!(error = %e, "rejecting input line");
                let reply = WireReply::from(Reply::Error(e.to_string()));
                let envelope = Envelope::new(RequestId::UNCORRELATED, SCHEDULER_RESULT, reply);
                if reply_tx.send(envelope).await.is_err() {
                    break;
                }
            }
        }
    }
    debug!("input closed, draining replies");

    drop(request_tx);
    drop(reply_tx);
    if let Err(e) = service.await {
        warn!(error = %e, "service task failed");
    }

    match writer_task.await {
        Ok(result) => result,
        Err(e) => Err(std::io::Error::other(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokio::io::BufReader;

    async fn run_lines(input: &str) -> Vec<Envelope<WireReply>> {
        let (client, server) = tokio::io::duplex(64 * 1024);
        serve_lines(
            BufReader::new(input.as_bytes()),
            server,
            SchedulerConfig::default(),
        )
        .await
        .unwrap();

        let mut out = Vec::new();
        let mut lines = BufReader::new(client).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            out.push(decode_line(&line, SCHEDULER_RESULT).unwrap());
        }
        out
    }

    #[tokio::test]
    async fn test_serves_each_line() {
        let input = concat!(
            r#"{"id":1,"channel":"runScheduler","payload":{"algorithm":"FCFS","input":"1,0,2,1"}}"#,
            "\n\n",
            r#"{"id":2,"channel":"runScheduler","payload":{"algorithm":"BOGUS","input":"1,0,2,1"}}"#,
            "\n",
        );
        let replies = run_lines(input).await;
        assert_eq!(replies.len(), 2);

        let by_id: HashMap<u64, &WireReply> =
            replies.iter().map(|e| (e.id.0, &e.payload)).collect();
        assert!(by_id[&1].result.is_some());
        assert_eq!(
            by_id[&2].error.as_deref(),
            Some("Invalid algorithm choice: BOGUS")
        );
    }

    #[tokio::test]
    async fn test_malformed_line_gets_uncorrelated_error() {
        let replies = run_lines("{not json}\n").await;
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].id, RequestId::UNCORRELATED);
        assert!(replies[0]
            .payload
            .error
            .as_deref()
            .unwrap()
            .starts_with("malformed message"));
    }

    #[tokio::test]
    async fn test_empty_input() {
        assert!(run_lines("").await.is_empty());
    }
}
