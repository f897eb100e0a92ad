//! Message envelopes and the line-delimited JSON codec.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::ProtocolError;

/// Correlates a reply with the request that produced it.
///
/// Id 0 is reserved for replies that could not be correlated (e.g. to a
/// line that failed to decode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub u64);

impl RequestId {
    pub const UNCORRELATED: RequestId = RequestId(0);
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A payload addressed to a named channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub id: RequestId,
    pub channel: String,
    pub payload: T,
}

impl<T> Envelope<T> {
    pub fn new(id: RequestId, channel: &str, payload: T) -> Self {
        Self {
            id,
            channel: channel.to_string(),
            payload,
        }
    }
}

/// Serializes an envelope as a single JSON line, newline included.
pub fn encode_line<T: Serialize>(envelope: &Envelope<T>) -> Result<String, ProtocolError> {
    let mut line = serde_json::to_string(envelope)?;
    line.push('\n');
    Ok(line)
}

/// Decodes one JSON line, checking it is addressed to `channel`.
pub fn decode_line<T: DeserializeOwned>(
    line: &str,
    channel: &'static str,
) -> Result<Envelope<T>, ProtocolError> {
    let envelope: Envelope<T> = serde_json::from_str(line.trim())?;
    if envelope.channel != channel {
        return Err(ProtocolError::UnexpectedChannel {
            expected: channel,
            found: envelope.channel,
        });
    }
    Ok(envelope)
}
