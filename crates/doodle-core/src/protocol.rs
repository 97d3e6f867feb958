//! Relay wire format.
//!
//! The relay forwards payloads without looking at them. Clients agree on this
//! envelope: one committed shape per message, under the `drawing` event.
//!
//! ```json
//! { "event": "drawing", "data": { "kind": "line", "begin": {"x": 0, "y": 0}, ... } }
//! ```

use crate::shapes::Shape;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Event name carried by every drawing message.
pub const DRAWING_EVENT: &str = "drawing";

/// Wire errors.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Malformed relay message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unexpected relay event: {0}")]
    UnexpectedEvent(String),
}

/// A message sent through the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayEnvelope {
    pub event: String,
    pub data: Shape,
}

impl RelayEnvelope {
    pub fn drawing(shape: Shape) -> Self {
        Self {
            event: DRAWING_EVENT.to_string(),
            data: shape,
        }
    }
}

/// Encode a committed shape for the relay.
pub fn encode_shape(shape: &Shape) -> Result<String, ProtocolError> {
    #[derive(Serialize)]
    struct Outgoing<'a> {
        event: &'static str,
        data: &'a Shape,
    }

    Ok(serde_json::to_string(&Outgoing {
        event: DRAWING_EVENT,
        data: shape,
    })?)
}

/// Decode a shape received from the relay.
pub fn decode_shape(text: &str) -> Result<Shape, ProtocolError> {
    let envelope: RelayEnvelope = serde_json::from_str(text)?;
    if envelope.event != DRAWING_EVENT {
        return Err(ProtocolError::UnexpectedEvent(envelope.event));
    }
    Ok(envelope.data)
}
