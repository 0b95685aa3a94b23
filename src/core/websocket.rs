/// JSON text-frame codec shared by every message type that crosses the socket
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Failures while turning frames into messages or back
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Inbound text was not a message we understand
    #[error("malformed payload: {source}")]
    Malformed {
        #[source]
        source: serde_json::Error,
    },

    /// Outbound message could not be serialized
    #[error("failed to encode message: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
}

/// Parse one text frame into a message.
pub fn decode<M: DeserializeOwned>(text: &str) -> Result<M, ProtocolError> {
    serde_json::from_str(text).map_err(|source| ProtocolError::Malformed { source })
}

/// Serialize one message into the text of a frame.
pub fn encode<M: Serialize>(msg: &M) -> Result<String, ProtocolError> {
    serde_json::to_string(msg).map_err(|source| ProtocolError::Encode { source })
}
