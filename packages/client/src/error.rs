//! Error types for the chat client.

use std::time::Duration;

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ChatError {
    /// No open connection can accept the frame
    #[error("Not connected")]
    NotConnected,

    /// The connection task is gone or rejected the frame
    #[error("Failed to send frame: {0}")]
    SendFailed(String),

    /// Outbound intent could not be serialized
    #[error("Failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),

    /// Handshake or socket failure
    #[error("Connection error: {0}")]
    Connection(String),

    /// Handshake did not finish within the configured timeout
    #[error("Connection attempt timed out after {0:?}")]
    Timeout(Duration),
}
