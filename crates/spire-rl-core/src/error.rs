//! Error types for the Spire-RL bridge

use thiserror::Error;

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Bridge error types
///
/// Transport errors tear down at most one connection; protocol errors
/// discard one frame. Nothing here is ever allowed to reach the host's
/// tick loop as a panic.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Socket-level failure (bind, accept, read, write)
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Inbound frame exceeded the configured bound
    #[error("frame too large: {got} bytes (max {max})")]
    FrameTooLarge { got: usize, max: usize },

    /// Payload did not parse as a protocol message
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Peer closed the stream between frames
    #[error("connection closed")]
    ConnectionClosed,
}
