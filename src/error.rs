//! Error types for grpcweb-framing.

use thiserror::Error;

/// Main error type for all framing operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FramingError {
    /// Base64 decode error on transport text.
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Payload does not fit in the 32-bit length field.
    #[error("Payload length {0} does not fit in the length field")]
    PayloadTooLarge(usize),

    /// Payload announced by an envelope header exceeds the configured limit.
    #[error("Payload size {0} exceeds maximum {1}")]
    PayloadLimitExceeded(u32, u32),

    /// Buffered text kept failing to decode and exceeded the pending cap.
    #[error("Undecodable text: {0} bytes buffered without progress")]
    CorruptText(usize),

    /// Transport ended while an envelope was still incomplete.
    #[error("Stream truncated: {0} byte(s) of partial data buffered")]
    TruncatedStream(usize),

    /// Transport ended without a trailer envelope.
    #[error("Stream ended without trailers")]
    MissingTrailers,

    /// Operation on a stream that already completed or failed.
    #[error("Stream already closed")]
    StreamClosed,

    /// The event receiver was dropped before the stream finished.
    #[error("Event receiver dropped")]
    ReceiverDropped,
}

/// Result type alias using FramingError.
pub type Result<T> = std::result::Result<T, FramingError>;
