//! Incremental decoder for text-framed envelope streams.
//!
//! Transport chunks arrive as base64 text cut at arbitrary points. The
//! decoder buffers text until whole 4-character blocks are available,
//! decodes those, and runs a state machine over the raw bytes:
//! - `WaitingForHeader`: need at least 5 bytes
//! - `WaitingForPayload`: header parsed, need N more payload bytes
//!
//! No byte is ever dropped: text that is not yet decodable and raw bytes
//! that do not yet form a complete envelope stay buffered across calls.
//!
//! # Example
//!
//! ```
//! use grpcweb_framing::{encode_frame, FrameDecoder};
//!
//! let mut decoder = FrameDecoder::new();
//! let text = encode_frame(b"hello").unwrap();
//!
//! // A cut that respects neither block nor envelope boundaries.
//! let frames = decoder.push(&text[..6]).unwrap();
//! assert!(frames.is_empty());
//!
//! let frames = decoder.push(&text[6..]).unwrap();
//! assert_eq!(frames.len(), 1);
//! assert_eq!(frames[0].payload(), b"hello");
//! ```

use bytes::{Bytes, BytesMut};

use super::wire_format::{
    Header, DEFAULT_MAX_PAYLOAD_SIZE, DEFAULT_MAX_PENDING_TEXT, HEADER_SIZE,
};
use super::Frame;
use crate::codec::TextCodec;
use crate::error::{FramingError, Result};

/// State machine for envelope parsing.
#[derive(Debug, Clone)]
enum State {
    /// Waiting for a complete header (need 5 bytes).
    WaitingForHeader,
    /// Header parsed, waiting for payload bytes.
    WaitingForPayload { header: Header, remaining: u32 },
}

/// Streaming decoder that turns text chunks into complete envelopes.
///
/// Owned by the caller and fed through `&mut self`; all partial input lives
/// inside the value, so one decoder tracks exactly one transport stream.
pub struct FrameDecoder {
    /// Text not yet decoded: a sub-block remainder, or the whole buffer
    /// while it refuses to decode.
    pending: String,
    /// Decoded bytes not yet consumed by a complete envelope.
    buffer: BytesMut,
    /// Current parsing state.
    state: State,
    /// Maximum allowed payload size.
    max_payload_size: u32,
    /// Maximum pending text before undecodable input counts as corrupt.
    max_pending_text: usize,
}

impl FrameDecoder {
    /// Create a decoder with default limits.
    ///
    /// Max payload: 4 MB, max pending text: 64 KB.
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_PAYLOAD_SIZE, DEFAULT_MAX_PENDING_TEXT)
    }

    /// Create a decoder with a custom max payload size.
    pub fn with_max_payload(max_payload_size: u32) -> Self {
        Self::with_limits(max_payload_size, DEFAULT_MAX_PENDING_TEXT)
    }

    /// Create a decoder with custom payload and pending-text limits.
    pub fn with_limits(max_payload_size: u32, max_pending_text: usize) -> Self {
        Self {
            pending: String::new(),
            buffer: BytesMut::with_capacity(8 * 1024),
            state: State::WaitingForHeader,
            max_payload_size,
            max_pending_text,
        }
    }

    /// Push a text chunk and extract all complete envelopes.
    ///
    /// This is the main API for processing incoming transport data. Chunks
    /// may be cut anywhere: mid-block, mid-header, mid-payload. Partial
    /// data is buffered internally for the next push.
    ///
    /// # Arguments
    ///
    /// * `chunk` - Text received from the transport
    ///
    /// # Returns
    ///
    /// Vector of complete envelopes, in stream order (may be empty).
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::PayloadLimitExceeded`] when a header
    /// announces a payload above the configured limit, and
    /// [`FramingError::CorruptText`] when undecodable text outgrows the
    /// pending cap. Both are fatal for the stream.
    pub fn push(&mut self, chunk: &str) -> Result<Vec<Frame>> {
        self.pending.push_str(chunk);

        let decodable = TextCodec::decodable_len(&self.pending);
        if decodable > 0 {
            // `get` refuses a boundary inside a multibyte character; such
            // a prefix cannot be valid base64, so it joins the retain path.
            let decoded = self
                .pending
                .get(..decodable)
                .and_then(|prefix| TextCodec::decode(prefix).ok());

            match decoded {
                Some(raw) => {
                    self.buffer.extend_from_slice(&raw);
                    self.pending.drain(..decodable);
                }
                None => {
                    // Keep the whole buffer and retry once more text
                    // arrives; past the cap the stream counts as corrupt.
                    if self.pending.len() > self.max_pending_text {
                        return Err(FramingError::CorruptText(self.pending.len()));
                    }
                    return Ok(Vec::new());
                }
            }
        }

        let mut frames = Vec::new();
        while let Some(frame) = self.try_extract_one()? {
            frames.push(frame);
        }
        Ok(frames)
    }

    /// Try to extract a single envelope from the decoded bytes.
    ///
    /// Returns:
    /// - `Ok(Some(frame))` if a complete envelope was extracted
    /// - `Ok(None)` if more data is needed
    /// - `Err(...)` if the announced payload exceeds the limit
    fn try_extract_one(&mut self) -> Result<Option<Frame>> {
        match &self.state {
            State::WaitingForHeader => {
                if self.buffer.len() < HEADER_SIZE {
                    return Ok(None);
                }

                // Peek the header, validate, then consume it
                let header = Header::decode(&self.buffer[..HEADER_SIZE])
                    .expect("buffer has enough bytes");
                header.validate(self.max_payload_size)?;

                let _ = self.buffer.split_to(HEADER_SIZE);

                if header.payload_length == 0 {
                    return Ok(Some(Frame::new(header.flags, Bytes::new())));
                }

                self.state = State::WaitingForPayload {
                    header,
                    remaining: header.payload_length,
                };

                // Try to get the payload immediately
                self.try_extract_one()
            }

            State::WaitingForPayload { header, remaining } => {
                let remaining = *remaining as usize;

                if self.buffer.len() < remaining {
                    return Ok(None);
                }

                // Extract payload (zero-copy freeze)
                let payload = self.buffer.split_to(remaining).freeze();
                let flags = header.flags;

                self.state = State::WaitingForHeader;

                Ok(Some(Frame::new(flags, payload)))
            }
        }
    }

    /// Number of undecoded text bytes currently buffered.
    pub fn pending_text_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of decoded bytes awaiting a complete envelope.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Bytes held that do not yet form a complete envelope: pending text,
    /// decoded residue, and a consumed header whose payload is outstanding.
    pub fn partial_len(&self) -> usize {
        let consumed_header = match self.state {
            State::WaitingForPayload { .. } => HEADER_SIZE,
            State::WaitingForHeader => 0,
        };
        self.pending.len() + self.buffer.len() + consumed_header
    }

    /// Check if the decoder holds any partial input.
    ///
    /// A stream that ends while this is true was cut off mid-envelope.
    pub fn has_partial(&self) -> bool {
        self.partial_len() > 0
    }

    /// Clear all buffered data and reset state.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.buffer.clear();
        self.state = State::WaitingForHeader;
    }

    /// Get the current state for debugging.
    #[cfg(test)]
    fn state_name(&self) -> &'static str {
        match &self.state {
            State::WaitingForHeader => "WaitingForHeader",
            State::WaitingForPayload { .. } => "WaitingForPayload",
        }
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}
