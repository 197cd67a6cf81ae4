//! Wire format encoding and decoding.
//!
//! Implements the 5-byte envelope header:
//! ```text
//! ┌───────┬──────────┐
//! │ Flags │ Length   │
//! │ 1 byte│ 4 bytes  │
//! │       │ uint32 BE│
//! └───────┴──────────┘
//! ```
//!
//! The length field counts payload bytes only. Multi-byte integers are
//! Big Endian.

use crate::error::{FramingError, Result};

/// Header size in bytes (fixed, exactly 5).
pub const HEADER_SIZE: usize = 5;

/// Default maximum payload size (4 MB, the usual RPC message cap).
pub const DEFAULT_MAX_PAYLOAD_SIZE: u32 = 4 * 1024 * 1024;

/// Default maximum pending text the decoder holds while the transport
/// keeps delivering undecodable input (64 KB).
pub const DEFAULT_MAX_PENDING_TEXT: usize = 64 * 1024;

/// Flag constants for the envelope flag byte.
pub mod flags {
    /// Data envelope (no bits set). The only value the encoder emits.
    pub const DATA: u8 = 0x00;

    /// Trailer envelope: bit 7 marks end-of-stream metadata.
    pub const TRAILERS: u8 = 0b1000_0000;

    /// Check if a specific flag is set.
    #[inline]
    pub fn has_flag(flags: u8, flag: u8) -> bool {
        flags & flag != 0
    }

    /// Check if a flag byte marks a trailer envelope.
    ///
    /// Only bit 7 participates in classification; every other bit pattern
    /// is handled as data.
    #[inline]
    pub fn is_trailers(flags: u8) -> bool {
        has_flag(flags, TRAILERS)
    }
}

/// Decoded envelope header.
///
/// # Example
///
/// ```
/// use grpcweb_framing::protocol::{flags, Header, HEADER_SIZE};
///
/// let header = Header::new(flags::TRAILERS, 16);
/// let bytes = header.encode();
/// assert_eq!(bytes.len(), HEADER_SIZE);
/// assert!(Header::decode(&bytes).unwrap().is_trailers());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Flags byte (see [`flags`]).
    pub flags: u8,
    /// Payload length in bytes.
    pub payload_length: u32,
}

impl Header {
    /// Create a new header.
    pub fn new(flags: u8, payload_length: u32) -> Self {
        Self {
            flags,
            payload_length,
        }
    }

    /// Encode header to bytes (Big Endian length).
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        self.encode_into(&mut buf);
        buf
    }

    /// Encode header into an existing buffer.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is smaller than `HEADER_SIZE` (5 bytes).
    pub fn encode_into(&self, buf: &mut [u8]) {
        debug_assert!(buf.len() >= HEADER_SIZE);
        buf[0] = self.flags;
        buf[1..5].copy_from_slice(&self.payload_length.to_be_bytes());
    }

    /// Decode a header from bytes (Big Endian length).
    ///
    /// Returns `None` if the buffer is too short.
    pub fn decode(buf: &[u8]) -> Option<Self> {
        if buf.len() < HEADER_SIZE {
            return None;
        }
        Some(Self {
            flags: buf[0],
            payload_length: u32::from_be_bytes([buf[1], buf[2], buf[3], buf[4]]),
        })
    }

    /// Validate the announced payload size against a limit.
    ///
    /// Every flag byte value is legal; classification reads only bit 7, so
    /// the length field is the single thing to check.
    pub fn validate(&self, max_payload_size: u32) -> Result<()> {
        if self.payload_length > max_payload_size {
            return Err(FramingError::PayloadLimitExceeded(
                self.payload_length,
                max_payload_size,
            ));
        }
        Ok(())
    }

    /// Check if this header marks a trailer envelope.
    #[inline]
    pub fn is_trailers(&self) -> bool {
        flags::is_trailers(self.flags)
    }
}
