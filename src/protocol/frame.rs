//! Envelope frame with typed accessors.
//!
//! Represents one complete envelope extracted from the transport: the flag
//! byte plus the payload. Uses `bytes::Bytes` for zero-copy payload sharing.
//!
//! # Example
//!
//! ```
//! use grpcweb_framing::protocol::{flags, Frame};
//! use bytes::Bytes;
//!
//! let frame = Frame::new(flags::DATA, Bytes::from_static(b"hello"));
//! assert!(frame.is_data());
//! assert_eq!(frame.payload(), b"hello");
//! ```

use bytes::Bytes;

use super::wire_format::{flags, Header, HEADER_SIZE};
use crate::codec::TextCodec;
use crate::error::{FramingError, Result};

/// A complete envelope.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Flags byte from the envelope header.
    pub flags: u8,
    /// Payload bytes (zero-copy via `bytes::Bytes`).
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame from a flag byte and payload.
    pub fn new(flags: u8, payload: Bytes) -> Self {
        Self { flags, payload }
    }

    /// Create a frame from a flag byte and raw bytes (copies data).
    pub fn from_parts(flags: u8, payload: &[u8]) -> Self {
        Self {
            flags,
            payload: Bytes::copy_from_slice(payload),
        }
    }

    /// Get a reference to the payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Get a clone of the payload as Bytes (cheap, zero-copy).
    #[inline]
    pub fn payload_bytes(&self) -> Bytes {
        self.payload.clone()
    }

    /// Get the payload length.
    #[inline]
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// Check if this is a trailer envelope (bit 7 set).
    #[inline]
    pub fn is_trailers(&self) -> bool {
        flags::is_trailers(self.flags)
    }

    /// Check if this is a data envelope (bit 7 clear).
    #[inline]
    pub fn is_data(&self) -> bool {
        !self.is_trailers()
    }
}

/// Check that a payload fits the 32-bit length field.
#[inline]
pub fn validate_payload_len(len: usize) -> Result<()> {
    if len > u32::MAX as usize {
        return Err(FramingError::PayloadTooLarge(len));
    }
    Ok(())
}

/// Build a raw envelope as a single byte vector.
///
/// Encodes the 5-byte header and appends the payload. This is the binary
/// form; [`encode_frame`] renders the text form the transport carries.
///
/// # Example
///
/// ```
/// use grpcweb_framing::protocol::{build_frame, flags, HEADER_SIZE};
///
/// let bytes = build_frame(flags::DATA, b"hello").unwrap();
/// assert_eq!(bytes.len(), HEADER_SIZE + 5);
/// assert_eq!(&bytes[..5], &[0x00, 0x00, 0x00, 0x00, 0x05]);
/// ```
pub fn build_frame(flags: u8, payload: &[u8]) -> Result<Vec<u8>> {
    validate_payload_len(payload.len())?;
    let header = Header::new(flags, payload.len() as u32);

    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
    buf.extend_from_slice(&header.encode());
    buf.extend_from_slice(payload);
    Ok(buf)
}

/// Encode a payload as a transport-ready text envelope.
///
/// Wraps the payload in a data envelope (flag `0x00`) and base64-encodes
/// the whole thing, header included. Trailer envelopes are never produced
/// here; they originate on the server side.
///
/// # Errors
///
/// Returns [`FramingError::PayloadTooLarge`] when the payload length does
/// not fit in the 32-bit length field.
///
/// # Example
///
/// ```
/// use grpcweb_framing::encode_frame;
///
/// let text = encode_frame(&[1, 2, 3]).unwrap();
/// assert_eq!(text, "AAAAAAMBAgM=");
/// ```
pub fn encode_frame(payload: &[u8]) -> Result<String> {
    let raw = build_frame(flags::DATA, payload)?;
    Ok(TextCodec::encode(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_creation() {
        let frame = Frame::new(flags::DATA, Bytes::from_static(b"hello"));

        assert_eq!(frame.flags, flags::DATA);
        assert_eq!(frame.payload(), b"hello");
        assert_eq!(frame.payload_len(), 5);
        assert!(frame.is_data());
        assert!(!frame.is_trailers());
    }

    #[test]
    fn test_frame_from_parts() {
        let frame = Frame::from_parts(flags::TRAILERS, b"grpc-status: 0");

        assert!(frame.is_trailers());
        assert_eq!(frame.payload(), b"grpc-status: 0");
    }

    #[test]
    fn test_frame_empty_payload() {
        let frame = Frame::new(flags::DATA, Bytes::new());

        assert_eq!(frame.payload_len(), 0);
        assert!(frame.payload().is_empty());
    }

    #[test]
    fn test_frame_classification_single_bit() {
        for flags in [0x80u8, 0x81, 0xFF] {
            let frame = Frame::new(flags, Bytes::new());
            assert!(frame.is_trailers(), "flags={flags:#04x}");
        }
        for flags in [0x00u8, 0x01, 0x7F] {
            let frame = Frame::new(flags, Bytes::new());
            assert!(frame.is_data(), "flags={flags:#04x}");
        }
    }

    #[test]
    fn test_payload_bytes_zero_copy() {
        let original = Bytes::from_static(b"test data");
        let frame = Frame::new(flags::DATA, original.clone());

        let cloned = frame.payload_bytes();
        assert_eq!(cloned, original);
        assert_eq!(cloned.as_ptr(), original.as_ptr());
    }

    #[test]
    fn test_build_frame_layout() {
        let bytes = build_frame(flags::DATA, &[1, 2, 3]).unwrap();

        assert_eq!(bytes.len(), HEADER_SIZE + 3);
        assert_eq!(bytes[0], 0x00);
        assert_eq!(&bytes[1..5], &[0x00, 0x00, 0x00, 0x03]); // BE length
        assert_eq!(&bytes[5..], &[1, 2, 3]);
    }

    #[test]
    fn test_build_frame_empty_payload() {
        let bytes = build_frame(flags::DATA, b"").unwrap();
        assert_eq!(bytes, [0x00, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_build_frame_trailer_flag() {
        let bytes = build_frame(flags::TRAILERS, b"x").unwrap();
        assert_eq!(bytes[0], 0x80);

        let header = Header::decode(&bytes).unwrap();
        assert!(header.is_trailers());
        assert_eq!(header.payload_length, 1);
    }

    #[test]
    fn test_encode_frame_known_vector() {
        // Envelope for [1, 2, 3]: 00 00 00 00 03 01 02 03
        assert_eq!(encode_frame(&[1, 2, 3]).unwrap(), "AAAAAAMBAgM=");
    }

    #[test]
    fn test_encode_frame_empty_payload() {
        // Envelope is five zero bytes.
        assert_eq!(encode_frame(b"").unwrap(), "AAAAAAA=");
    }

    #[test]
    fn test_encode_frame_always_emits_data_flag() {
        let text = encode_frame(b"payload").unwrap();
        let raw = TextCodec::decode(&text).unwrap();
        assert_eq!(raw[0], flags::DATA);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_validate_payload_len_limits() {
        assert!(validate_payload_len(0).is_ok());
        assert!(validate_payload_len(u32::MAX as usize).is_ok());

        let result = validate_payload_len(u32::MAX as usize + 1);
        assert!(matches!(result, Err(FramingError::PayloadTooLarge(_))));
    }
}
