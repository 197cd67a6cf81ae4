//! Text codec - base64 rendering of envelope bytes.
//!
//! The transport only carries text, so raw envelope bytes travel as
//! standard, padded base64. Four text characters encode three raw bytes;
//! the incremental decoder relies on `decodable_len` to find the largest
//! prefix it may decode without splitting a block.
//!
//! # Example
//!
//! ```
//! use grpcweb_framing::codec::TextCodec;
//!
//! let text = TextCodec::encode(b"abc");
//! assert_eq!(text, "YWJj");
//! assert_eq!(TextCodec::decode(&text).unwrap(), b"abc");
//!
//! // Only whole 4-character blocks are decodable.
//! assert_eq!(TextCodec::decodable_len("YWJjYW"), 4);
//! ```

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::Result;

/// Characters per base64 block.
pub const ENCODED_BLOCK_SIZE: usize = 4;

/// Raw bytes per base64 block.
pub const RAW_BLOCK_SIZE: usize = 3;

/// Codec for the text representation of envelope bytes.
///
/// Standard alphabet with padding, applied to whole buffers. Stateless;
/// the incremental decoder owns all buffering.
pub struct TextCodec;

impl TextCodec {
    /// Encode raw bytes as transport text.
    #[inline]
    pub fn encode(raw: &[u8]) -> String {
        STANDARD.encode(raw)
    }

    /// Decode transport text into raw bytes.
    ///
    /// The input must be whole blocks; use [`TextCodec::decodable_len`]
    /// to trim a streaming buffer first.
    #[inline]
    pub fn decode(text: &str) -> Result<Vec<u8>> {
        Ok(STANDARD.decode(text)?)
    }

    /// Length of the largest decodable prefix: the input length rounded
    /// down to a multiple of the block size.
    #[inline]
    pub fn decodable_len(text: &str) -> usize {
        text.len() / ENCODED_BLOCK_SIZE * ENCODED_BLOCK_SIZE
    }

    /// Text length produced by encoding `raw_len` bytes (padding included).
    #[inline]
    pub fn encoded_len(raw_len: usize) -> usize {
        raw_len.div_ceil(RAW_BLOCK_SIZE) * ENCODED_BLOCK_SIZE
    }
}
