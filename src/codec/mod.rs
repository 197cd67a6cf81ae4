//! Codec module - text rendering of envelope bytes.
//!
//! The transport channel only carries text, so every envelope crosses the
//! wire as base64. [`TextCodec`] is the single codec: standard alphabet,
//! padded, applied to whole buffers.
//!
//! # Design
//!
//! The codec is a marker struct with static methods rather than a trait
//! object. Encoding is stateless; all streaming concerns (partial blocks,
//! retained text) live in the protocol-level decoder.
//!
//! # Example
//!
//! ```
//! use grpcweb_framing::codec::TextCodec;
//!
//! let text = TextCodec::encode(&[0x01, 0x02, 0x03]);
//! let raw = TextCodec::decode(&text).unwrap();
//! assert_eq!(raw, [0x01, 0x02, 0x03]);
//! ```

mod text;

pub use text::{TextCodec, ENCODED_BLOCK_SIZE, RAW_BLOCK_SIZE};
