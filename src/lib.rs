//! # grpcweb-framing
//!
//! Framing codec for the gRPC-Web text protocol: envelope encoding,
//! incremental decoding of base64 text chunks, trailer parsing, and a
//! small stream session layer.
//!
//! Messages travel as envelopes of `[flags: u8][length: u32 BE][payload]`,
//! and the whole envelope stream is carried as one base64 text stream.
//! Transports cut that text anywhere, so decoding is stateful: partial
//! blocks and partial envelopes are buffered until completed, and no byte
//! is ever dropped.
//!
//! ## Architecture
//!
//! - **Encoding**: [`encode_frame`] wraps a payload into envelope text
//! - **Decoding**: [`FrameDecoder`] turns arbitrary text chunks back into
//!   complete [`Frame`]s
//! - **Sessions**: [`stream_pair`] couples a decoder to an event channel,
//!   classifying envelopes into messages and trailers
//!
//! ## Example
//!
//! ```
//! use grpcweb_framing::{encode_frame, FrameDecoder};
//!
//! let text = encode_frame(b"ping").unwrap();
//!
//! let mut decoder = FrameDecoder::new();
//! let frames = decoder.push(&text).unwrap();
//!
//! assert_eq!(frames.len(), 1);
//! assert_eq!(frames[0].payload(), b"ping");
//! ```

pub mod codec;
pub mod error;
pub mod protocol;
pub mod status;

mod stream;

pub use error::{FramingError, Result};
pub use protocol::{encode_frame, parse_trailers, Frame, FrameDecoder};
pub use status::{Status, StatusCode};
pub use stream::{stream_pair, stream_pair_with, ResponseStream, StreamEvent, StreamSink};
