//! Wire protocol: envelope layout, encoding, incremental decoding, and
//! trailer parsing.
//!
//! Every message travels as an envelope of `[flags: u8][length: u32 BE]`
//! followed by `length` payload bytes, with the whole byte stream carried
//! over the transport as base64 text. [`encode_frame`] produces outgoing
//! text, [`FrameDecoder`] recovers envelopes from arbitrarily chunked
//! incoming text, and [`parse_trailers`] interprets the final envelope of
//! a stream.

mod decoder;
mod frame;
mod trailers;
mod wire_format;

pub use decoder::FrameDecoder;
pub use frame::{build_frame, encode_frame, validate_payload_len, Frame};
pub use trailers::parse_trailers;
pub use wire_format::{
    flags, Header, DEFAULT_MAX_PAYLOAD_SIZE, DEFAULT_MAX_PENDING_TEXT, HEADER_SIZE,
};
