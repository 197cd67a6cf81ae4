//! Roundtrip - encode envelopes and decode them from ragged chunks.
//!
//! This example demonstrates:
//! - Encoding a request payload into envelope text with `encode_frame`
//! - Building a multi-envelope response stream with `build_frame`
//! - Feeding a `FrameDecoder` chunks that ignore envelope boundaries
//! - Recovering every envelope intact and in order
//!
//! Run with:
//!
//! ```sh
//! cargo run --example roundtrip
//! ```

use grpcweb_framing::codec::TextCodec;
use grpcweb_framing::protocol::{build_frame, flags};
use grpcweb_framing::{encode_frame, FrameDecoder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A request body carries a single envelope, padded and complete.
    let request = encode_frame(b"list users")?;
    println!("request text: {}", request);

    // A response stream is one base64 text over all envelope bytes.
    let mut raw = Vec::new();
    for payload in [&b"alpha"[..], b"beta", b"gamma"] {
        raw.extend_from_slice(&build_frame(flags::DATA, payload)?);
    }
    let text = TextCodec::encode(&raw);
    println!("response text ({} chars): {}", text.len(), text);

    // Feed the text back in 3-character chunks, as a transport might.
    let mut decoder = FrameDecoder::new();
    for chunk in text.as_bytes().chunks(3) {
        let frames = decoder.push(std::str::from_utf8(chunk)?)?;
        for frame in frames {
            println!(
                "decoded envelope: flags={:#04x} payload={:?}",
                frame.flags,
                String::from_utf8_lossy(frame.payload())
            );
        }
    }

    assert!(!decoder.has_partial());
    println!("no partial input left behind");

    Ok(())
}
