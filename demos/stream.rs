//! Stream session - consume a chunked response as typed events.
//!
//! This example demonstrates:
//! - Wiring a `StreamSink`/`ResponseStream` pair with `stream_pair`
//! - Pushing transport chunks from a feeder task
//! - Awaiting `StreamEvent`s until the trailer closes the stream
//!
//! Run with:
//!
//! ```sh
//! cargo run --example stream
//! ```

use std::time::Duration;

use grpcweb_framing::codec::TextCodec;
use grpcweb_framing::protocol::{build_frame, flags};
use grpcweb_framing::{stream_pair, StreamEvent};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Build the wire text a server would produce: three data envelopes
    // and a trailer, encoded as one base64 stream.
    let mut raw = Vec::new();
    for payload in [&b"tick 1"[..], b"tick 2", b"tick 3"] {
        raw.extend_from_slice(&build_frame(flags::DATA, payload)?);
    }
    raw.extend_from_slice(&build_frame(
        flags::TRAILERS,
        b"grpc-status: 0\r\ngrpc-message: watch complete",
    )?);
    let text = TextCodec::encode(&raw);

    let (mut sink, mut events) = stream_pair();

    // Feeder task: deliver the text in small chunks with some delay,
    // the way an HTTP body trickles in.
    let feeder = tokio::spawn(async move {
        for chunk in text.as_bytes().chunks(7) {
            sink.push(std::str::from_utf8(chunk)?)?;
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        sink.close()?;
        Ok::<(), Box<dyn std::error::Error + Send + Sync>>(())
    });

    // Consumer: await events until the channel ends.
    while let Some(event) = events.next_event().await {
        match event? {
            StreamEvent::Message(payload) => {
                println!("message: {}", String::from_utf8_lossy(&payload));
            }
            StreamEvent::Trailers(status) => {
                println!("trailers: {}", status);
            }
        }
    }

    feeder.await??;
    println!("stream finished");

    Ok(())
}
