//! Integration tests for grpcweb-framing.
//!
//! These tests run whole streams through the public API: encoding,
//! chunked decoding, trailer parsing, and the session layer together.

use grpcweb_framing::codec::TextCodec;
use grpcweb_framing::protocol::{build_frame, flags, validate_payload_len, Header};
use grpcweb_framing::{
    encode_frame, parse_trailers, stream_pair, stream_pair_with, FrameDecoder, FramingError,
    StatusCode, StreamEvent,
};

/// Render several envelopes as one continuous transport text stream.
fn stream_text(envelopes: &[(u8, &[u8])]) -> String {
    let mut raw = Vec::new();
    for (flags, payload) in envelopes {
        raw.extend_from_slice(&build_frame(*flags, payload).unwrap());
    }
    TextCodec::encode(&raw)
}

/// Test the basic encode/decode roundtrip for a small payload.
#[test]
fn test_encode_decode_roundtrip() {
    let text = encode_frame(&[1, 2, 3]).unwrap();
    assert_eq!(text, "AAAAAAMBAgM=");

    let mut decoder = FrameDecoder::new();
    let frames = decoder.push(&text).unwrap();

    assert_eq!(frames.len(), 1);
    assert!(frames[0].is_data());
    assert_eq!(frames[0].payload(), &[1, 2, 3][..]);
    assert!(!decoder.has_partial());
}

/// Test two envelopes delivered one character at a time.
#[test]
fn test_char_at_a_time_stream() {
    let text = stream_text(&[
        (flags::DATA, b"first message"),
        (flags::DATA, b"second message"),
    ]);

    let mut decoder = FrameDecoder::new();
    let mut frames = Vec::new();
    for i in 0..text.len() {
        frames.extend(decoder.push(&text[i..i + 1]).unwrap());
    }

    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].payload(), b"first message");
    assert_eq!(frames[1].payload(), b"second message");
    assert!(!decoder.has_partial());
}

/// Test that any two-way split of a stream decodes identically.
#[test]
fn test_every_two_way_split() {
    let text = stream_text(&[
        (flags::DATA, b"alpha"),
        (flags::DATA, &[0xDE, 0xAD, 0xBE, 0xEF]),
        (flags::DATA, b""),
    ]);

    for cut in 0..=text.len() {
        let mut decoder = FrameDecoder::new();
        let mut frames = Vec::new();
        frames.extend(decoder.push(&text[..cut]).unwrap());
        frames.extend(decoder.push(&text[cut..]).unwrap());

        assert_eq!(frames.len(), 3, "wrong frame count for cut at {}", cut);
        assert_eq!(frames[0].payload(), b"alpha");
        assert_eq!(frames[1].payload(), &[0xDE, 0xAD, 0xBE, 0xEF][..]);
        assert!(frames[2].payload().is_empty());
        assert!(!decoder.has_partial(), "residue left for cut at {}", cut);
    }
}

/// Test three-way cuts landing inside header, payload, and padding.
#[test]
fn test_awkward_three_way_cuts() {
    let text = stream_text(&[(flags::DATA, b"payload one"), (flags::TRAILERS, b"grpc-status: 0")]);

    for (i, j) in [(1, 2), (3, 7), (5, 6), (9, 10), (2, text.len() - 1)] {
        let mut decoder = FrameDecoder::new();
        let mut frames = Vec::new();
        frames.extend(decoder.push(&text[..i]).unwrap());
        frames.extend(decoder.push(&text[i..j]).unwrap());
        frames.extend(decoder.push(&text[j..]).unwrap());

        assert_eq!(frames.len(), 2, "wrong frame count for cuts ({}, {})", i, j);
        assert_eq!(frames[0].payload(), b"payload one");
        assert!(frames[1].is_trailers());
    }
}

/// Test trailer parsing of an explicit status and message.
#[test]
fn test_trailer_status_and_message() {
    let mut decoder = FrameDecoder::new();
    let text = stream_text(&[(flags::TRAILERS, b"grpc-status: 5\r\ngrpc-message: not found")]);

    let frames = decoder.push(&text).unwrap();
    assert_eq!(frames.len(), 1);
    assert!(frames[0].is_trailers());

    let status = parse_trailers(frames[0].payload());
    assert_eq!(status.code, StatusCode::NotFound);
    assert_eq!(status.message, "not found");
}

/// Test that an empty trailer payload means success.
#[test]
fn test_empty_trailer_defaults() {
    let mut decoder = FrameDecoder::new();
    let text = stream_text(&[(flags::TRAILERS, b"")]);

    let frames = decoder.push(&text).unwrap();
    assert_eq!(frames.len(), 1);
    assert!(frames[0].is_trailers());
    assert!(frames[0].payload().is_empty());

    let status = parse_trailers(frames[0].payload());
    assert_eq!(status.code, StatusCode::Ok);
    assert_eq!(status.message, "");
}

/// Test that only bit 7 of the flag byte selects trailer classification.
#[test]
fn test_trailer_bit_classification() {
    for flag in [0x80u8, 0x81, 0xAA, 0xFF] {
        let mut decoder = FrameDecoder::new();
        let frames = decoder.push(&stream_text(&[(flag, b"x")])).unwrap();
        assert!(frames[0].is_trailers(), "flag {:#04x}", flag);
    }

    for flag in [0x00u8, 0x01, 0x2A, 0x7F] {
        let mut decoder = FrameDecoder::new();
        let frames = decoder.push(&stream_text(&[(flag, b"x")])).unwrap();
        assert!(frames[0].is_data(), "flag {:#04x}", flag);
    }
}

/// Test the oversize payload guard at the u32 boundary.
#[cfg(target_pointer_width = "64")]
#[test]
fn test_oversize_payload_rejected() {
    assert!(validate_payload_len(u32::MAX as usize).is_ok());

    let result = validate_payload_len(u32::MAX as usize + 1);
    assert!(matches!(result, Err(FramingError::PayloadTooLarge(_))));
}

/// Test a large payload fed through prime-sized chunks.
#[test]
fn test_large_payload_chunked() {
    let payload: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
    let text = stream_text(&[(flags::DATA, &payload)]);

    let mut decoder = FrameDecoder::new();
    let mut frames = Vec::new();
    for chunk in text.as_bytes().chunks(1021) {
        frames.extend(decoder.push(std::str::from_utf8(chunk).unwrap()).unwrap());
    }

    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].payload(), &payload[..]);
}

/// Test that undecodable text is tolerated until the pending cap.
#[test]
fn test_corrupt_text_past_cap() {
    let mut decoder = FrameDecoder::with_limits(1024, 16);

    assert!(decoder.push("!!!not base64!!!").unwrap().is_empty());

    let result = decoder.push("....");
    assert!(matches!(result, Err(FramingError::CorruptText(20))));
}

/// Test a complete session: messages, trailers, clean close.
#[tokio::test]
async fn test_session_full_flow() {
    let (mut sink, mut events) = stream_pair();
    let text = stream_text(&[
        (flags::DATA, b"one"),
        (flags::DATA, b"two"),
        (flags::TRAILERS, b"grpc-status: 0\r\ngrpc-message: all done"),
    ]);

    for chunk in text.as_bytes().chunks(5) {
        sink.push(std::str::from_utf8(chunk).unwrap()).unwrap();
    }
    sink.close().unwrap();

    let mut messages = Vec::new();
    let mut trailer_status = None;
    while let Some(event) = events.next_event().await {
        match event.unwrap() {
            StreamEvent::Message(payload) => messages.push(payload),
            StreamEvent::Trailers(status) => trailer_status = Some(status),
        }
    }

    assert_eq!(messages.len(), 2);
    assert_eq!(&messages[0][..], b"one");
    assert_eq!(&messages[1][..], b"two");

    let status = trailer_status.unwrap();
    assert_eq!(status.code, StatusCode::Ok);
    assert_eq!(status.message, "all done");
}

/// Test that a transport cut mid-envelope surfaces as truncation.
#[tokio::test]
async fn test_session_truncated_stream() {
    let (mut sink, mut events) = stream_pair();
    let text = stream_text(&[(flags::DATA, b"cut short")]);

    sink.push(&text[..text.len() / 2]).unwrap();
    let result = sink.close();

    assert!(matches!(result, Err(FramingError::TruncatedStream(_))));
    assert!(matches!(
        events.next_event().await,
        Some(Err(FramingError::TruncatedStream(_)))
    ));
    assert_eq!(events.next_event().await, None);
}

/// Test that end of input without trailers is an error.
#[tokio::test]
async fn test_session_missing_trailers() {
    let (mut sink, mut events) = stream_pair();
    let text = stream_text(&[(flags::DATA, b"data but no status")]);

    sink.push(&text).unwrap();
    assert!(matches!(sink.close(), Err(FramingError::MissingTrailers)));

    assert!(matches!(
        events.next_event().await,
        Some(Ok(StreamEvent::Message(_)))
    ));
    assert!(matches!(
        events.next_event().await,
        Some(Err(FramingError::MissingTrailers))
    ));
}

/// Test that a configured decoder flows through the session layer.
#[tokio::test]
async fn test_session_with_custom_limits() {
    let decoder = FrameDecoder::with_max_payload(8);
    let (mut sink, mut events) = stream_pair_with(decoder);

    let text = stream_text(&[(flags::DATA, b"this payload is too large")]);
    let result = sink.push(&text);

    assert!(matches!(
        result,
        Err(FramingError::PayloadLimitExceeded(25, 8))
    ));
    assert!(matches!(
        events.next_event().await,
        Some(Err(FramingError::PayloadLimitExceeded(25, 8)))
    ));
}

/// Test cancellation: consumer sees end of events, no terminal status.
#[tokio::test]
async fn test_session_cancel() {
    let (mut sink, mut events) = stream_pair();
    let text = stream_text(&[(flags::DATA, b"in flight")]);

    sink.push(&text).unwrap();
    sink.cancel();

    assert!(matches!(
        events.next_event().await,
        Some(Ok(StreamEvent::Message(_)))
    ));
    assert_eq!(events.next_event().await, None);
}

/// Test that a request envelope built by the encoder parses as sent.
#[test]
fn test_request_envelope_layout() {
    let text = encode_frame(b"request body").unwrap();
    let raw = TextCodec::decode(&text).unwrap();

    let header = Header::decode(&raw[..5]).unwrap();
    assert_eq!(header.flags, flags::DATA);
    assert_eq!(header.payload_length, 12);
    assert_eq!(&raw[5..], b"request body");
}
