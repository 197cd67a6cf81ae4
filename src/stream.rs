//! Stream session layer: turns decoded envelopes into delivered events.
//!
//! A [`StreamSink`] owns a [`FrameDecoder`](crate::FrameDecoder) and the
//! sending half of an event channel; the matching [`ResponseStream`] is
//! handed to whoever consumes the RPC. Transport code pushes text chunks
//! into the sink as they arrive and calls [`StreamSink::close`] at end of
//! stream; the consumer awaits events at its own pace.
//!
//! # Architecture
//!
//! ```text
//! chunk ─┐
//! chunk ─┼─► StreamSink::push ─► FrameDecoder ─► mpsc ─► ResponseStream
//! chunk ─┘                                               (await events)
//! ```
//!
//! Data envelopes become [`StreamEvent::Message`], the trailer envelope
//! becomes [`StreamEvent::Trailers`] and marks the stream complete. Any
//! framing error is delivered once through the channel and closes the
//! sink; further pushes return [`FramingError::StreamClosed`].
//!
//! # Example
//!
//! ```
//! use grpcweb_framing::{encode_frame, stream_pair, StreamEvent};
//!
//! let (mut sink, mut events) = stream_pair();
//! sink.push(&encode_frame(b"ping").unwrap()).unwrap();
//!
//! match events.try_next_event() {
//!     Some(Ok(StreamEvent::Message(payload))) => assert_eq!(&payload[..], b"ping"),
//!     other => panic!("unexpected event: {:?}", other),
//! }
//! ```

use bytes::Bytes;
use tokio::sync::mpsc;

use crate::error::{FramingError, Result};
use crate::protocol::{parse_trailers, FrameDecoder};
use crate::status::Status;

/// An event observed on a response stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A data envelope's payload.
    Message(Bytes),
    /// The final status parsed from the trailer envelope.
    Trailers(Status),
}

/// Ingest side of a stream session.
///
/// Not cloneable: exactly one transport feeds a stream. Dropping the sink
/// without closing it ends the event stream without a terminal event,
/// which the consumer sees as cancellation.
pub struct StreamSink {
    /// Decoder holding any partial input between pushes.
    decoder: FrameDecoder,
    /// Event channel; `None` once the stream is closed or failed.
    tx: Option<mpsc::UnboundedSender<Result<StreamEvent>>>,
    /// Set when the trailer envelope has been delivered.
    trailers_seen: bool,
}

/// Consumer side of a stream session.
pub struct ResponseStream {
    rx: mpsc::UnboundedReceiver<Result<StreamEvent>>,
}

/// Create a connected sink/stream pair with default decoder limits.
pub fn stream_pair() -> (StreamSink, ResponseStream) {
    stream_pair_with(FrameDecoder::new())
}

/// Create a connected sink/stream pair around a configured decoder.
pub fn stream_pair_with(decoder: FrameDecoder) -> (StreamSink, ResponseStream) {
    let (tx, rx) = mpsc::unbounded_channel();
    let sink = StreamSink {
        decoder,
        tx: Some(tx),
        trailers_seen: false,
    };
    (sink, ResponseStream { rx })
}

impl StreamSink {
    /// Push a transport chunk and deliver any completed events.
    ///
    /// Chunks may be cut anywhere; partial input is held by the decoder
    /// until the next push. Envelopes arriving after the trailer are
    /// dropped with a warning.
    ///
    /// # Errors
    ///
    /// Any error is fatal for the stream: it is delivered once through
    /// the event channel, the sink closes, and the same error is
    /// returned here.
    pub fn push(&mut self, chunk: &str) -> Result<()> {
        if self.tx.is_none() {
            return Err(FramingError::StreamClosed);
        }

        let frames = match self.decoder.push(chunk) {
            Ok(frames) => frames,
            Err(e) => return Err(self.fail(e)),
        };

        for frame in frames {
            if self.trailers_seen {
                tracing::warn!(
                    "Dropping {} byte envelope received after trailers (flags: {:#04x})",
                    frame.payload_len(),
                    frame.flags
                );
                continue;
            }

            if frame.is_trailers() {
                let status = parse_trailers(frame.payload());
                tracing::debug!("Stream completed with status {}", status);
                self.trailers_seen = true;
                self.deliver(StreamEvent::Trailers(status))?;
            } else {
                self.deliver(StreamEvent::Message(frame.payload_bytes()))?;
            }
        }

        Ok(())
    }

    /// Mark end of transport input.
    ///
    /// A stream is well terminated only when the trailer envelope has
    /// arrived and no partial input is left in the decoder. Otherwise the
    /// appropriate error is delivered and returned.
    pub fn close(&mut self) -> Result<()> {
        if self.tx.is_none() {
            return Err(FramingError::StreamClosed);
        }

        if self.trailers_seen {
            if self.decoder.has_partial() {
                tracing::warn!(
                    "Stream closed with {} byte(s) of partial input after trailers",
                    self.decoder.partial_len()
                );
            }
            self.tx = None;
            return Ok(());
        }

        if self.decoder.has_partial() {
            let len = self.decoder.partial_len();
            return Err(self.fail(FramingError::TruncatedStream(len)));
        }

        Err(self.fail(FramingError::MissingTrailers))
    }

    /// Abandon the stream, discarding buffered input.
    ///
    /// The consumer observes end of events without a terminal status.
    pub fn cancel(self) {}

    /// Whether the sink has been closed or has failed.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.tx.is_none()
    }

    /// Whether the trailer envelope has been seen.
    #[inline]
    pub fn trailers_seen(&self) -> bool {
        self.trailers_seen
    }

    /// Send an event, closing the sink if the consumer is gone.
    fn deliver(&mut self, event: StreamEvent) -> Result<()> {
        match &self.tx {
            Some(tx) => {
                if tx.send(Ok(event)).is_err() {
                    self.tx = None;
                    return Err(FramingError::ReceiverDropped);
                }
                Ok(())
            }
            None => Err(FramingError::StreamClosed),
        }
    }

    /// Deliver an error through the channel and close the sink.
    fn fail(&mut self, err: FramingError) -> FramingError {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(Err(err.clone()));
        }
        err
    }
}

impl ResponseStream {
    /// Receive the next event, waiting until one arrives.
    ///
    /// Returns `None` when the stream is over: after the terminal event
    /// has been consumed, or immediately on cancellation.
    pub async fn next_event(&mut self) -> Option<Result<StreamEvent>> {
        self.rx.recv().await
    }

    /// Receive the next event without waiting.
    ///
    /// Returns `None` both when no event is ready yet and when the stream
    /// is over; callers that must tell those apart should use
    /// [`next_event`](Self::next_event).
    pub fn try_next_event(&mut self) -> Option<Result<StreamEvent>> {
        self.rx.try_recv().ok()
    }
}
