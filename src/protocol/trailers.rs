//! Trailer payload parsing.
//!
//! A trailer envelope carries the final status of a stream as text lines
//! separated by CRLF, in HTTP header form:
//!
//! ```text
//! grpc-status: 5
//! grpc-message: not found
//! ```
//!
//! Both keys are optional. Absent or unparseable values fall back to
//! status code 0 and an empty message, so a well-formed but empty trailer
//! means success.

use crate::status::{Status, StatusCode};

const STATUS_KEY: &str = "grpc-status";
const MESSAGE_KEY: &str = "grpc-message";

/// Parse a trailer payload into a [`Status`].
///
/// Lines that do not look like `key: value`, carry an unknown key, or
/// hold a non-numeric status are skipped. Keys are matched without
/// regard to ASCII case; values keep their inner whitespace but are
/// trimmed at the edges. When a key repeats, the last occurrence wins.
///
/// # Example
///
/// ```
/// use grpcweb_framing::{parse_trailers, StatusCode};
///
/// let status = parse_trailers(b"grpc-status: 5\r\ngrpc-message: not found");
/// assert_eq!(status.code, StatusCode::NotFound);
/// assert_eq!(status.message, "not found");
/// ```
pub fn parse_trailers(payload: &[u8]) -> Status {
    let text = String::from_utf8_lossy(payload);
    let mut status = Status::ok();

    for line in text.split("\r\n") {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        if key.eq_ignore_ascii_case(STATUS_KEY) {
            if let Ok(code) = value.parse::<i32>() {
                status.code = StatusCode::from_code(code);
            }
        } else if key.eq_ignore_ascii_case(MESSAGE_KEY) {
            status.message = value.to_string();
        }
    }

    status
}
