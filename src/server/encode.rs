//! Encode an HTTP response into wire bytes.

use std::io::Write;

use crate::Response;

/// Encode a response into the exact byte sequence to write to the socket.
///
/// The status line is followed by one line per header, a blank line, and
/// the body verbatim (no trailing newline). Headers are written in the
/// response map's sorted order, so encoding the same response twice
/// produces identical bytes.
pub fn encode(res: &Response) -> Vec<u8> {
    let mut buf = Vec::with_capacity(128 + res.body.len());

    // Writing to a Vec cannot fail.
    write!(buf, "HTTP/1.1 {} {}\r\n", res.status, res.status_text).unwrap();
    for (name, value) in &res.headers {
        write!(buf, "{}: {}\r\n", name, value).unwrap();
    }
    write!(buf, "\r\n").unwrap();
    buf.extend_from_slice(res.body.as_bytes());

    buf
}
