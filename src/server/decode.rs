//! Decode raw bytes into an HTTP request.

use std::collections::HashMap;

use crate::{Error, Method, Request, Result};

/// Decode an HTTP request from everything read off the socket.
///
/// This is a pure transformation over a single buffer: the caller performs
/// exactly one read, and nothing here blocks for more bytes. A request line
/// that does not have exactly three non-empty tokens, an unknown method, or
/// an unparseable `Content-Length` fail with
/// [`Error::MalformedRequest`]; header lines without a colon are skipped
/// rather than treated as fatal.
pub fn decode(buf: &[u8]) -> Result<Request> {
    if buf.is_empty() {
        return Err(Error::MalformedRequest("empty request".to_owned()));
    }

    let raw = String::from_utf8_lossy(buf).into_owned();
    let lines: Vec<&str> = raw.split("\r\n").collect();

    let (method, path, version) = parse_request_line(lines[0])?;
    let (headers, separator) = parse_headers(&lines);
    let body = parse_body(&lines, separator, &headers)?;

    Ok(Request {
        method,
        path,
        version,
        headers,
        body,
        raw,
    })
}

fn parse_request_line(line: &str) -> Result<(Method, String, String)> {
    let parts: Vec<&str> = line.split(' ').collect();
    if parts.len() != 3 {
        return Err(Error::MalformedRequest(format!(
            "invalid request line: {}",
            line
        )));
    }

    let (method, path, version) = (parts[0], parts[1], parts[2]);
    if method.is_empty() || path.is_empty() || version.is_empty() {
        return Err(Error::MalformedRequest(
            "empty request line component".to_owned(),
        ));
    }

    let method: Method = method.parse()?;
    Ok((method, path.to_owned(), version.to_owned()))
}

/// Scan header lines until the first blank line, returning the headers and
/// the index of the header/body separator.
fn parse_headers(lines: &[&str]) -> (HashMap<String, String>, usize) {
    let mut headers = HashMap::new();
    let mut separator = 1;

    for (i, line) in lines.iter().enumerate().skip(1) {
        if line.is_empty() {
            separator = i;
            break;
        }

        // Tolerate malformed header lines: no colon, skip.
        let colon = match line.find(':') {
            Some(idx) => idx,
            None => continue,
        };

        let key = line[..colon].trim();
        let value = line[colon + 1..].trim();
        if key.is_empty() {
            continue;
        }

        headers.insert(key.to_owned(), value.to_owned());
    }

    (headers, separator)
}

fn parse_body(
    lines: &[&str],
    separator: usize,
    headers: &HashMap<String, String>,
) -> Result<String> {
    let mut body = if separator + 1 < lines.len() {
        lines[separator + 1..].join("\r\n")
    } else {
        String::new()
    };

    if let Some(value) = headers.get("Content-Length") {
        let len: i64 = value.parse().map_err(|_| {
            Error::MalformedRequest(format!("invalid Content-Length header: {}", value))
        })?;
        // A length larger than the body means the rest was never read; the
        // single-read model leaves the body as-is rather than blocking.
        if len > 0 && (len as usize) < body.len() {
            let mut end = len as usize;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            body.truncate(end);
        }
    }

    Ok(body)
}
