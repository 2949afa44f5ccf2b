//! Outgoing HTTP response types and constructors.

use std::collections::BTreeMap;
use std::time::SystemTime;

use serde::Serialize;
use serde_json::json;

use crate::date;

/// The `Server` header value sent with every response.
pub const SERVER_NAME: &str = concat!("micro-h1/", env!("CARGO_PKG_VERSION"));

/// An HTTP response ready to be encoded onto the wire.
///
/// Handlers build responses exclusively through [`Response::new`],
/// [`Response::json`], and [`Response::error`]; the standard headers
/// (`Content-Type`, `Content-Length`, `Date`, `Server`) are set by the
/// constructors, never by handlers directly. Headers are kept in a sorted
/// map so encoding is deterministic.
#[derive(Debug, Clone)]
pub struct Response {
    /// The status code, conventionally 100-599.
    pub status: u16,
    /// The status text accompanying the code on the status line.
    pub status_text: String,
    /// Header name/value pairs, iterated in sorted order on encode.
    pub headers: BTreeMap<String, String>,
    /// The response body.
    pub body: String,
}

impl Response {
    /// Create a response with the standard header set.
    ///
    /// `Content-Length` is computed from the byte length of `body`. The
    /// connection is always closed after one response, so every response
    /// carries `Connection: close`.
    pub fn new(status: u16, status_text: &str, content_type: &str, body: &str) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_owned(), content_type.to_owned());
        headers.insert("Content-Length".to_owned(), body.len().to_string());
        headers.insert(
            "Date".to_owned(),
            date::fmt_http_date(SystemTime::now()),
        );
        headers.insert("Server".to_owned(), SERVER_NAME.to_owned());
        headers.insert("Connection".to_owned(), "close".to_owned());

        Self {
            status,
            status_text: status_text.to_owned(),
            headers,
            body: body.to_owned(),
        }
    }

    /// Create an `application/json` response from a serializable value.
    ///
    /// Serialization failure falls back to a 500 error response.
    pub fn json<T: Serialize>(status: u16, status_text: &str, data: &T) -> Self {
        match serde_json::to_string(data) {
            Ok(body) => Self::new(status, status_text, "application/json", &body),
            Err(_) => Self::error(500, "Internal Server Error"),
        }
    }

    /// Create a structured JSON error response.
    ///
    /// The body carries `error`, `code`, `message`, and `timestamp` fields.
    /// This constructor cannot fail: if the error body itself will not
    /// serialize, a minimal hand-built body is used instead.
    pub fn error(status: u16, status_text: &str) -> Self {
        let body = json!({
            "error": status_text,
            "code": status,
            "message": error_message(status),
            "timestamp": date::fmt_rfc3339(SystemTime::now()),
        });
        let body = serde_json::to_string(&body).unwrap_or_else(|_| {
            format!("{{\"error\":\"{}\",\"code\":{}}}", status_text, status)
        });
        Self::new(status, status_text, "application/json", &body)
    }
}

/// The human-readable message for a status code used in error bodies.
fn error_message(status: u16) -> &'static str {
    match status {
        400 => "The request was invalid",
        404 => "The requested resource was not found",
        405 => "The HTTP method is not allowed for this resource",
        408 => "The request took too long to complete",
        500 => "Internal server error",
        _ => "An error occurred",
    }
}
