//! Incoming HTTP request types.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// HTTP request methods accepted by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// The GET method.
    Get,
    /// The POST method.
    Post,
    /// The PUT method.
    Put,
    /// The DELETE method.
    Delete,
    /// The HEAD method.
    Head,
    /// The OPTIONS method.
    Options,
    /// The PATCH method.
    Patch,
}

impl Method {
    /// The wire representation of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Patch => "PATCH",
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    // Methods are matched exactly as received; "get" is not a method.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            "HEAD" => Ok(Method::Head),
            "OPTIONS" => Ok(Method::Options),
            "PATCH" => Ok(Method::Patch),
            _ => Err(Error::MalformedRequest(format!(
                "invalid HTTP method: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded HTTP request.
///
/// Constructed by [`server::decode`][crate::server::decode] and immutable
/// afterwards. Header keys are stored exactly as received; a later header
/// line with the same name overwrites an earlier one.
#[derive(Debug, Clone)]
pub struct Request {
    /// The request method.
    pub method: Method,
    /// The origin-form request path. Never empty.
    pub path: String,
    /// The protocol version token from the request line, e.g. `HTTP/1.1`.
    pub version: String,
    /// Header name/value pairs, trimmed of surrounding whitespace.
    pub headers: HashMap<String, String>,
    /// The request body, truncated to `Content-Length` when applicable.
    pub body: String,
    /// The original buffer text, retained for diagnostics.
    pub raw: String,
}

impl Request {
    /// Returns the value of the named header, if present.
    ///
    /// Lookup is case-sensitive, matching how headers are stored.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|v| v.as_str())
    }
}
