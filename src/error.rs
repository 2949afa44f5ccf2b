use std::error::Error as StdError;
use std::fmt;

/// Errors when handling incoming requests.
#[derive(Debug)]
pub enum Error {
    /// The request bytes could not be decoded into a request.
    ///
    /// Raised for an empty buffer, a request line with the wrong number of
    /// tokens, an empty method/path/version, an unknown method, or a
    /// `Content-Length` header that does not parse as an integer.
    MalformedRequest(String),
    /// A route handler panicked while producing a response.
    HandlerFailure(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedRequest(reason) => write!(f, "malformed request: {}", reason),
            Error::HandlerFailure(reason) => write!(f, "handler failure: {}", reason),
        }
    }
}

impl StdError for Error {}
