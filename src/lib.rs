//! Minimal HTTP/1.1 server implemented directly over raw TCP streams.
//!
//! At its core HTTP is a stateful RPC protocol, where a client and server
//! communicate with one another by encoding and decoding messages between
//! them. This crate implements the server half of that exchange by hand:
//! bytes are read from an accepted socket, decoded into a [`Request`],
//! dispatched to a registered handler through the [`Router`], and the
//! resulting [`Response`] is encoded back into wire bytes.
//!
//! ```txt
//!       decode               encode
//!            \               /
//! bytes in -> Request -> Response -> bytes out
//! ```
//!
//! Each connection is handled once: one read, one response, then the socket
//! is closed. There is no keep-alive, no pipelining, and no chunked
//! transfer encoding.

#![forbid(unsafe_code)]
#![deny(future_incompatible, rust_2018_idioms)]
#![deny(missing_debug_implementations, nonstandard_style)]
#![warn(missing_docs, unreachable_pub)]

/// The maximum amount of bytes read from a connection.
///
/// A request is read with a single call into a buffer of this size; bytes
/// beyond it are never received.
pub const MAX_REQUEST_LENGTH: usize = 8192;

pub use error::Error;
pub use request::{Method, Request};
pub use response::{Response, SERVER_NAME};
pub use router::{Handler, Route, Router};

pub mod config;
pub mod handlers;
pub mod logger;
pub mod server;

mod date;
mod error;
mod future;
mod request;
mod response;
mod router;

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
