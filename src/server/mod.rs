//! Process HTTP connections on the server.
//!
//! [`accept`] drives one connection through its whole lifecycle: a single
//! deadline-bounded read, decode, dispatch, and a deadline-bounded write
//! of the response. [`Server`] owns the listener loop that feeds it.

use std::io;
use std::net::{TcpListener, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;

use async_io::Async;
use futures_lite::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::config::Config;
use crate::future::timeout;
use crate::logger::Logger;
use crate::{Response, Router, MAX_REQUEST_LENGTH};

mod decode;
mod encode;

pub use decode::decode;
pub use encode::encode;

/// Per-connection deadlines.
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Deadline for the single request read. Defaults to 30s.
    pub read_timeout: Duration,
    /// Deadline for writing the response. Defaults to 10s.
    pub write_timeout: Duration,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            read_timeout: Duration::from_secs(30),
            write_timeout: Duration::from_secs(10),
        }
    }
}

/// Handle one accepted HTTP/1.1 connection.
///
/// Performs exactly one read into a fixed buffer under the read deadline,
/// decodes it, dispatches through the router, and writes the response
/// under the write deadline. Every failure path attempts a best-effort
/// error response first: deadline expiry answers 408, a decode failure
/// answers 400, and a failed handler answers 500. Write failures are
/// logged, never retried. The caller owns the socket, so it is closed on
/// every exit path when the stream is dropped.
pub async fn accept<R, W>(
    mut reader: R,
    mut writer: W,
    peer: &str,
    router: &Router,
    logger: &Logger,
    opts: &ServerOptions,
) where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    logger.info(format_args!("New connection from: {}", peer));

    let mut buf = vec![0u8; MAX_REQUEST_LENGTH];
    let n = match timeout(opts.read_timeout, reader.read(&mut buf)).await {
        Ok(Ok(0)) => {
            logger.error(format_args!("Connection closed by {} before any data", peer));
            return;
        }
        Ok(Ok(n)) => n,
        Ok(Err(err)) => {
            logger.error(format_args!("Error reading from {}: {}", peer, err));
            return;
        }
        Err(_) => {
            logger.error(format_args!("Read timeout from {}", peer));
            send(&mut writer, &Response::error(408, "Request Timeout"), peer, logger, opts).await;
            return;
        }
    };

    logger.debug(format_args!(
        "Raw request from {}: {}",
        peer,
        String::from_utf8_lossy(&buf[..n]).replace("\r\n", "\\r\\n")
    ));

    let request = match decode(&buf[..n]) {
        Ok(request) => request,
        Err(err) => {
            logger.error(format_args!("Error parsing request from {}: {}", peer, err));
            send(&mut writer, &Response::error(400, "Bad Request"), peer, logger, opts).await;
            return;
        }
    };

    logger.info(format_args!(
        "Request: {} {} from {}",
        request.method, request.path, peer
    ));

    // The router contains handler panics; the 500 is supplied here, at the
    // lifecycle boundary.
    let response = match router.route(&request) {
        Ok(response) => response,
        Err(err) => {
            logger.error(format_args!(
                "Dispatch failed for {} {}: {}",
                request.method, request.path, err
            ));
            Response::error(500, "Internal Server Error")
        }
    };

    if send(&mut writer, &response, peer, logger, opts).await {
        logger.info(format_args!(
            "Response: {} {} to {}",
            response.status, response.status_text, peer
        ));
    }
}

/// Encode and write a response under the write deadline. Failures are
/// logged and reported to the caller; there is no retry.
async fn send<W>(
    writer: &mut W,
    response: &Response,
    peer: &str,
    logger: &Logger,
    opts: &ServerOptions,
) -> bool
where
    W: AsyncWrite + Unpin,
{
    let bytes = encode(response);
    let write = async {
        writer.write_all(&bytes).await?;
        writer.flush().await
    };
    match timeout(opts.write_timeout, write).await {
        Ok(Ok(())) => true,
        Ok(Err(err)) => {
            logger.error(format_args!("Failed to send response to {}: {}", peer, err));
            false
        }
        Err(_) => {
            logger.error(format_args!("Write timeout to {}", peer));
            false
        }
    }
}

/// The listening half of the server.
///
/// Binds the configured address and spawns one detached task per accepted
/// connection; the accept loop itself never does request processing and
/// never stops on an accept error.
#[derive(Debug)]
pub struct Server {
    config: Config,
    logger: Arc<Logger>,
    router: Arc<Router>,
}

impl Server {
    /// Create a server from its already-built parts. The route table must
    /// be fully populated; it is read-only from here on.
    pub fn new(config: Config, logger: Arc<Logger>, router: Router) -> Self {
        Self {
            config,
            logger,
            router: Arc::new(router),
        }
    }

    /// Bind the listener and accept connections until the process exits.
    pub async fn listen(&self) -> io::Result<()> {
        let addr = self
            .config
            .address()
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::AddrNotAvailable, "address resolved to nothing")
            })?;
        let listener = Async::<TcpListener>::bind(addr)?;

        self.logger.info(format_args!(
            "HTTP server listening on {}",
            self.config.address()
        ));
        self.logger.info(format_args!(
            "  Read timeout: {:?}, write timeout: {:?}, log level: {}",
            self.config.read_timeout, self.config.write_timeout, self.config.log_level
        ));

        let opts = ServerOptions {
            read_timeout: self.config.read_timeout,
            write_timeout: self.config.write_timeout,
        };

        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(err) => {
                    self.logger
                        .error(format_args!("Error accepting connection: {}", err));
                    continue;
                }
            };

            let router = Arc::clone(&self.router);
            let logger = Arc::clone(&self.logger);
            let opts = opts.clone();
            async_global_executor::spawn(async move {
                // The task owns the stream; dropping it on any exit path
                // closes the socket.
                let peer = peer.to_string();
                accept(&stream, &stream, &peer, &router, &logger, &opts).await;
            })
            .detach();
        }
    }
}
