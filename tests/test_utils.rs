use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_lite::io::Cursor;
use futures_lite::AsyncRead;
use log::LevelFilter;

use micro_h1::logger::Logger;
use micro_h1::server::{self, ServerOptions};
use micro_h1::Router;

/// Drive one connection lifecycle over in-memory IO and return the bytes
/// written to the wire. `\n` in the input stands in for CRLF.
#[allow(dead_code)]
pub async fn run(router: &Router, raw: &str) -> String {
    let reader = Cursor::new(raw.replace('\n', "\r\n").into_bytes());
    run_reader(router, reader, &ServerOptions::default()).await
}

/// Like [`run`], but with a caller-supplied reader and options.
#[allow(dead_code)]
pub async fn run_with<R>(router: &Router, reader: R, opts: &ServerOptions) -> String
where
    R: AsyncRead + Unpin,
{
    run_reader(router, reader, opts).await
}

async fn run_reader<R>(router: &Router, reader: R, opts: &ServerOptions) -> String
where
    R: AsyncRead + Unpin,
{
    let logger = Logger::new(LevelFilter::Off);
    let mut out = Cursor::new(Vec::new());
    server::accept(reader, &mut out, "test-peer", router, &logger, opts).await;
    String::from_utf8(out.into_inner()).unwrap()
}

/// The status code from an encoded response.
#[allow(dead_code)]
pub fn status_of(wire: &str) -> u16 {
    wire.split(' ').nth(1).unwrap().parse().unwrap()
}

/// A reader that never yields data, for exercising the read deadline.
#[allow(dead_code)]
pub struct NeverReady;

impl AsyncRead for NeverReady {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Pending
    }
}
