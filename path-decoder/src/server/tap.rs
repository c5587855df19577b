//! Captures the request line as it arrives on the socket.
//!
//! `http::Uri` is not a faithful copy of the request target: it matches the
//! `http`/`https` scheme case-insensitively and only remembers the canonical
//! spelling. The decoder has to see the target byte for byte, so the first line
//! read from the connection is kept aside and attached to the request as a
//! [`RawRequestTarget`] extension.
//!
//! Only the first line of a connection is captured, so connections using the tap
//! must be served without keep-alive.

use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use once_cell::sync::OnceCell;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

/// hyper's own limit on a request head is in the same range.
const MAX_REQUEST_LINE: usize = 16 * 1024;

/// The request target exactly as received, attached to requests as an extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRequestTarget(pub String);

/// Target token of a request line: `GET /a%2F HTTP/1.1` -> `/a%2F`.
pub fn target_of_request_line(line: &str) -> Option<&str> {
    let mut parts = line.split(' ');
    let _method = parts.next()?;
    let target = parts.next()?;
    let _version = parts.next()?;
    Some(target)
}

pub struct RequestLineTap<T> {
    inner: T,
    line: Vec<u8>,
    captured: Arc<OnceCell<String>>,
}

impl<T> RequestLineTap<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            line: Vec::new(),
            captured: Arc::new(OnceCell::new()),
        }
    }

    /// Filled in once the first request line has been read.
    pub fn request_line(&self) -> Arc<OnceCell<String>> {
        self.captured.clone()
    }

    fn record(&mut self, bytes: &[u8]) {
        if self.captured.get().is_some() || self.line.len() > MAX_REQUEST_LINE {
            return;
        }

        for &b in bytes {
            if b != b'\n' {
                self.line.push(b);
                if self.line.len() > MAX_REQUEST_LINE {
                    // oversized, hyper rejects it anyway
                    return;
                }
                continue;
            }

            if self.line.last() == Some(&b'\r') {
                self.line.pop();
            }
            // empty lines before the request line are tolerated
            if self.line.is_empty() {
                continue;
            }

            let line = String::from_utf8_lossy(&self.line).into_owned();
            let _ = self.captured.set(line);
            self.line = Vec::new();
            return;
        }
    }
}

impl<T: AsyncRead + Unpin> AsyncRead for RequestLineTap<T> {
    fn poll_read(self: Pin<&mut Self>, cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let before = buf.filled().len();
        let res = Pin::new(&mut this.inner).poll_read(cx, buf);
        if let Poll::Ready(Ok(())) = res {
            this.record(&buf.filled()[before..]);
        }
        res
    }
}

impl<T: AsyncWrite + Unpin> AsyncWrite for RequestLineTap<T> {
    fn poll_write(self: Pin<&mut Self>, cx: &mut Context<'_>, data: &[u8]) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.get_mut().inner).poll_write(cx, data)
    }

    fn poll_write_vectored(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        bufs: &[io::IoSlice<'_>],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.get_mut().inner).poll_write_vectored(cx, bufs)
    }

    fn is_write_vectored(&self) -> bool {
        self.inner.is_write_vectored()
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_shutdown(cx)
    }
}
