//! Helpers shared by the unit tests.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, ReadBuf};
use tracing::Level;

/// Installs a fmt subscriber writing through the test harness, once per process.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_max_level(Level::TRACE).with_test_writer().try_init();
}

/// Hands out one byte per read and returns `Pending` in between, so every
/// line has to be assembled across many suspensions.
#[derive(Debug)]
pub(crate) struct TrickleIO {
    data: Vec<u8>,
    pos: usize,
    ready: bool,
}

impl TrickleIO {
    pub(crate) fn new(data: &[u8]) -> Self {
        Self { data: data.to_vec(), pos: 0, ready: false }
    }
}

impl AsyncRead for TrickleIO {
    fn poll_read(mut self: Pin<&mut Self>, cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        if !self.ready {
            self.ready = true;
            cx.waker().wake_by_ref();
            return Poll::Pending;
        }
        self.ready = false;
        if self.pos < self.data.len() {
            let pos = self.pos;
            buf.put_slice(&self.data[pos..=pos]);
            self.pos += 1;
        }
        Poll::Ready(Ok(()))
    }
}
