//! Byte sources the preamble parser reads lines from.
//!
//! The parser only ever asks its source for "the next line, appended to this
//! buffer". That single call is where a parse suspends while the peer is slow;
//! everything else runs to completion on the calling task.

use std::str;

use async_trait::async_trait;
use bytes::BytesMut;
use futures::StreamExt;
use tokio::io::AsyncRead;
use tokio_util::codec::FramedRead;
use tracing::trace;

use crate::codec::LineDecoder;
use crate::protocol::ParseError;

/// Default limit for one line, terminator excluded.
pub const DEFAULT_LINE_LIMIT: usize = 8192;

const READ_CAPACITY: usize = 8 * 1024;

/// A source of text lines for the preamble parser.
#[async_trait]
pub trait LineSource {
    /// Appends the next line to `buf`, without its line terminator.
    ///
    /// Returns `Ok(false)` when the source is exhausted and no partial line is
    /// pending, which is a clean end of stream rather than a failure.
    ///
    /// # Errors
    ///
    /// - [`ParseError::LineTooLong`] if more than `limit` characters arrive
    ///   before a terminator
    /// - [`ParseError::InvalidUtf8`] if the line is not valid UTF-8
    /// - [`ParseError::Io`] if the transport fails
    async fn try_read_line(&mut self, buf: &mut String, limit: usize) -> Result<bool, ParseError>;
}

/// A [`LineSource`] over any [`AsyncRead`], framed by a [`LineDecoder`].
///
/// Bytes read past the end of the head stay in [`LineReader::read_buffer`]
/// for the body decoding stage.
#[derive(Debug)]
pub struct LineReader<R> {
    framed_read: FramedRead<R, LineDecoder>,
}

impl<R: AsyncRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self { framed_read: FramedRead::with_capacity(reader, LineDecoder::new(DEFAULT_LINE_LIMIT), READ_CAPACITY) }
    }

    pub fn get_ref(&self) -> &R {
        self.framed_read.get_ref()
    }

    /// Bytes already read from the transport but not yet consumed as lines.
    pub fn read_buffer(&self) -> &BytesMut {
        self.framed_read.read_buffer()
    }

    /// Splits into the transport and the bytes buffered ahead of it.
    pub fn into_parts(mut self) -> (R, BytesMut) {
        let rest = self.framed_read.read_buffer_mut().split();
        (self.framed_read.into_inner(), rest)
    }
}

#[async_trait]
impl<R> LineSource for LineReader<R>
where
    R: AsyncRead + Unpin + Send,
{
    async fn try_read_line(&mut self, buf: &mut String, limit: usize) -> Result<bool, ParseError> {
        self.framed_read.decoder_mut().set_limit(limit);

        match self.framed_read.next().await {
            Some(Ok(line)) => {
                let text = str::from_utf8(&line).map_err(ParseError::invalid_utf8)?;
                trace!(line_len = text.len(), "absorbed line");
                buf.push_str(text);
                Ok(true)
            }
            Some(Err(e)) => Err(e),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::AsyncWriteExt;

    use super::*;
    use crate::test_utils::TrickleIO;

    #[tokio::test]
    async fn read_lines_until_eof() {
        let mut reader = LineReader::new(&b"GET / HTTP/1.1\r\nHost: x\r\n\r\n"[..]);
        let mut buf = String::new();

        assert!(reader.try_read_line(&mut buf, DEFAULT_LINE_LIMIT).await.unwrap());
        assert_eq!(buf, "GET / HTTP/1.1");
        assert!(reader.try_read_line(&mut buf, DEFAULT_LINE_LIMIT).await.unwrap());
        assert_eq!(buf, "GET / HTTP/1.1Host: x");
        assert!(reader.try_read_line(&mut buf, DEFAULT_LINE_LIMIT).await.unwrap());
        assert_eq!(buf, "GET / HTTP/1.1Host: x");
        assert!(!reader.try_read_line(&mut buf, DEFAULT_LINE_LIMIT).await.unwrap());
    }

    #[tokio::test]
    async fn empty_source_has_no_line() {
        let mut reader = LineReader::new(&b""[..]);
        let mut buf = String::new();

        assert!(!reader.try_read_line(&mut buf, DEFAULT_LINE_LIMIT).await.unwrap());
        assert!(buf.is_empty());
    }

    #[tokio::test]
    async fn trickled_bytes_form_one_line() {
        let mut reader = LineReader::new(TrickleIO::new(b"Accept: */*\r\n"));
        let mut buf = String::new();

        assert!(reader.try_read_line(&mut buf, DEFAULT_LINE_LIMIT).await.unwrap());
        assert_eq!(buf, "Accept: */*");
    }

    #[tokio::test]
    async fn split_writes_over_duplex() {
        let (client, server) = tokio::io::duplex(64);
        let mut reader = LineReader::new(server);

        let writer = tokio::spawn(async move {
            let mut client = client;
            client.write_all(b"Host: exa").await.unwrap();
            tokio::task::yield_now().await;
            client.write_all(b"mple.com\r\n").await.unwrap();
        });

        let mut buf = String::new();
        assert!(reader.try_read_line(&mut buf, DEFAULT_LINE_LIMIT).await.unwrap());
        assert_eq!(buf, "Host: example.com");
        writer.await.unwrap();
    }

    #[tokio::test]
    async fn limit_applies_per_call() {
        let mut reader = LineReader::new(&b"0123456789\r\n"[..]);
        let mut buf = String::new();

        let result = reader.try_read_line(&mut buf, 4).await;
        assert!(matches!(result, Err(ParseError::LineTooLong { limit: 4 })));
        assert!(buf.is_empty());
    }

    #[tokio::test]
    async fn invalid_utf8_is_rejected() {
        let mut reader = LineReader::new(&b"Host: \xff\xfe\r\n"[..]);
        let mut buf = String::new();

        let result = reader.try_read_line(&mut buf, DEFAULT_LINE_LIMIT).await;
        assert!(matches!(result, Err(ParseError::InvalidUtf8 { .. })));
    }

    #[tokio::test]
    async fn body_bytes_stay_buffered() {
        let mut reader = LineReader::new(&b"Content-Length: 5\r\n\r\nhello"[..]);
        let mut buf = String::new();

        assert!(reader.try_read_line(&mut buf, DEFAULT_LINE_LIMIT).await.unwrap());
        assert!(reader.try_read_line(&mut buf, DEFAULT_LINE_LIMIT).await.unwrap());

        let (_io, rest) = reader.into_parts();
        assert_eq!(&rest[..], b"hello");
    }
}
