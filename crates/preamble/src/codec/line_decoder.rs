//! Line framing for the preamble reader.
//!
//! [`LineDecoder`] splits a byte stream at `\n`, strips one trailing `\r`, and
//! refuses to buffer more than `limit` bytes of a single line. It is driven by
//! a [`FramedRead`](tokio_util::codec::FramedRead) inside
//! [`LineReader`](crate::codec::LineReader).

use std::cmp;

use bytes::BytesMut;
use tokio_util::codec::Decoder;

use crate::ensure;
use crate::protocol::ParseError;

const LF: u8 = b'\n';
const CR: u8 = b'\r';

/// Decoder yielding one line per item, without its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDecoder {
    /// Maximum line length, terminator excluded
    limit: usize,
    /// Where to resume searching for `\n` after a partial read
    next_index: usize,
}

impl LineDecoder {
    pub fn new(limit: usize) -> Self {
        Self { limit, next_index: 0 }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
    }

    fn take_line(&mut self, src: &mut BytesMut, len: usize, consumed: usize) -> Result<BytesMut, ParseError> {
        self.next_index = 0;
        let mut line = src.split_to(consumed);
        line.truncate(len);
        if line.last() == Some(&CR) {
            line.truncate(len - 1);
        }
        ensure!(line.len() <= self.limit, ParseError::line_too_long(self.limit));
        Ok(line)
    }
}

impl Decoder for LineDecoder {
    type Item = BytesMut;
    type Error = ParseError;

    /// Returns the next complete line, `Ok(None)` when more bytes are needed.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::LineTooLong`] as soon as the buffered part of the
    /// current line is longer than the limit, without waiting for its end.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // room for the line itself plus "\r\n"
        let read_to = cmp::min(self.limit.saturating_add(2), src.len());
        // the limit may have shrunk since the last partial read
        let from = cmp::min(self.next_index, read_to);

        match src[from..read_to].iter().position(|b| *b == LF) {
            Some(offset) => {
                let newline = from + offset;
                self.take_line(src, newline, newline + 1).map(Some)
            }
            None => {
                ensure!(src.len() <= self.limit.saturating_add(1), ParseError::line_too_long(self.limit));
                self.next_index = read_to;
                Ok(None)
            }
        }
    }

    /// Flushes a final line that ended with the stream instead of `\n`.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(line) => Ok(Some(line)),
            None if src.is_empty() => Ok(None),
            None => {
                let len = src.len();
                self.take_line(src, len, len).map(Some)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_crlf_and_lf_lines() {
        let mut buffer = BytesMut::from(&b"GET / HTTP/1.1\r\nHost: x\n\r\nrest"[..]);
        let mut decoder = LineDecoder::new(8192);

        assert_eq!(&decoder.decode(&mut buffer).unwrap().unwrap()[..], b"GET / HTTP/1.1");
        assert_eq!(&decoder.decode(&mut buffer).unwrap().unwrap()[..], b"Host: x");
        assert_eq!(&decoder.decode(&mut buffer).unwrap().unwrap()[..], b"");
        assert!(decoder.decode(&mut buffer).unwrap().is_none());
        assert_eq!(&buffer[..], b"rest");
    }

    #[test]
    fn partial_line_waits_for_more_bytes() {
        let mut buffer = BytesMut::from(&b"Host: exa"[..]);
        let mut decoder = LineDecoder::new(8192);

        assert!(decoder.decode(&mut buffer).unwrap().is_none());
        assert_eq!(decoder.next_index, 9);

        buffer.extend_from_slice(b"mple.com\r\n");
        assert_eq!(&decoder.decode(&mut buffer).unwrap().unwrap()[..], b"Host: example.com");
        assert!(buffer.is_empty());
    }

    #[test]
    fn line_at_limit_is_accepted() {
        let mut buffer = BytesMut::from(&b"abcd\r\n"[..]);
        let mut decoder = LineDecoder::new(4);

        assert_eq!(&decoder.decode(&mut buffer).unwrap().unwrap()[..], b"abcd");
    }

    #[test]
    fn line_over_limit_fails_before_terminator() {
        let mut buffer = BytesMut::from(&b"abcdef"[..]);
        let mut decoder = LineDecoder::new(4);

        let result = decoder.decode(&mut buffer);
        assert!(matches!(result, Err(ParseError::LineTooLong { limit: 4 })));
    }

    #[test]
    fn line_over_limit_fails_with_terminator() {
        let mut buffer = BytesMut::from(&b"abcde\r\n"[..]);
        let mut decoder = LineDecoder::new(4);

        let result = decoder.decode(&mut buffer);
        assert!(matches!(result, Err(ParseError::LineTooLong { limit: 4 })));
    }

    #[test]
    fn shrunken_limit_rejects_pending_line() {
        let mut buffer = BytesMut::from(&[b'a'; 100][..]);
        let mut decoder = LineDecoder::new(8192);

        assert!(decoder.decode(&mut buffer).unwrap().is_none());
        assert_eq!(decoder.next_index, 100);

        decoder.set_limit(16);
        buffer.extend_from_slice(b"\r\n");
        let result = decoder.decode(&mut buffer);
        assert!(matches!(result, Err(ParseError::LineTooLong { limit: 16 })));
    }

    #[test]
    fn grown_limit_keeps_pending_line() {
        let mut buffer = BytesMut::from(&b"Host: exa"[..]);
        let mut decoder = LineDecoder::new(16);

        assert!(decoder.decode(&mut buffer).unwrap().is_none());
        decoder.set_limit(8192);
        buffer.extend_from_slice(b"mple.com\r\n");
        assert_eq!(&decoder.decode(&mut buffer).unwrap().unwrap()[..], b"Host: example.com");
    }

    #[test]
    fn eof_flushes_unterminated_line() {
        let mut buffer = BytesMut::from(&b"Host: x"[..]);
        let mut decoder = LineDecoder::new(8192);

        assert_eq!(&decoder.decode_eof(&mut buffer).unwrap().unwrap()[..], b"Host: x");
        assert!(decoder.decode_eof(&mut buffer).unwrap().is_none());
    }
}
