//! Streaming parser for HTTP/1.x request and response heads.
//!
//! [`HeadParser`] drives one parse at a time per connection. Each parse:
//!
//! 1. acquires a character buffer from the parser's pool,
//! 2. absorbs lines from a [`LineSource`] into that buffer (the only point
//!    where a parse may suspend),
//! 3. tokenizes the start line in place, recognising common methods and
//!    versions through a prefix tree,
//! 4. collects the header block into a pooled [`HeaderTable`] of offsets,
//! 5. hands buffer and table over to the resulting [`Request`] or [`Response`].
//!
//! Any error, and dropping the parse future before it completes, returns the
//! buffer and table to their pools before the caller regains control.
//!
//! # Example
//!
//! ```no_run
//! use micro_preamble::codec::LineReader;
//! use micro_preamble::parser::HeadParser;
//!
//! # async fn run(stream: tokio::net::TcpStream) -> Result<(), micro_preamble::protocol::ParseError> {
//! let parser = HeadParser::new();
//! let mut source = LineReader::new(stream);
//!
//! while let Some(request) = parser.parse_request(&mut source).await? {
//!     println!("{} {} {}", request.method(), request.uri(), request.version());
//!     if let Some(host) = request.headers().get("host") {
//!         println!("host: {host}");
//!     }
//!     request.release();
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod cursor;
mod header_block;
mod start_line;
mod tokenizer;
mod tree;

pub use config::ParserConfig;
pub(crate) use cursor::Cursor;

use tracing::trace;

use crate::codec::LineSource;
use crate::pool::ObjectPool;
use crate::protocol::{HeaderBlock, HeaderEntry, HeaderTable, ParseError, Request, Response};
use header_block::parse_header_block;
use start_line::{parse_request_line, parse_status_line};
use tokenizer::{skip_spaces, trim_end};

const TABLE_CAPACITY: usize = 16;

/// Parses request and response heads into pooled buffers.
///
/// Cloning is cheap and clones share the same pools.
#[derive(Debug, Clone)]
pub struct HeadParser {
    config: ParserConfig,
    buffers: ObjectPool<String>,
    tables: ObjectPool<Vec<HeaderEntry>>,
}

impl Default for HeadParser {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadParser {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        let buffer_capacity = config.get_buffer_capacity();
        Self {
            config,
            buffers: ObjectPool::new(config.get_max_idle_buffers(), move || String::with_capacity(buffer_capacity)),
            tables: ObjectPool::new(config.get_max_idle_buffers(), || Vec::with_capacity(TABLE_CAPACITY)),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Pool of character buffers backing parsed messages.
    pub fn buffer_pool(&self) -> &ObjectPool<String> {
        &self.buffers
    }

    /// Pool of header entry storage backing parsed messages.
    pub fn table_pool(&self) -> &ObjectPool<Vec<HeaderEntry>> {
        &self.tables
    }

    /// Parses a request line and its header block.
    ///
    /// Blank lines before the request line are skipped. Returns `Ok(None)` when
    /// the source ends before any request line, i.e. the peer closed the
    /// connection between messages.
    ///
    /// # Errors
    ///
    /// - [`ParseError::LineTooLong`] for a line over the configured limit
    /// - [`ParseError::MalformedRequestLine`], [`ParseError::MissingUri`] or
    ///   [`ParseError::MissingVersion`] for a bad request line
    /// - [`ParseError::MissingColon`] or [`ParseError::IncompleteHeaders`] for
    ///   a bad or truncated header block
    /// - [`ParseError::InvalidUtf8`] or [`ParseError::Io`] from the source
    pub async fn parse_request<S>(&self, source: &mut S) -> Result<Option<Request>, ParseError>
    where
        S: LineSource + ?Sized,
    {
        let line_limit = self.config.get_line_limit();
        let mut buffer = self.buffers.acquire();
        let mut cursor = Cursor::default();

        let request_line = loop {
            cursor.start = buffer.len();
            if !source.try_read_line(&mut buffer, line_limit).await? {
                return Ok(None);
            }
            cursor.end = buffer.len();

            skip_spaces(&buffer, &mut cursor);
            trim_end(&buffer, &mut cursor);
            if !cursor.is_empty() {
                break parse_request_line(&buffer, &mut cursor)?;
            }
            buffer.clear();
        };

        let table = HeaderTable::new(self.tables.acquire());
        let headers = parse_header_block(source, &mut buffer, &mut cursor, table, line_limit).await?;

        let request = Request::new(request_line.method, request_line.uri, request_line.version, headers, buffer);
        trace!(method = request.method(), uri = request.uri(), headers = request.headers().len(), "parsed request head");
        Ok(Some(request))
    }

    /// Parses a status line and its header block.
    ///
    /// The status line must be the first line; returns `Ok(None)` only when
    /// the source has no data at all.
    ///
    /// # Errors
    ///
    /// - [`ParseError::LineTooLong`] for a line over the configured limit
    /// - [`ParseError::MissingVersion`] or [`ParseError::InvalidStatusCode`]
    ///   for a bad status line
    /// - [`ParseError::MissingColon`] or [`ParseError::IncompleteHeaders`] for
    ///   a bad or truncated header block
    /// - [`ParseError::InvalidUtf8`] or [`ParseError::Io`] from the source
    pub async fn parse_response<S>(&self, source: &mut S) -> Result<Option<Response>, ParseError>
    where
        S: LineSource + ?Sized,
    {
        let line_limit = self.config.get_line_limit();
        let mut buffer = self.buffers.acquire();

        if !source.try_read_line(&mut buffer, line_limit).await? {
            return Ok(None);
        }
        let mut cursor = Cursor::new(0, buffer.len());
        let status_line = parse_status_line(&buffer, &mut cursor)?;

        let table = HeaderTable::new(self.tables.acquire());
        let headers = parse_header_block(source, &mut buffer, &mut cursor, table, line_limit).await?;

        let response =
            Response::new(status_line.version, status_line.status_code, status_line.status_text, headers, buffer);
        trace!(status = response.status_code(), headers = response.headers().len(), "parsed response head");
        Ok(Some(response))
    }

    /// Parses a header block on its own, without a start line.
    ///
    /// # Errors
    ///
    /// Same header block errors as [`HeadParser::parse_request`]; an empty
    /// source is [`ParseError::IncompleteHeaders`].
    pub async fn parse_headers<S>(&self, source: &mut S) -> Result<HeaderBlock, ParseError>
    where
        S: LineSource + ?Sized,
    {
        let mut buffer = self.buffers.acquire();
        let mut cursor = Cursor::default();

        let table = HeaderTable::new(self.tables.acquire());
        let headers =
            parse_header_block(source, &mut buffer, &mut cursor, table, self.config.get_line_limit()).await?;

        trace!(headers = headers.len(), "parsed header block");
        Ok(HeaderBlock::new(headers, buffer))
    }
}
