//! Line framing between a byte transport and the preamble parser.
//!
//! - [`LineDecoder`]: a [`tokio_util::codec::Decoder`] that frames lines and
//!   enforces the per-line limit
//! - [`LineSource`]: the async "read one line into the buffer" contract the
//!   parser depends on
//! - [`LineReader`]: the [`LineSource`] implementation over any
//!   [`tokio::io::AsyncRead`]
//!
//! # Example
//!
//! ```no_run
//! use micro_preamble::codec::{LineReader, LineSource, DEFAULT_LINE_LIMIT};
//!
//! # async fn run(stream: tokio::net::TcpStream) -> Result<(), micro_preamble::protocol::ParseError> {
//! let mut reader = LineReader::new(stream);
//! let mut buf = String::new();
//! while reader.try_read_line(&mut buf, DEFAULT_LINE_LIMIT).await? {
//!     // ...
//! }
//! # Ok(())
//! # }
//! ```

mod line_decoder;
mod line_source;

pub use line_decoder::LineDecoder;
pub use line_source::{DEFAULT_LINE_LIMIT, LineReader, LineSource};
