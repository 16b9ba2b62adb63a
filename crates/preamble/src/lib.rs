//! A streaming async parser for HTTP/1.x message heads
//!
//! This crate reads the preamble of an HTTP/1.x message (the request or status
//! line followed by the header block) from an asynchronous line source. It does
//! not touch the message body: whatever follows the blank line stays in the
//! source for the caller to consume.
//!
//! # Features
//!
//! - Request lines, status lines and standalone header blocks
//! - Zero-copy tokens: every method, uri, name and value is an offset into one
//!   character buffer per message
//! - Canonical methods and versions recognised through a prefix tree
//! - Case-insensitive header lookup through precomputed hashes
//! - Pooled buffers and header tables, returned on success, error and
//!   cancellation
//! - Per-line length limit, 8192 characters by default
//!
//! # Example
//!
//! ```no_run
//! use micro_preamble::codec::LineReader;
//! use micro_preamble::parser::HeadParser;
//! use tokio::net::TcpListener;
//! use tracing::{info, warn};
//!
//! #[tokio::main]
//! async fn main() {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await.expect("bind");
//!     let parser = HeadParser::new();
//!
//!     loop {
//!         let Ok((stream, _)) = listener.accept().await else { continue };
//!         let parser = parser.clone();
//!
//!         tokio::spawn(async move {
//!             let mut source = LineReader::new(stream);
//!             loop {
//!                 match parser.parse_request(&mut source).await {
//!                     Ok(Some(request)) => {
//!                         info!(method = request.method(), uri = request.uri(), "received request");
//!                         request.release();
//!                     }
//!                     Ok(None) => break,
//!                     Err(e) => {
//!                         warn!(cause = %e, "bad request head");
//!                         break;
//!                     }
//!                 }
//!             }
//!         });
//!     }
//! }
//! ```

pub mod codec;
pub mod parser;
pub mod pool;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;

#[cfg(test)]
mod test_utils;

pub use parser::{HeadParser, ParserConfig};
pub use protocol::{HeaderBlock, ParseError, Request, Response};
