//! Value types produced by the preamble parser.
//!
//! - **Tokens**: [`Span`] offsets and [`Token`] views into a parse buffer
//! - **Headers**: [`HeaderTable`] storage and the [`Headers`] lookup view
//! - **Messages**: [`Request`], [`Response`] and a standalone [`HeaderBlock`]
//! - **Errors**: [`ParseError`]
//!
//! A message owns the pooled buffer its views read from; every accessor borrows
//! from the message, so no view can outlive the text it points into.

mod error;
pub use error::ParseError;

mod token;
pub use token::Span;
pub use token::Token;

mod header;
pub(crate) use header::hash_lowercase;
pub use header::HeaderEntry;
pub use header::HeaderTable;
pub use header::Headers;

mod request;
pub use request::Request;

mod response;
pub use response::HeaderBlock;
pub use response::Response;
