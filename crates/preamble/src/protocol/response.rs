//! Parsed HTTP response heads.

use http::StatusCode;

use crate::pool::Pooled;
use crate::protocol::request::http_version;
use crate::protocol::{HeaderTable, Headers, ParseError, Span, Token};

/// The status line and header block of one HTTP response.
///
/// Like [`Request`](crate::protocol::Request), the response owns the buffer its
/// tokens and headers point into.
#[derive(Debug)]
pub struct Response {
    version: Token,
    status_code: u16,
    status_text: Span,
    headers: HeaderTable,
    buffer: Pooled<String>,
}

impl Response {
    pub(crate) fn new(
        version: Token,
        status_code: u16,
        status_text: Span,
        headers: HeaderTable,
        buffer: Pooled<String>,
    ) -> Self {
        Self { version, status_code, status_text, headers, buffer }
    }

    pub fn version(&self) -> &str {
        self.version.as_str(&self.buffer)
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Returns the reason phrase, possibly empty.
    pub fn status_text(&self) -> &str {
        self.status_text.as_str(&self.buffer)
    }

    pub fn headers(&self) -> Headers<'_> {
        self.headers.view(&self.buffer)
    }

    pub fn as_text(&self) -> &str {
        &self.buffer
    }

    /// Returns the buffer and header storage to their pools.
    pub fn release(self) {
        drop(self);
    }

    /// Builds an [`http::Response`] without a body from this head.
    ///
    /// # Errors
    ///
    /// Returns an error when the status code, version or a header is not
    /// accepted by the `http` crate.
    pub fn to_http(&self) -> Result<http::Response<()>, ParseError> {
        let status = StatusCode::from_u16(self.status_code)
            .map_err(|e| ParseError::invalid_status_code(format!("{}: {e}", self.status_code)))?;
        let version = http_version(self.version())?;

        let mut response = http::Response::new(());
        *response.status_mut() = status;
        *response.version_mut() = version;
        *response.headers_mut() = self.headers().to_header_map()?;
        Ok(response)
    }
}

/// A header block parsed on its own, e.g. chunked trailers.
#[derive(Debug)]
pub struct HeaderBlock {
    headers: HeaderTable,
    buffer: Pooled<String>,
}

impl HeaderBlock {
    pub(crate) fn new(headers: HeaderTable, buffer: Pooled<String>) -> Self {
        Self { headers, buffer }
    }

    pub fn headers(&self) -> Headers<'_> {
        self.headers.view(&self.buffer)
    }

    pub fn release(self) {
        drop(self);
    }
}
