//! Parsed HTTP request heads.

use http::{Method, Uri, Version};

use crate::pool::Pooled;
use crate::protocol::{HeaderTable, Headers, ParseError, Token};

/// The request line and header block of one HTTP request.
///
/// Method, uri, version and every header are views into the character buffer
/// the request was parsed into. The request owns that buffer and returns it to
/// its pool when released or dropped.
#[derive(Debug)]
pub struct Request {
    method: Token,
    uri: Token,
    version: Token,
    headers: HeaderTable,
    buffer: Pooled<String>,
}

impl Request {
    pub(crate) fn new(method: Token, uri: Token, version: Token, headers: HeaderTable, buffer: Pooled<String>) -> Self {
        Self { method, uri, version, headers, buffer }
    }

    /// Returns the request method, e.g. `GET`.
    pub fn method(&self) -> &str {
        self.method.as_str(&self.buffer)
    }

    /// Returns the request target exactly as sent.
    pub fn uri(&self) -> &str {
        self.uri.as_str(&self.buffer)
    }

    /// Returns the protocol version token, e.g. `HTTP/1.1`.
    pub fn version(&self) -> &str {
        self.version.as_str(&self.buffer)
    }

    pub fn method_token(&self) -> Token {
        self.method
    }

    pub fn version_token(&self) -> Token {
        self.version
    }

    pub fn headers(&self) -> Headers<'_> {
        self.headers.view(&self.buffer)
    }

    /// Returns the raw text of the head, request line and header lines
    /// concatenated without line terminators.
    pub fn as_text(&self) -> &str {
        &self.buffer
    }

    /// Returns the buffer and header storage to their pools.
    pub fn release(self) {
        drop(self);
    }

    /// Builds an [`http::Request`] without a body from this head.
    ///
    /// # Errors
    ///
    /// Returns an error when the method, uri, version or a header is not
    /// accepted by the `http` crate.
    pub fn to_http(&self) -> Result<http::Request<()>, ParseError> {
        let method = Method::from_bytes(self.method().as_bytes())
            .map_err(|e| ParseError::invalid_method(format!("{}: {e}", self.method())))?;
        let uri = self.uri().parse::<Uri>().map_err(|e| ParseError::invalid_uri(format!("{}: {e}", self.uri())))?;
        let version = http_version(self.version())?;

        let mut request = http::Request::new(());
        *request.method_mut() = method;
        *request.uri_mut() = uri;
        *request.version_mut() = version;
        *request.headers_mut() = self.headers().to_header_map()?;
        Ok(request)
    }
}

/// Maps a version token onto [`http::Version`].
pub(crate) fn http_version(version: &str) -> Result<Version, ParseError> {
    match version {
        "HTTP/1.1" => Ok(Version::HTTP_11),
        "HTTP/1.0" => Ok(Version::HTTP_10),
        "HTTP/0.9" => Ok(Version::HTTP_09),
        // http2 and http3 have no textual preamble
        other => Err(ParseError::invalid_version(other)),
    }
}
