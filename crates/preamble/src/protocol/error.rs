use std::io;
use std::str::Utf8Error;
use thiserror::Error;

/// Errors raised while parsing an HTTP/1.x preamble.
///
/// Every variant is terminal for the parse attempt that produced it. Buffers
/// and header tables owned by that attempt are already released by the time
/// the caller sees the error.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("line exceeds the limit of {limit} characters")]
    LineTooLong { limit: usize },

    #[error("extra characters in request line: {remaining}")]
    MalformedRequestLine { remaining: String },

    #[error("uri is not specified")]
    MissingUri,

    #[error("http version is not specified")]
    MissingVersion,

    #[error("no colon in http header: {line}")]
    MissingColon { line: String },

    #[error("illegal status code: {code}")]
    InvalidStatusCode { code: String },

    #[error("stream ended before the end of the header block")]
    IncompleteHeaders,

    #[error("line is not valid utf-8: {source}")]
    InvalidUtf8 { source: Utf8Error },

    #[error("invalid http method: {method}")]
    InvalidMethod { method: String },

    #[error("invalid http uri: {uri}")]
    InvalidUri { uri: String },

    #[error("invalid http version: {version}")]
    InvalidVersion { version: String },

    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn line_too_long(limit: usize) -> Self {
        Self::LineTooLong { limit }
    }

    pub fn malformed_request_line<S: ToString>(remaining: S) -> Self {
        Self::MalformedRequestLine { remaining: remaining.to_string() }
    }

    pub fn missing_colon<S: ToString>(line: S) -> Self {
        Self::MissingColon { line: line.to_string() }
    }

    pub fn invalid_status_code<S: ToString>(code: S) -> Self {
        Self::InvalidStatusCode { code: code.to_string() }
    }

    pub fn invalid_utf8(source: Utf8Error) -> Self {
        Self::InvalidUtf8 { source }
    }

    pub fn invalid_method<S: ToString>(method: S) -> Self {
        Self::InvalidMethod { method: method.to_string() }
    }

    pub fn invalid_uri<S: ToString>(uri: S) -> Self {
        Self::InvalidUri { uri: uri.to_string() }
    }

    pub fn invalid_version<S: ToString>(version: S) -> Self {
        Self::InvalidVersion { version: version.to_string() }
    }

    pub fn invalid_header<S: ToString>(reason: S) -> Self {
        Self::InvalidHeader { reason: reason.to_string() }
    }
}
