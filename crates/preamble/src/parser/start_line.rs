//! Request line and status line parsing.
//!
//! Both run over a single absorbed line held in the parse buffer and never
//! suspend. Tokens come back as [`Token`] views; nothing is copied.

use crate::ensure;
use crate::parser::Cursor;
use crate::parser::tokenizer::{find_space_or_end, next_token, skip_spaces};
use crate::parser::tree::{METHODS, Match, VERSIONS};
use crate::protocol::{ParseError, Span, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RequestLine {
    pub(crate) method: Token,
    pub(crate) uri: Token,
    pub(crate) version: Token,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StatusLine {
    pub(crate) version: Token,
    pub(crate) status_code: u16,
    pub(crate) status_text: Span,
}

/// Parses `METHOD URI VERSION` from the cursor window.
///
/// # Errors
///
/// - [`ParseError::MalformedRequestLine`] if text follows the version
/// - [`ParseError::MissingUri`] / [`ParseError::MissingVersion`] if a token is absent
pub(crate) fn parse_request_line(text: &str, cursor: &mut Cursor) -> Result<RequestLine, ParseError> {
    let method = parse_method(text, cursor);
    let uri = parse_uri(text, cursor);
    let version = parse_version(text, cursor);
    skip_spaces(text, cursor);

    ensure!(cursor.is_empty(), ParseError::malformed_request_line(cursor.span().as_str(text)));
    ensure!(!uri.is_empty(), ParseError::MissingUri);
    ensure!(!version.is_empty(), ParseError::MissingVersion);

    Ok(RequestLine { method, uri, version })
}

/// Parses `VERSION CODE [REASON]` from the cursor window.
///
/// The reason phrase is everything after the code, possibly empty.
pub(crate) fn parse_status_line(text: &str, cursor: &mut Cursor) -> Result<StatusLine, ParseError> {
    let version = parse_version(text, cursor);
    ensure!(!version.is_empty(), ParseError::MissingVersion);

    let status_code = parse_status_code(text, cursor)?;
    skip_spaces(text, cursor);
    let status_text = cursor.span();
    cursor.start = cursor.end;

    Ok(StatusLine { version, status_code, status_text })
}

fn parse_method(text: &str, cursor: &mut Cursor) -> Token {
    skip_spaces(text, cursor);
    match METHODS.match_token(text, cursor) {
        Match::Matched(method) => Token::Known(method),
        Match::Unmatched => next_token(text, cursor).into(),
    }
}

fn parse_uri(text: &str, cursor: &mut Cursor) -> Token {
    skip_spaces(text, cursor);
    let start = cursor.start;
    let space_or_end = find_space_or_end(text, cursor);

    match space_or_end - start {
        0 => Token::EMPTY,
        1 if text.as_bytes()[start] == b'/' => {
            cursor.start = space_or_end;
            Token::Known("/")
        }
        _ => {
            cursor.start = space_or_end;
            Token::Span(Span::new(start, space_or_end))
        }
    }
}

pub(crate) fn parse_version(text: &str, cursor: &mut Cursor) -> Token {
    skip_spaces(text, cursor);
    if cursor.is_empty() {
        return Token::EMPTY;
    }

    match VERSIONS.match_token(text, cursor) {
        Match::Matched(version) => Token::Known(version),
        Match::Unmatched => next_token(text, cursor).into(),
    }
}

/// Accumulates decimal digits up to the next space or the end of the window.
///
/// Leaves the cursor on the space that ended the code.
///
/// # Errors
///
/// Returns [`ParseError::InvalidStatusCode`] carrying the whole offending run
/// on the first byte that is neither a digit nor a space, when no digit is
/// present, or when the code does not fit in a `u16`.
pub(crate) fn parse_status_code(text: &str, cursor: &mut Cursor) -> Result<u16, ParseError> {
    skip_spaces(text, cursor);

    let mut status: u16 = 0;
    let mut new_start = cursor.end;

    for (offset, ch) in text.as_bytes()[cursor.start..cursor.end].iter().copied().enumerate() {
        if ch == b' ' {
            new_start = cursor.start + offset;
            break;
        }
        ensure!(ch.is_ascii_digit(), invalid_status_code(text, cursor));
        status = status
            .checked_mul(10)
            .and_then(|s| s.checked_add(u16::from(ch - b'0')))
            .ok_or_else(|| invalid_status_code(text, cursor))?;
    }

    ensure!(new_start > cursor.start, invalid_status_code(text, cursor));
    cursor.start = new_start;
    Ok(status)
}

fn invalid_status_code(text: &str, cursor: &Cursor) -> ParseError {
    ParseError::invalid_status_code(&text[cursor.start..find_space_or_end(text, cursor)])
}
