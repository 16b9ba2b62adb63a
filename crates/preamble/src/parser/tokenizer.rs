//! Stateless scanning routines over a buffer and a [`Cursor`].
//!
//! Every routine only looks at `text[cursor.start..cursor.end]` and reports
//! positions as absolute offsets into `text`.

use crate::parser::Cursor;
use crate::protocol::Span;

#[inline]
fn is_space(b: u8) -> bool {
    b.is_ascii_whitespace()
}

/// Advances `cursor.start` past leading whitespace.
pub(crate) fn skip_spaces(text: &str, cursor: &mut Cursor) {
    let bytes = text.as_bytes();
    while cursor.start < cursor.end && is_space(bytes[cursor.start]) {
        cursor.start += 1;
    }
}

/// Moves `cursor.end` back over trailing whitespace.
pub(crate) fn trim_end(text: &str, cursor: &mut Cursor) {
    let bytes = text.as_bytes();
    while cursor.end > cursor.start && is_space(bytes[cursor.end - 1]) {
        cursor.end -= 1;
    }
}

/// Returns the offset of the next whitespace, or `cursor.end` if there is none.
pub(crate) fn find_space_or_end(text: &str, cursor: &Cursor) -> usize {
    text.as_bytes()[cursor.start..cursor.end]
        .iter()
        .position(|b| is_space(*b))
        .map_or(cursor.end, |offset| cursor.start + offset)
}

/// Takes everything up to the next whitespace as a token.
pub(crate) fn next_token(text: &str, cursor: &mut Cursor) -> Span {
    let space_or_end = find_space_or_end(text, cursor);
    let token = Span::new(cursor.start, space_or_end);
    cursor.start = space_or_end;
    token
}

/// Finds the last name character before the first colon of a header line.
///
/// Whitespace between the name and the colon is not part of the name, so
/// `Host : x` yields the index of `t`. A colon in the first position belongs
/// to the name, so `:a: b` names the header `:a`. Returns `None` if the line
/// has no other colon or nothing but whitespace precedes it.
pub(crate) fn find_letter_before_colon(text: &str, cursor: &Cursor) -> Option<usize> {
    let mut last_letter = None;
    for (idx, b) in text.as_bytes()[cursor.start..cursor.end].iter().enumerate() {
        match *b {
            b':' if idx > 0 => return last_letter,
            b if is_space(b) => {}
            _ => last_letter = Some(cursor.start + idx),
        }
    }
    None
}

/// Advances past whitespace and at most one colon.
pub(crate) fn skip_spaces_and_colon(text: &str, cursor: &mut Cursor) {
    let bytes = text.as_bytes();
    let mut colon_seen = false;
    while cursor.start < cursor.end {
        match bytes[cursor.start] {
            b':' if !colon_seen => colon_seen = true,
            b if is_space(b) => {}
            _ => break,
        }
        cursor.start += 1;
    }
}
