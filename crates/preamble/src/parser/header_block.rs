//! Header block parsing: `name: value` lines up to the first blank line.

use crate::codec::LineSource;
use crate::ensure;
use crate::parser::Cursor;
use crate::parser::tokenizer::{find_letter_before_colon, skip_spaces, skip_spaces_and_colon, trim_end};
use crate::protocol::{HeaderEntry, HeaderTable, ParseError, Span, hash_lowercase};

/// Reads header lines into `table` until a blank line.
///
/// The cursor is left at the end of the buffer. On any error `table` is
/// dropped here, which hands its storage back to the pool.
///
/// # Errors
///
/// - [`ParseError::IncompleteHeaders`] if the source ends before the blank line
/// - [`ParseError::MissingColon`] for a line without a name/value delimiter
/// - any error of [`LineSource::try_read_line`]
pub(crate) async fn parse_header_block<S>(
    source: &mut S,
    buffer: &mut String,
    cursor: &mut Cursor,
    mut table: HeaderTable,
    line_limit: usize,
) -> Result<HeaderTable, ParseError>
where
    S: LineSource + ?Sized,
{
    loop {
        cursor.start = buffer.len();
        ensure!(source.try_read_line(buffer, line_limit).await?, ParseError::IncompleteHeaders);
        cursor.end = buffer.len();

        skip_spaces(buffer, cursor);
        if cursor.is_empty() {
            return Ok(table);
        }

        table.put(parse_header_line(buffer, cursor)?);
    }
}

/// Splits one non-blank header line into a [`HeaderEntry`].
///
/// The name ends at the last non-space character before the first colon and
/// the value is the rest of the line without surrounding whitespace.
pub(crate) fn parse_header_line(text: &str, cursor: &mut Cursor) -> Result<HeaderEntry, ParseError> {
    let name_start = cursor.start;
    let name_end = match find_letter_before_colon(text, cursor) {
        Some(last_letter) => last_letter + 1,
        None => return Err(ParseError::missing_colon(cursor.span().as_str(text))),
    };
    let name = Span::new(name_start, name_end);

    cursor.start = name_end;
    skip_spaces_and_colon(text, cursor);
    trim_end(text, cursor);
    let value = cursor.span();
    cursor.start = cursor.end;

    Ok(HeaderEntry::new(hash_lowercase(name.as_str(text)), hash_lowercase(value.as_str(text)), name, value))
}
