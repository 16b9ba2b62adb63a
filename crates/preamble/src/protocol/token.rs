//! Zero-copy token views into a parse buffer.
//!
//! A parsed token is never copied out of the line it was read from. It is kept
//! as a [`Span`] of byte offsets into the character buffer, or, for values
//! recognised by a token tree, as a [`Token::Known`] static string.

/// A `start..end` byte range into a character buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Creates a span, `start` must not be greater than `end`.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} after end {end}");
        Self { start, end }
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Resolves the span against the buffer it was taken from.
    ///
    /// Span boundaries always fall on ASCII delimiters or line ends, so they
    /// are valid `char` boundaries of the buffer.
    #[inline]
    pub fn as_str<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// A parsed token: either a canonical vocabulary entry or a span of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Recognised by a token tree; no buffer lookup needed.
    Known(&'static str),
    /// Generic token text held in the buffer.
    Span(Span),
}

impl Token {
    pub(crate) const EMPTY: Token = Token::Known("");

    /// Resolves the token text, reading the buffer only for [`Token::Span`].
    #[inline]
    pub fn as_str<'a>(&self, text: &'a str) -> &'a str {
        match self {
            Token::Known(known) => known,
            Token::Span(span) => span.as_str(text),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        match self {
            Token::Known(known) => known.is_empty(),
            Token::Span(span) => span.is_empty(),
        }
    }

    /// Returns true if the token came from a token tree match.
    #[inline]
    pub fn is_known(&self) -> bool {
        matches!(self, Token::Known(_))
    }
}

impl From<Span> for Token {
    fn from(span: Span) -> Self {
        Token::Span(span)
    }
}
