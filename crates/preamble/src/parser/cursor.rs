use crate::protocol::Span;

/// The unconsumed window `start..end` of the line being parsed.
///
/// Invariant: `start <= end <= buffer.len()` whenever a tokenizer looks at it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Cursor {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl Cursor {
    pub(crate) fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "cursor start {start} after end {end}");
        Self { start, end }
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    #[inline]
    pub(crate) fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}
