use crate::codec::DEFAULT_LINE_LIMIT;

const DEFAULT_MAX_IDLE: usize = 64;
const DEFAULT_BUFFER_CAPACITY: usize = 1024;

/// Limits and pool sizes for a [`HeadParser`](crate::parser::HeadParser).
///
/// ```
/// use micro_preamble::parser::ParserConfig;
///
/// let config = ParserConfig::default().line_limit(4096).max_idle_buffers(16);
/// assert_eq!(config.get_line_limit(), 4096);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    line_limit: usize,
    max_idle_buffers: usize,
    buffer_capacity: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            line_limit: DEFAULT_LINE_LIMIT,
            max_idle_buffers: DEFAULT_MAX_IDLE,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

impl ParserConfig {
    /// Maximum characters in one line, terminator excluded.
    #[must_use]
    pub fn line_limit(mut self, line_limit: usize) -> Self {
        self.line_limit = line_limit;
        self
    }

    /// How many released buffers and header tables each pool keeps.
    #[must_use]
    pub fn max_idle_buffers(mut self, max_idle_buffers: usize) -> Self {
        self.max_idle_buffers = max_idle_buffers;
        self
    }

    /// Initial capacity of a newly allocated character buffer.
    #[must_use]
    pub fn buffer_capacity(mut self, buffer_capacity: usize) -> Self {
        self.buffer_capacity = buffer_capacity;
        self
    }

    pub fn get_line_limit(&self) -> usize {
        self.line_limit
    }

    pub fn get_max_idle_buffers(&self) -> usize {
        self.max_idle_buffers
    }

    pub fn get_buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }
}
