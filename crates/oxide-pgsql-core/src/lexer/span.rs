//! Source location tracking for tokens and error reports.

/// A byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Creates an empty span at the given offset.
    #[must_use]
    pub const fn at(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Returns the length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merges two spans into one that covers both.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Returns the 1-based line number of the span start within `source`.
    #[must_use]
    pub fn line(&self, source: &str) -> usize {
        let upto = self.start.min(source.len());
        source.as_bytes()[..upto].iter().filter(|&&b| b == b'\n').count() + 1
    }

    /// Returns the source text from the span start to the end of input.
    #[must_use]
    pub fn fragment<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start..).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len() {
        let span = Span::new(5, 10);
        assert_eq!(span.len(), 5);
        assert!(Span::at(3).is_empty());
    }

    #[test]
    fn test_span_merge() {
        let merged = Span::new(8, 15).merge(Span::new(5, 10));
        assert_eq!(merged, Span::new(5, 15));
    }

    #[test]
    fn test_span_line_and_fragment() {
        let source = "select\n  foo\n  from bar";
        let span = Span::new(15, 19);
        assert_eq!(span.line(source), 3);
        assert_eq!(span.fragment(source), "from bar");
        assert_eq!(Span::at(100).fragment(source), "");
    }
}
