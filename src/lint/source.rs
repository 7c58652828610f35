//! Byte-offset to line/column mapping for a source file

/// Precomputed table of line start offsets.
///
/// Line and column numbers are 1-based. Offsets past the end of the file
/// resolve to the last line, so callers never have to bounds-check before
/// asking for a position.
#[derive(Debug, Clone)]
pub struct LineMap {
    line_starts: Vec<usize>,
}

impl LineMap {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// The 1-based line containing `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx + 1,
            Err(idx) => idx,
        }
    }

    /// The 1-based (line, column) of `offset`.
    ///
    /// Column is a byte column, which keeps reported positions consistent
    /// with fix ranges.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = self.line_of(offset);
        let column = offset - self.line_starts[line - 1] + 1;
        (line, column)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_line() {
        let map = LineMap::new("foo(a, b)");
        assert_eq!(map.line_col(0), (1, 1));
        assert_eq!(map.line_col(4), (1, 5));
        assert_eq!(map.line_count(), 1);
    }

    #[test]
    fn multiple_lines() {
        let map = LineMap::new("foo(a,\n b)\n");
        assert_eq!(map.line_of(0), 1);
        assert_eq!(map.line_of(5), 1);
        // First byte after the newline
        assert_eq!(map.line_of(7), 2);
        assert_eq!(map.line_col(8), (2, 2));
        assert_eq!(map.line_count(), 3);
    }

    #[test]
    fn offset_past_end_resolves_to_last_line() {
        let map = LineMap::new("a\nb");
        assert_eq!(map.line_of(100), 2);
    }

    #[test]
    fn offset_at_line_start() {
        let map = LineMap::new("ab\ncd");
        assert_eq!(map.line_of(3), 2);
        assert_eq!(map.line_col(3), (2, 1));
    }
}
