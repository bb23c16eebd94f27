//! Byte offset to line/column conversion.

/// Start offsets of every line of a source, for `O(log L)` lookups.
#[derive(Clone, Debug)]
pub struct LineIndex<'a> {
    source: &'a str,
    /// `starts[0] == 0`; `starts[n]` is the byte after the `n`th newline.
    starts: Vec<u32>,
}

impl<'a> LineIndex<'a> {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "sources are bounded by u32::MAX bytes"
    )]
    pub fn new(source: &'a str) -> Self {
        let mut starts = vec![0u32];
        starts.extend(memchr::memchr_iter(b'\n', source.as_bytes()).map(|i| (i + 1) as u32));
        LineIndex { source, starts }
    }

    /// 1-based line containing `offset`.
    #[allow(clippy::cast_possible_truncation, reason = "line count fits in u32")]
    pub fn line(&self, offset: u32) -> u32 {
        let idx = match self.starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        idx as u32 + 1
    }

    /// 1-based `(line, column)` of `offset`. Columns count characters.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let line = self.line(offset);
        let line_start = self.starts[(line - 1) as usize] as usize;
        let end = (offset as usize).min(self.source.len());
        let col = self
            .source
            .get(line_start..end)
            .map_or(0, |text| text.chars().count());
        (line, u32::try_from(col).unwrap_or(u32::MAX - 1) + 1)
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::LineIndex;

    #[test]
    fn first_line() {
        let index = LineIndex::new("abc");
        assert_eq!(index.line_col(0), (1, 1));
        assert_eq!(index.line_col(2), (1, 3));
        assert_eq!(index.line_col(3), (1, 4));
    }

    #[test]
    fn later_lines() {
        let index = LineIndex::new("a\nbc\n\nd");
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.line_col(1), (1, 2));
        assert_eq!(index.line_col(2), (2, 1));
        assert_eq!(index.line_col(4), (2, 3));
        assert_eq!(index.line_col(5), (3, 1));
        assert_eq!(index.line_col(6), (4, 1));
    }

    #[test]
    fn columns_count_characters() {
        let index = LineIndex::new("é = x");
        // `=` is at byte 3, the third character.
        assert_eq!(index.line_col(3), (1, 3));
    }

    #[test]
    fn offsets_past_the_end_clamp() {
        let index = LineIndex::new("ab");
        assert_eq!(index.line_col(10), (1, 3));
    }
}
