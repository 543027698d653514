//! Line/column conversion for byte offsets.
//!
//! Editors report cursors as (line, column); tokens carry byte spans. `LineIndex`
//! stores the offset of every line start so either form converts to the other in
//! `O(log lines)`.

use text_size::TextSize;

/// A 0-indexed line/column position. Columns are byte offsets within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

impl LineCol {
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

/// Maps byte offsets to line/column positions and back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Offset of the first byte of each line. Always starts with 0.
    line_starts: Vec<TextSize>,
    /// Total length of the indexed text.
    len: TextSize,
}

impl Default for LineIndex {
    fn default() -> Self {
        LineIndex::new("")
    }
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::from((offset + 1) as u32));
            }
        }
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Number of lines in the text. An empty text has one (empty) line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Length of the indexed text.
    pub fn len(&self) -> TextSize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == TextSize::from(0)
    }

    /// Convert an offset to a line/column position.
    ///
    /// Offsets past the end are clamped to the end of the text.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.len);
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let col = offset - self.line_starts[line];
        LineCol {
            line: line as u32,
            col: col.into(),
        }
    }

    /// Convert a line/column position back to an offset.
    ///
    /// Returns `None` if the line does not exist or the column lies past the
    /// end of that line (the newline itself is addressable).
    pub fn offset(&self, pos: LineCol) -> Option<TextSize> {
        let line = pos.line as usize;
        let start = *self.line_starts.get(line)?;
        let line_end = self
            .line_starts
            .get(line + 1)
            .map(|&next| next - TextSize::from(1))
            .unwrap_or(self.len);
        let offset = start + TextSize::from(pos.col);
        (offset <= line_end).then_some(offset)
    }
}
