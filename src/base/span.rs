//! Source positions: offsets, ranges and caret positions.

use std::fmt;

pub use text_size::TextRange;
pub use text_size::TextSize;

use super::FileId;

/// A caret position inside a document.
///
/// This is the `(document, offset)` pair an editor hands to the hierarchy
/// queries. It is consumed per query and never stored.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FilePosition {
    pub file: FileId,
    pub offset: TextSize,
}

impl FilePosition {
    #[inline]
    pub fn new(file: FileId, offset: impl Into<TextSize>) -> Self {
        Self {
            file,
            offset: offset.into(),
        }
    }
}

impl fmt::Display for FilePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.file, u32::from(self.offset))
    }
}

/// A line and column position in source text.
///
/// Both are 0-indexed internally and displayed 1-indexed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct LineCol {
    pub line: u32,
    /// Column in UTF-8 bytes.
    pub col: u32,
}

impl LineCol {
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

impl fmt::Debug for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Converts between byte offsets and line/column positions.
#[derive(Clone, Debug)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        line_starts.extend(
            text.match_indices('\n')
                .map(|(offset, _)| TextSize::from((offset + 1) as u32)),
        );
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Line/column of `offset`, or `None` when it lies past the end of text.
    pub fn line_col(&self, offset: TextSize) -> Option<LineCol> {
        if offset > self.len {
            return None;
        }
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let col = offset - self.line_starts[line];
        Some(LineCol {
            line: line as u32,
            col: col.into(),
        })
    }

    /// Byte offset of `line_col`.
    ///
    /// Returns `None` for a line that does not exist or a column past the
    /// end of its line.
    pub fn offset(&self, line_col: LineCol) -> Option<TextSize> {
        let line = line_col.line as usize;
        let start = *self.line_starts.get(line)?;
        let end = self.line_starts.get(line + 1).copied().unwrap_or(self.len);
        let offset = start + TextSize::from(line_col.col);
        (offset <= end).then_some(offset)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
