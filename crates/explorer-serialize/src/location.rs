use line_index::{LineCol, LineIndex};
use text_size::{TextRange, TextSize};

/// A 1-based position in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: u32,
    /// Column in UTF-8 bytes.
    pub column: u32,
    /// Column in UTF-16 code units, which is what browser editors count.
    pub grapheme_column: u32,
}

/// Resolves text offsets to 1-based lines and columns.
///
/// Lines are split at `\n` only; a lone `\r` does not start a new line.
#[derive(Clone, Copy)]
pub struct LocationConverter<'a> {
    text: &'a str,
    line_index: &'a LineIndex,
}

impl<'a> LocationConverter<'a> {
    /// `line_index` must have been built from `text`.
    pub fn new(text: &'a str, line_index: &'a LineIndex) -> Self {
        Self { text, line_index }
    }

    /// Offsets inside a character or past the end of the text resolve
    /// against the previous character boundary and keep the raw column.
    pub fn location(&self, offset: TextSize) -> SourceLocation {
        let boundary = self.char_boundary(offset);
        let line_col = self
            .line_index
            .try_line_col(boundary)
            .unwrap_or(LineCol { line: 0, col: u32::from(boundary) });

        let line_start = u32::from(boundary) - line_col.col;
        let column = u32::from(offset) - line_start + 1;
        let grapheme_column = self
            .text
            .get(line_start as usize..u32::from(offset) as usize)
            .map_or(column, |prefix| prefix.encode_utf16().count() as u32 + 1);

        SourceLocation { line: line_col.line + 1, column, grapheme_column }
    }

    pub fn range(&self, range: TextRange) -> (SourceLocation, SourceLocation) {
        (self.location(range.start()), self.location(range.end()))
    }

    fn char_boundary(&self, offset: TextSize) -> TextSize {
        let offset = (u32::from(offset) as usize).min(self.text.len());
        let boundary =
            (0..=offset).rev().find(|&index| self.text.is_char_boundary(index)).unwrap_or(0);
        TextSize::new(boundary as u32)
    }
}
