//! Trivia pieces attached to tokens.

use text_size::TextSize;

/// Kinds of trivia stored alongside tokens.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TriviaPieceKind {
    Spaces,
    Tabs,
    VerticalTabs,
    Formfeeds,
    Newlines,
    CarriageReturns,
    CarriageReturnLineFeeds,
    /// `// ...` up to the end of the line.
    LineComment,
    /// `/* ... */`, possibly nested.
    BlockComment,
    /// `/// ...` up to the end of the line.
    DocLineComment,
    /// `/** ... */`.
    DocBlockComment,
    /// `#!...` on the first line of a file.
    Shebang,
    /// Characters the tokenizer does not understand.
    UnexpectedText,
    Backslashes,
    Pounds,
}

impl TriviaPieceKind {
    /// Returns `true` for pieces that end a line.
    #[inline]
    pub const fn is_newline(self) -> bool {
        matches!(self, Self::Newlines | Self::CarriageReturns | Self::CarriageReturnLineFeeds)
    }

    /// Returns `true` for pieces made of a single repeated character (or
    /// character pair), as opposed to pieces carrying free-form text.
    #[inline]
    pub const fn is_repetition(self) -> bool {
        !matches!(
            self,
            Self::LineComment
                | Self::BlockComment
                | Self::DocLineComment
                | Self::DocBlockComment
                | Self::Shebang
                | Self::UnexpectedText
        )
    }
}

/// A trivia fragment with its kind and length.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TriviaPiece {
    pub kind: TriviaPieceKind,
    pub len: TextSize,
}

impl TriviaPiece {
    /// Creates a new trivia piece with the given kind and length.
    pub fn new(kind: TriviaPieceKind, len: TextSize) -> Self {
        Self { kind, len }
    }

    /// Number of repetitions for repetition pieces; `1` for text pieces.
    ///
    /// A CRLF pair counts once.
    pub fn count(self) -> usize {
        let len = usize::from(self.len);
        match self.kind {
            TriviaPieceKind::CarriageReturnLineFeeds => len / 2,
            kind if kind.is_repetition() => len,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crlf_pairs_count_once() {
        let piece = TriviaPiece::new(TriviaPieceKind::CarriageReturnLineFeeds, TextSize::new(4));
        assert_eq!(piece.count(), 2);
        let piece = TriviaPiece::new(TriviaPieceKind::Spaces, TextSize::new(3));
        assert_eq!(piece.count(), 3);
        let piece = TriviaPiece::new(TriviaPieceKind::LineComment, TextSize::new(8));
        assert_eq!(piece.count(), 1);
    }
}
