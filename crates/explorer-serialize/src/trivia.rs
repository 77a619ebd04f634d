//! Markup for trivia pieces.

use explorer_syntax::{SyntaxTrivia, TriviaPieceKind};

use crate::text::{display_invisibles, escape_html, substitute_invisibles};

/// Renders one trivia piece.
///
/// Whitespace turns into `&nbsp;` and `<br/>`, comments and other text
/// pieces into an inspectable `Trivia` span, and repetition pieces into the
/// repeated character.
pub fn render_trivia(piece: &SyntaxTrivia<'_>) -> String {
    let count = piece.count();
    match piece.kind {
        TriviaPieceKind::Spaces => "&nbsp;".repeat(count),
        TriviaPieceKind::Tabs => "&nbsp;".repeat(count * 2),
        TriviaPieceKind::VerticalTabs | TriviaPieceKind::Formfeeds => String::new(),
        TriviaPieceKind::Newlines
        | TriviaPieceKind::CarriageReturns
        | TriviaPieceKind::CarriageReturnLineFeeds => "<br/>".repeat(count),
        TriviaPieceKind::LineComment => wrap("lineComment", piece.text),
        TriviaPieceKind::BlockComment => wrap("blockComment", piece.text),
        TriviaPieceKind::DocLineComment => wrap("docLineComment", piece.text),
        TriviaPieceKind::DocBlockComment => wrap("docBlockComment", piece.text),
        TriviaPieceKind::Shebang => wrap("shebang", piece.text),
        TriviaPieceKind::UnexpectedText => wrap("unexpectedText", piece.text),
        TriviaPieceKind::Backslashes => "\\".repeat(count),
        TriviaPieceKind::Pounds => "#".repeat(count),
    }
}

fn wrap(class: &str, text: &str) -> String {
    let class = escape_html(class);
    format!(
        "<span class='{class}' data-title='{title}' data-content='{content}' data-type='Trivia'>{body}</span>",
        title = display_invisibles(&escape_html(text)),
        content = substitute_invisibles(&class),
        body = substitute_invisibles(&escape_html(text)),
    )
}
