//! String transforms shared by the markup and the node records.

use explorer_syntax::SyntaxToken;

/// Visible stand-in for a space in titles and records.
pub(crate) const SPACE_GLYPH: &str = "␣";
/// Visible stand-in for a line feed in titles and records.
pub(crate) const NEWLINE_GLYPH: &str = "↲";

const NBSP: &str = "&nbsp;";
const BR: &str = "<br/>";

/// Replaces `&`, `<`, `>`, `"` and `'` with their entities.
///
/// Escaping twice escapes the ampersands of the first pass again.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Spaces and line feeds as glyphs, for attribute values and tooltips.
pub fn display_invisibles(text: &str) -> String {
    text.replace(' ', SPACE_GLYPH).replace('\n', NEWLINE_GLYPH)
}

/// Spaces and line feeds as markup, for rendered body text.
pub fn substitute_invisibles(text: &str) -> String {
    text.replace(' ', NBSP).replace('\n', BR)
}

/// Turns markup whitespace of an already rendered fragment into glyphs,
/// keeping the line breaks.
pub fn transform_whitespaces(fragment: &str) -> String {
    fragment.replace(NBSP, SPACE_GLYPH).replace(BR, "↲<br/>")
}

/// The token's text exactly as it appears in the source.
///
/// Missing tokens have no source text and fall back to the text their kind
/// always has.
pub fn source_accurate_text(token: SyntaxToken<'_>) -> &str {
    token.text()
}
