//! Renders a syntax tree as nested HTML spans and as a flat list of node
//! records, in one walk.
//!
//! Both outputs are built by the same callbacks, so the nesting of the
//! spans and the `parent` links of the records always agree. Span `data-id`
//! attributes point at the record with that id.

mod location;
mod record;
mod response;
mod statistics;
mod structure;
mod text;
mod trivia;
mod visitor;

use explorer_syntax::SyntaxTree;
use serde::{Deserialize, Serialize};

pub use location::{LocationConverter, SourceLocation};
pub use record::{NodeRecord, Range, StructureProperty, StructureValue, SyntaxCategory, TokenInfo};
pub use response::SyntaxResponse;
pub use statistics::{StatisticsRow, statistics};
pub use structure::structure;
pub use text::{
    display_invisibles, escape_html, source_accurate_text, substitute_invisibles,
    transform_whitespaces,
};
pub use trivia::render_trivia;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SerializeOptions {
    /// Render tokens inserted by error recovery instead of leaving them out.
    pub show_missing_tokens: bool,
}

impl SerializeOptions {
    /// Reads option words such as `showmissing`. Unknown words are ignored.
    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        let mut options = Self::default();
        for word in words {
            if word.eq_ignore_ascii_case("showmissing") {
                options.show_missing_tokens = true;
            }
        }
        options
    }
}

/// Markup and records of one tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Serialized {
    pub html: String,
    /// Records in pre-order; a record's id is its index.
    pub nodes: Vec<NodeRecord>,
}

pub fn serialize(
    tree: &SyntaxTree,
    converter: &LocationConverter<'_>,
    options: &SerializeOptions,
) -> Serialized {
    let serialized = visitor::Visitor::new(*converter, options).walk(tree.root());

    log::debug!(
        "serialized {} nodes and {} tokens into {} records and {} bytes of markup",
        tree.node_count(),
        tree.token_count(),
        serialized.nodes.len(),
        serialized.html.len()
    );

    serialized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_words() {
        assert!(SerializeOptions::from_words(["fold", "showmissing"]).show_missing_tokens);
        assert!(!SerializeOptions::from_words(["fold"]).show_missing_tokens);
    }

    #[test]
    fn options_from_json() {
        let options: SerializeOptions = serde_json::from_str(r#"{"showMissingTokens":true}"#).unwrap();
        assert!(options.show_missing_tokens);
        let options: SerializeOptions = serde_json::from_str("{}").unwrap();
        assert!(!options.show_missing_tokens);
    }
}
