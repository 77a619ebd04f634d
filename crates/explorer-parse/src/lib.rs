//! Recovering parser for a small Swift-flavoured language.
//!
//! Parsing never fails: tokens the grammar expected but did not find are
//! inserted as missing tokens, and tokens that fit nowhere are collected in
//! `UNEXPECTED_NODES`. Every recovery is reported as a [`Diagnostic`].

use explorer_errors::Diagnostic;
use explorer_syntax::SyntaxTree;
use serde::{Deserialize, Serialize};

mod fold;
mod grammar;
mod parser;

pub use fold::fold;

/// Version reported alongside serialized trees.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    pub tree: SyntaxTree,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Fold operator sequences into nested infix expressions.
    pub fold: bool,
}

impl ParseOptions {
    /// Reads option words such as `fold`. Unknown words are ignored.
    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        let mut options = Self::default();
        for word in words {
            if word.eq_ignore_ascii_case("fold") {
                options.fold = true;
            }
        }
        options
    }
}

pub fn parse(text: &str) -> Parse {
    let mut parser = parser::Parser::new(text);
    grammar::items::source_file(&mut parser);
    let (tree, diagnostics) = parser.build_tree();

    log::debug!(
        "parsed {} bytes into {} nodes and {} tokens with {} diagnostics",
        text.len(),
        tree.node_count(),
        tree.token_count(),
        diagnostics.len()
    );

    Parse { tree, diagnostics }
}

pub fn parse_with(text: &str, options: ParseOptions) -> Parse {
    let mut parse = parse(text);
    if options.fold {
        parse.tree = fold(&parse.tree);
    }
    parse
}
