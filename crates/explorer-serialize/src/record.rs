//! Flat node records consumed by the tree, structure and statistics views.
//!
//! Field names and their order are part of the JSON contract with the
//! browser client.

use serde::{Deserialize, Serialize};

use crate::location::SourceLocation;

/// One visited node or token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Pre-order position of the record; also its index in the record list.
    pub id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<u32>,
    /// Kind name without its `Syntax` suffix, or the token text for tokens.
    pub text: String,
    pub range: Range,
    pub structure: Vec<StructureProperty>,
    #[serde(rename = "type")]
    pub category: SyntaxCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<TokenInfo>,
    /// `missing` for tokens inserted by error recovery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    pub start_row: u32,
    pub start_column: u32,
    pub grapheme_start_column: u32,
    pub end_row: u32,
    pub end_column: u32,
    pub grapheme_end_column: u32,
}

impl Range {
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self {
            start_row: start.line,
            start_column: start.column,
            grapheme_start_column: start.grapheme_column,
            end_row: end.line,
            end_column: end.column,
            grapheme_end_column: end.grapheme_column,
        }
    }

    /// The `data-range` attribute value of a span.
    pub(crate) fn to_attribute(self) -> String {
        format!(
            r#"{{"startRow":{},"startColumn":{},"endRow":{},"endColumn":{}}}"#,
            self.start_row, self.start_column, self.end_row, self.end_column
        )
    }
}

/// A named child of a layout node, or a synthesized collection property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureProperty {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<StructureValue>,
    /// Type name of a child node, linking the property to that node's record.
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureValue {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl StructureProperty {
    pub(crate) fn text(name: &str, text: impl Into<String>) -> Self {
        Self {
            name: name.to_owned(),
            value: Some(StructureValue { text: text.into(), kind: None }),
            reference: None,
        }
    }
}

/// Coarse grouping used to color the tree view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyntaxCategory {
    Decl,
    Expr,
    Pattern,
    Type,
    Collection,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub kind: String,
    /// Rendered leading trivia with whitespace shown as glyphs.
    pub leading_trivia: String,
    pub trailing_trivia: String,
}
