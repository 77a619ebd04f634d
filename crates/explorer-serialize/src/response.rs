use explorer_syntax::SyntaxTree;
use serde::{Deserialize, Serialize};

use crate::location::LocationConverter;
use crate::statistics::{StatisticsRow, statistics};
use crate::{SerializeOptions, serialize};

/// Payload returned to the browser client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxResponse {
    #[serde(rename = "syntaxHTML")]
    pub syntax_html: String,
    /// The node records, encoded as a JSON array.
    #[serde(rename = "syntaxJSON")]
    pub syntax_json: String,
    pub statistics: Vec<StatisticsRow>,
    pub version: String,
}

impl SyntaxResponse {
    pub fn new(
        tree: &SyntaxTree,
        converter: &LocationConverter<'_>,
        options: &SerializeOptions,
    ) -> serde_json::Result<Self> {
        let serialized = serialize(tree, converter, options);
        Ok(Self {
            syntax_json: serde_json::to_string(&serialized.nodes)?,
            statistics: statistics(&serialized.nodes),
            syntax_html: serialized.html,
            version: explorer_parse::VERSION.to_owned(),
        })
    }
}
