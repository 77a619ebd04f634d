//! Named children of a node, as shown in the structure view.

use explorer_syntax::{NodeOrToken, Shape, SyntaxNode};

use crate::record::{StructureProperty, StructureValue};
use crate::text::{display_invisibles, escape_html};

/// Describes the children of `node` according to its shape.
///
/// Layout nodes report every declared slot, absent ones as `nil`.
/// Collections report their element type and raw child count. Choice nodes
/// report nothing; the chosen alternative is a child with its own record.
pub fn structure(node: SyntaxNode<'_>) -> Vec<StructureProperty> {
    match node.kind().shape() {
        Shape::Layout(slots) => slots
            .iter()
            .enumerate()
            .map(|(index, slot)| match node.slot(index) {
                None => StructureProperty::text(slot.name, "nil"),
                Some(NodeOrToken::Token(token)) => {
                    let text = if token.is_missing() {
                        "MISSING".to_owned()
                    } else {
                        display_invisibles(&escape_html(token.text()))
                    };
                    StructureProperty {
                        name: slot.name.to_owned(),
                        value: Some(StructureValue {
                            text,
                            kind: Some(escape_html(&token.description())),
                        }),
                        reference: None,
                    }
                }
                Some(NodeOrToken::Node(child)) => {
                    let name = escape_html(child.kind().name());
                    StructureProperty {
                        name: slot.name.to_owned(),
                        value: Some(StructureValue { text: name.clone(), kind: None }),
                        reference: Some(name),
                    }
                }
            })
            .collect(),
        Shape::Collection { element } => vec![
            StructureProperty::text("Element", element),
            StructureProperty::text("Count", node.child_count().to_string()),
        ],
        Shape::Choices(_) => Vec::new(),
    }
}
