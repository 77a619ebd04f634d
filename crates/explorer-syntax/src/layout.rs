//! Static description of every node kind's children.
//!
//! Layout nodes declare an ordered list of named slots, collection nodes a
//! homogeneous run of elements, and choice nodes wrap exactly one of several
//! alternatives. The builder consults this table to assign each child of a
//! layout node to a slot.

use crate::SyntaxBase::{self, Decl, Expr, Pattern, Stmt, Type};
use crate::SyntaxKind::{self, *};

/// How the children of a node kind are organised.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Shape {
    Layout(&'static [Slot]),
    Collection { element: &'static str },
    Choices(&'static [SlotKind]),
}

/// A named child position of a layout node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Slot {
    pub name: &'static str,
    pub kind: SlotKind,
}

/// What a slot accepts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SlotKind {
    Token(&'static [SyntaxKind]),
    Node(&'static [SyntaxKind]),
    Base(&'static [SyntaxBase]),
}

impl SlotKind {
    /// Returns `true` if a child of `kind` may occupy a slot of this kind.
    pub fn accepts(self, kind: SyntaxKind) -> bool {
        match self {
            Self::Token(kinds) => kind.is_token() && kinds.contains(&kind),
            Self::Node(kinds) => !kind.is_token() && kinds.contains(&kind),
            Self::Base(bases) => !kind.is_token() && bases.contains(&kind.base()),
        }
    }
}

macro_rules! token {
    ($name:literal, [$($kind:expr),+ $(,)?]) => {
        Slot { name: $name, kind: SlotKind::Token(&[$($kind),+]) }
    };
}

macro_rules! node {
    ($name:literal, [$($kind:expr),+ $(,)?]) => {
        Slot { name: $name, kind: SlotKind::Node(&[$($kind),+]) }
    };
}

macro_rules! base {
    ($name:literal, [$($base:expr),+ $(,)?]) => {
        Slot { name: $name, kind: SlotKind::Base(&[$($base),+]) }
    };
}

const fn collection(element: &'static str) -> Shape {
    Shape::Collection { element }
}

const TRAILING_COMMA: Slot = token!("trailingComma", [COMMA]);
const EXPRESSION: Slot = base!("expression", [Expr]);

impl SyntaxKind {
    /// Returns the child layout of a node kind.
    ///
    /// Token kinds have no children and report an empty layout.
    pub const fn shape(self) -> Shape {
        match self {
            SOURCE_FILE => Shape::Layout(&[
                node!("statements", [CODE_BLOCK_ITEM_LIST]),
                token!("endOfFileToken", [EOF]),
            ]),
            CODE_BLOCK_ITEM_LIST => collection("CodeBlockItemSyntax"),
            CODE_BLOCK_ITEM => Shape::Layout(&[
                base!("item", [Decl, Stmt, Expr]),
                token!("semicolon", [SEMICOLON]),
            ]),
            CODE_BLOCK => Shape::Layout(&[
                token!("leftBrace", [LEFT_BRACE]),
                node!("statements", [CODE_BLOCK_ITEM_LIST]),
                token!("rightBrace", [RIGHT_BRACE]),
            ]),

            IMPORT_DECL => Shape::Layout(&[
                token!("importKeyword", [IMPORT_KW]),
                node!("path", [IMPORT_PATH_COMPONENT_LIST]),
            ]),
            IMPORT_PATH_COMPONENT_LIST => collection("ImportPathComponentSyntax"),
            IMPORT_PATH_COMPONENT => Shape::Layout(&[
                token!("name", [IDENTIFIER]),
                token!("trailingPeriod", [PERIOD]),
            ]),
            VARIABLE_DECL => Shape::Layout(&[
                token!("bindingSpecifier", [LET_KW, VAR_KW]),
                node!("bindings", [PATTERN_BINDING_LIST]),
            ]),
            PATTERN_BINDING_LIST => collection("PatternBindingSyntax"),
            PATTERN_BINDING => Shape::Layout(&[
                base!("pattern", [Pattern]),
                node!("typeAnnotation", [TYPE_ANNOTATION]),
                node!("initializer", [INITIALIZER_CLAUSE]),
                TRAILING_COMMA,
            ]),
            INITIALIZER_CLAUSE => {
                Shape::Layout(&[token!("equal", [EQUAL]), base!("value", [Expr])])
            }
            TYPE_ANNOTATION => Shape::Layout(&[token!("colon", [COLON]), base!("type", [Type])]),
            FUNCTION_DECL => Shape::Layout(&[
                token!("funcKeyword", [FUNC_KW]),
                token!("name", [IDENTIFIER]),
                node!("signature", [FUNCTION_SIGNATURE]),
                node!("body", [CODE_BLOCK]),
            ]),
            FUNCTION_SIGNATURE => Shape::Layout(&[
                node!("parameterClause", [FUNCTION_PARAMETER_CLAUSE]),
                node!("returnClause", [RETURN_CLAUSE]),
            ]),
            FUNCTION_PARAMETER_CLAUSE => Shape::Layout(&[
                token!("leftParen", [LEFT_PAREN]),
                node!("parameters", [FUNCTION_PARAMETER_LIST]),
                token!("rightParen", [RIGHT_PAREN]),
            ]),
            FUNCTION_PARAMETER_LIST => collection("FunctionParameterSyntax"),
            FUNCTION_PARAMETER => Shape::Layout(&[
                token!("firstName", [IDENTIFIER, WILDCARD]),
                token!("secondName", [IDENTIFIER, WILDCARD]),
                token!("colon", [COLON]),
                base!("type", [Type]),
                TRAILING_COMMA,
            ]),
            RETURN_CLAUSE => Shape::Layout(&[token!("arrow", [ARROW]), base!("type", [Type])]),
            STRUCT_DECL => Shape::Layout(&[
                token!("structKeyword", [STRUCT_KW]),
                token!("name", [IDENTIFIER]),
                node!("memberBlock", [MEMBER_BLOCK]),
            ]),
            MEMBER_BLOCK => Shape::Layout(&[
                token!("leftBrace", [LEFT_BRACE]),
                node!("members", [MEMBER_BLOCK_ITEM_LIST]),
                token!("rightBrace", [RIGHT_BRACE]),
            ]),
            MEMBER_BLOCK_ITEM_LIST => collection("MemberBlockItemSyntax"),
            MEMBER_BLOCK_ITEM => {
                Shape::Layout(&[base!("decl", [Decl]), token!("semicolon", [SEMICOLON])])
            }

            RETURN_STMT => {
                Shape::Layout(&[token!("returnKeyword", [RETURN_KW]), base!("expression", [Expr])])
            }
            WHILE_STMT => Shape::Layout(&[
                token!("whileKeyword", [WHILE_KW]),
                node!("conditions", [CONDITION_ELEMENT_LIST]),
                node!("body", [CODE_BLOCK]),
            ]),

            IF_EXPR => Shape::Layout(&[
                token!("ifKeyword", [IF_KW]),
                node!("conditions", [CONDITION_ELEMENT_LIST]),
                node!("body", [CODE_BLOCK]),
                token!("elseKeyword", [ELSE_KW]),
                node!("elseBody", [IF_EXPR, CODE_BLOCK]),
            ]),
            CONDITION_ELEMENT_LIST => collection("ConditionElementSyntax"),
            CONDITION_ELEMENT => {
                Shape::Layout(&[node!("condition", [CONDITION]), TRAILING_COMMA])
            }
            CONDITION => Shape::Choices(&[
                SlotKind::Base(&[Expr]),
                SlotKind::Node(&[OPTIONAL_BINDING_CONDITION]),
            ]),
            OPTIONAL_BINDING_CONDITION => Shape::Layout(&[
                token!("bindingSpecifier", [LET_KW, VAR_KW]),
                base!("pattern", [Pattern]),
                node!("typeAnnotation", [TYPE_ANNOTATION]),
                node!("initializer", [INITIALIZER_CLAUSE]),
            ]),
            SEQUENCE_EXPR => Shape::Layout(&[node!("elements", [EXPR_LIST])]),
            EXPR_LIST => collection("ExprSyntax"),
            BINARY_OPERATOR_EXPR => Shape::Layout(&[token!("operator", [BINARY_OPERATOR])]),
            ASSIGNMENT_EXPR => Shape::Layout(&[token!("equal", [EQUAL])]),
            INFIX_OPERATOR_EXPR => Shape::Layout(&[
                base!("leftOperand", [Expr]),
                node!("operator", [BINARY_OPERATOR_EXPR, ASSIGNMENT_EXPR]),
                base!("rightOperand", [Expr]),
            ]),
            PREFIX_OPERATOR_EXPR => {
                Shape::Layout(&[token!("operator", [PREFIX_OPERATOR]), EXPRESSION])
            }
            POSTFIX_OPERATOR_EXPR => {
                Shape::Layout(&[EXPRESSION, token!("operator", [POSTFIX_OPERATOR])])
            }
            DECL_REFERENCE_EXPR => Shape::Layout(&[token!("baseName", [IDENTIFIER, SELF_KW])]),
            INTEGER_LITERAL_EXPR => Shape::Layout(&[token!("literal", [INTEGER_LITERAL])]),
            FLOAT_LITERAL_EXPR => Shape::Layout(&[token!("literal", [FLOAT_LITERAL])]),
            BOOLEAN_LITERAL_EXPR => Shape::Layout(&[token!("literal", [TRUE_KW, FALSE_KW])]),
            NIL_LITERAL_EXPR => Shape::Layout(&[token!("nilKeyword", [NIL_KW])]),
            STRING_LITERAL_EXPR => Shape::Layout(&[
                token!("openingQuote", [STRING_QUOTE]),
                node!("segments", [STRING_LITERAL_SEGMENT_LIST]),
                token!("closingQuote", [STRING_QUOTE]),
            ]),
            STRING_LITERAL_SEGMENT_LIST => collection("StringSegmentSyntax"),
            STRING_SEGMENT => Shape::Layout(&[token!("content", [STRING_TEXT])]),
            TUPLE_EXPR => Shape::Layout(&[
                token!("leftParen", [LEFT_PAREN]),
                node!("elements", [LABELED_EXPR_LIST]),
                token!("rightParen", [RIGHT_PAREN]),
            ]),
            LABELED_EXPR_LIST => collection("LabeledExprSyntax"),
            LABELED_EXPR => Shape::Layout(&[
                token!("label", [IDENTIFIER]),
                token!("colon", [COLON]),
                EXPRESSION,
                TRAILING_COMMA,
            ]),
            FUNCTION_CALL_EXPR => Shape::Layout(&[
                base!("calledExpression", [Expr]),
                token!("leftParen", [LEFT_PAREN]),
                node!("arguments", [LABELED_EXPR_LIST]),
                token!("rightParen", [RIGHT_PAREN]),
            ]),
            MEMBER_ACCESS_EXPR => Shape::Layout(&[
                base!("base", [Expr]),
                token!("period", [PERIOD]),
                node!("declName", [DECL_REFERENCE_EXPR]),
            ]),
            ARRAY_EXPR => Shape::Layout(&[
                token!("leftSquare", [LEFT_SQUARE]),
                node!("elements", [ARRAY_ELEMENT_LIST]),
                token!("rightSquare", [RIGHT_SQUARE]),
            ]),
            ARRAY_ELEMENT_LIST => collection("ArrayElementSyntax"),
            ARRAY_ELEMENT => Shape::Layout(&[EXPRESSION, TRAILING_COMMA]),
            MISSING_EXPR | MISSING_PATTERN | MISSING_TYPE => {
                Shape::Layout(&[token!("placeholder", [IDENTIFIER])])
            }

            IDENTIFIER_PATTERN => Shape::Layout(&[token!("identifier", [IDENTIFIER])]),
            WILDCARD_PATTERN => Shape::Layout(&[token!("wildcard", [WILDCARD])]),

            IDENTIFIER_TYPE => Shape::Layout(&[token!("name", [IDENTIFIER])]),
            OPTIONAL_TYPE => Shape::Layout(&[
                base!("wrappedType", [Type]),
                token!("questionMark", [POSTFIX_QUESTION_MARK]),
            ]),
            ARRAY_TYPE => Shape::Layout(&[
                token!("leftSquare", [LEFT_SQUARE]),
                base!("element", [Type]),
                token!("rightSquare", [RIGHT_SQUARE]),
            ]),

            UNEXPECTED_NODES => collection("Syntax"),
            _ => Shape::Layout(&[]),
        }
    }

    /// Returns `true` for homogeneous list kinds.
    #[inline]
    pub const fn is_collection(self) -> bool {
        matches!(self.shape(), Shape::Collection { .. })
    }
}

/// Assigns each child kind to a slot of `slots`.
///
/// Slots are matched in declaration order: every child takes the first
/// remaining slot that accepts it. Children that fit no remaining slot are
/// left unslotted (`None`).
pub(crate) fn assign_slots(
    slots: &[Slot],
    children: impl IntoIterator<Item = SyntaxKind>,
    mut assign: impl FnMut(usize, Option<u16>),
) {
    let mut cursor = 0;
    for (index, kind) in children.into_iter().enumerate() {
        let found = slots[cursor..].iter().position(|slot| slot.kind.accepts(kind));
        match found {
            Some(offset) => {
                let slot = cursor + offset;
                cursor = slot + 1;
                assign(index, u16::try_from(slot).ok());
            }
            None => assign(index, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots_of(kind: SyntaxKind, children: &[SyntaxKind]) -> Vec<Option<u16>> {
        let Shape::Layout(slots) = kind.shape() else { panic!("{kind:?} is not a layout node") };
        let mut assigned = vec![None; children.len()];
        assign_slots(slots, children.iter().copied(), |index, slot| assigned[index] = slot);
        assigned
    }

    #[test]
    fn optional_slots_are_skipped() {
        let assigned =
            slots_of(PATTERN_BINDING, &[IDENTIFIER_PATTERN, INITIALIZER_CLAUSE, COMMA]);
        assert_eq!(assigned, [Some(0), Some(2), Some(3)]);
    }

    #[test]
    fn repeated_kinds_fill_successive_slots() {
        let assigned = slots_of(IF_EXPR, &[IF_KW, CONDITION_ELEMENT_LIST, CODE_BLOCK, ELSE_KW, CODE_BLOCK]);
        assert_eq!(assigned, [Some(0), Some(1), Some(2), Some(3), Some(4)]);

        let assigned = slots_of(FUNCTION_PARAMETER, &[WILDCARD, IDENTIFIER, COLON, IDENTIFIER_TYPE]);
        assert_eq!(assigned, [Some(0), Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn recovery_nodes_stay_unslotted() {
        let assigned = slots_of(CODE_BLOCK, &[LEFT_BRACE, CODE_BLOCK_ITEM_LIST, UNEXPECTED_NODES, RIGHT_BRACE]);
        assert_eq!(assigned, [Some(0), Some(1), None, Some(2)]);
    }

    #[test]
    fn infix_operator_takes_middle_slot() {
        let assigned =
            slots_of(INFIX_OPERATOR_EXPR, &[DECL_REFERENCE_EXPR, BINARY_OPERATOR_EXPR, INTEGER_LITERAL_EXPR]);
        assert_eq!(assigned, [Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn shapes() {
        assert!(CODE_BLOCK_ITEM_LIST.is_collection());
        assert!(UNEXPECTED_NODES.is_collection());
        assert!(!CODE_BLOCK.is_collection());
        assert!(matches!(CONDITION.shape(), Shape::Choices(_)));
    }
}
