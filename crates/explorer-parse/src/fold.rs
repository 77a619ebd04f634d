//! Folds flat operator sequences into nested infix expressions.

use explorer_syntax::SyntaxKind::*;
use explorer_syntax::{Builder, NodeOrToken, SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTree};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Associativity {
    Left,
    Right,
    NonAssociative,
}

/// Precedence groups, weakest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Assignment,
    Default,
    LogicalDisjunction,
    LogicalConjunction,
    Comparison,
    NilCoalescing,
    RangeFormation,
    Addition,
    Multiplication,
    BitwiseShift,
}

impl Precedence {
    fn of(operator: &str) -> Self {
        match operator {
            "=" | "*=" | "/=" | "%=" | "+=" | "-=" | "<<=" | ">>=" | "&=" | "|=" | "^=" => {
                Self::Assignment
            }
            "||" => Self::LogicalDisjunction,
            "&&" => Self::LogicalConjunction,
            "<" | "<=" | ">" | ">=" | "==" | "!=" | "===" | "!==" | "~=" => Self::Comparison,
            "??" => Self::NilCoalescing,
            "..." | "..<" => Self::RangeFormation,
            "+" | "-" | "&+" | "&-" | "|" | "^" => Self::Addition,
            "*" | "/" | "%" | "&" | "&*" => Self::Multiplication,
            "<<" | ">>" => Self::BitwiseShift,
            _ => Self::Default,
        }
    }

    fn associativity(self) -> Associativity {
        match self {
            Self::Assignment | Self::NilCoalescing => Associativity::Right,
            Self::Comparison | Self::RangeFormation | Self::BitwiseShift => Associativity::NonAssociative,
            _ => Associativity::Left,
        }
    }
}

/// Returns a copy of `tree` where every `SEQUENCE_EXPR` whose elements
/// alternate between operands and operators is replaced by nested
/// `INFIX_OPERATOR_EXPR` nodes. Other sequences are copied unchanged.
pub fn fold(tree: &SyntaxTree) -> SyntaxTree {
    let mut builder = Builder::new(tree.text());
    copy_node(&mut builder, tree.root());
    builder.finish()
}

fn copy_element(builder: &mut Builder, element: SyntaxElement<'_>) {
    match element {
        NodeOrToken::Node(node) => copy_node(builder, node),
        NodeOrToken::Token(token) => copy_token(builder, token),
    }
}

fn copy_node(builder: &mut Builder, node: SyntaxNode<'_>) {
    if node.kind() == SEQUENCE_EXPR {
        if let Some(sequence) = Sequence::new(node) {
            let folded = sequence.fold();
            log::trace!("folded sequence at {:?}", node.trimmed_range());
            emit(builder, &folded);
            return;
        }
    }

    builder.start_node(node.kind());
    for child in node.children_with_tokens() {
        copy_element(builder, child);
    }
    builder.finish_node();
}

fn copy_token(builder: &mut Builder, token: SyntaxToken<'_>) {
    if token.is_missing() {
        builder.missing_token(token.kind());
        return;
    }

    builder.token(
        token.leading_pieces().iter().copied(),
        token.kind(),
        token.trimmed_range().len(),
        token.trailing_pieces().iter().copied(),
    );
}

enum Folded<'a> {
    Operand(SyntaxNode<'a>),
    Infix { lhs: Box<Folded<'a>>, operator: SyntaxNode<'a>, rhs: Box<Folded<'a>> },
}

fn emit(builder: &mut Builder, folded: &Folded<'_>) {
    match folded {
        Folded::Operand(node) => copy_node(builder, *node),
        Folded::Infix { lhs, operator, rhs } => {
            builder.start_node(INFIX_OPERATOR_EXPR);
            emit(builder, lhs);
            copy_node(builder, *operator);
            emit(builder, rhs);
            builder.finish_node();
        }
    }
}

struct Sequence<'a> {
    operands: Vec<SyntaxNode<'a>>,
    operators: Vec<(SyntaxNode<'a>, Precedence)>,
}

impl<'a> Sequence<'a> {
    /// Splits a sequence into operands and operators, or returns `None` when
    /// the elements do not alternate.
    fn new(node: SyntaxNode<'a>) -> Option<Self> {
        let mut children = node.children_with_tokens();
        let list = children.next()?.into_node().filter(|it| it.kind() == EXPR_LIST)?;
        if children.next().is_some() {
            return None;
        }

        let mut operands = Vec::new();
        let mut operators = Vec::new();
        for (index, element) in list.children_with_tokens().enumerate() {
            let element = element.into_node()?;
            let is_operator = matches!(element.kind(), BINARY_OPERATOR_EXPR | ASSIGNMENT_EXPR);
            if is_operator != (index % 2 == 1) {
                return None;
            }
            if is_operator {
                let text = element.first_token()?.text();
                operators.push((element, Precedence::of(text)));
            } else {
                operands.push(element);
            }
        }

        if operators.is_empty() || operands.len() != operators.len() + 1 {
            return None;
        }
        Some(Self { operands, operators })
    }

    fn fold(self) -> Folded<'a> {
        let mut operands = self.operands.into_iter().map(Folded::Operand);
        let mut operators = self.operators.into_iter().peekable();
        let Some(first) = operands.next() else { unreachable!("sequences have operands") };
        climb(first, &mut operands, &mut operators, Precedence::Assignment)
    }
}

/// Precedence climbing over the remaining `operators`, each followed by its
/// right operand in `operands`.
fn climb<'a>(
    mut lhs: Folded<'a>,
    operands: &mut impl Iterator<Item = Folded<'a>>,
    operators: &mut std::iter::Peekable<impl Iterator<Item = (SyntaxNode<'a>, Precedence)>>,
    min: Precedence,
) -> Folded<'a> {
    while let Some(&(operator, precedence)) = operators.peek() {
        if precedence < min {
            break;
        }
        operators.next();

        let Some(mut rhs) = operands.next() else { unreachable!("operators are followed by operands") };
        while let Some(&(_, next)) = operators.peek() {
            let binds_tighter = next > precedence
                || (next == precedence && next.associativity() == Associativity::Right);
            if !binds_tighter {
                break;
            }
            rhs = climb(rhs, operands, operators, next);
        }

        lhs = Folded::Infix { lhs: Box::new(lhs), operator, rhs: Box::new(rhs) };
    }
    lhs
}

#[cfg(test)]
mod tests {
    use expect_test::expect;
    use explorer_syntax::SyntaxKind::*;
    use text_size::{TextRange, TextSize};

    use crate::{ParseOptions, parse, parse_with};

    fn folded(text: &str) -> String {
        let parse = parse_with(text, ParseOptions { fold: true });
        assert_eq!(parse.tree.text(), text);
        format!("{:?}", parse.tree)
    }

    #[test]
    fn multiplication_binds_tighter() {
        expect![[r#"
            SOURCE_FILE@0..9
              CODE_BLOCK_ITEM_LIST@0..9
                CODE_BLOCK_ITEM@0..9
                  INFIX_OPERATOR_EXPR@0..9
                    DECL_REFERENCE_EXPR@0..2
                      IDENTIFIER@0..1 "a" trailing=[Spaces(1)]
                    BINARY_OPERATOR_EXPR@2..4
                      BINARY_OPERATOR@2..3 "+" trailing=[Spaces(1)]
                    INFIX_OPERATOR_EXPR@4..9
                      DECL_REFERENCE_EXPR@4..6
                        IDENTIFIER@4..5 "b" trailing=[Spaces(1)]
                      BINARY_OPERATOR_EXPR@6..8
                        BINARY_OPERATOR@6..7 "*" trailing=[Spaces(1)]
                      DECL_REFERENCE_EXPR@8..9
                        IDENTIFIER@8..9 "c"
              EOF@9..9 ""
        "#]]
        .assert_eq(&folded("a + b * c"));
    }

    #[test]
    fn assignment_is_right_associative() {
        expect![[r#"
            SOURCE_FILE@0..5
              CODE_BLOCK_ITEM_LIST@0..5
                CODE_BLOCK_ITEM@0..5
                  INFIX_OPERATOR_EXPR@0..5
                    DECL_REFERENCE_EXPR@0..1
                      IDENTIFIER@0..1 "a"
                    ASSIGNMENT_EXPR@1..2
                      EQUAL@1..2 "="
                    INFIX_OPERATOR_EXPR@2..5
                      DECL_REFERENCE_EXPR@2..3
                        IDENTIFIER@2..3 "b"
                      ASSIGNMENT_EXPR@3..4
                        EQUAL@3..4 "="
                      DECL_REFERENCE_EXPR@4..5
                        IDENTIFIER@4..5 "c"
              EOF@5..5 ""
        "#]]
        .assert_eq(&folded("a=b=c"));
    }

    #[test]
    fn left_associative_operators_nest_to_the_left() {
        let text = "a - b - c";
        let parse = parse_with(text, ParseOptions { fold: true });
        let root = parse.tree.root();
        let outer = root
            .children()
            .flat_map(|it| it.children())
            .flat_map(|it| it.children())
            .next()
            .unwrap();
        assert_eq!(outer.kind(), INFIX_OPERATOR_EXPR);
        assert_eq!(
            outer.slot(0).unwrap().trimmed_range(),
            TextRange::new(TextSize::new(0), TextSize::new(5))
        );
        assert_eq!(outer.slot(0).unwrap().kind(), INFIX_OPERATOR_EXPR);
        assert_eq!(outer.slot(2).unwrap().kind(), DECL_REFERENCE_EXPR);
    }

    #[test]
    fn unfolded_sequences_are_kept_flat() {
        let tree = parse("a + b").tree;
        assert_eq!(tree, parse_with("a + b", ParseOptions::default()).tree);
        assert!(format!("{tree:?}").contains("SEQUENCE_EXPR"));
        assert!(!folded("a + b").contains("SEQUENCE_EXPR"));
    }

    #[test]
    fn option_words() {
        assert!(ParseOptions::from_words(["showmissing", "fold"]).fold);
        assert!(!ParseOptions::from_words(["showmissing"]).fold);
    }
}
