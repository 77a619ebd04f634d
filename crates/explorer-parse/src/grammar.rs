use explorer_syntax::SyntaxKind::{self, *};
use explorer_syntax::SyntaxSet;

use crate::parser::{CompletedMarker, Parser};

mod exprs;
pub(crate) mod items;
mod patterns;
mod stmts;
mod types;

pub(crate) const EXPR_FIRST: SyntaxSet = SyntaxSet::new([
    IDENTIFIER,
    SELF_KW,
    INTEGER_LITERAL,
    FLOAT_LITERAL,
    TRUE_KW,
    FALSE_KW,
    NIL_KW,
    STRING_QUOTE,
    LEFT_PAREN,
    LEFT_SQUARE,
    PREFIX_OPERATOR,
    IF_KW,
]);

pub(crate) const DECL_FIRST: SyntaxSet =
    SyntaxSet::new([LET_KW, VAR_KW, FUNC_KW, STRUCT_KW, IMPORT_KW]);

pub(crate) const ITEM_FIRST: SyntaxSet =
    EXPR_FIRST.union(&DECL_FIRST).union(&SyntaxSet::new([RETURN_KW, WHILE_KW]));

/// Wraps tokens that fit nowhere in an `UNEXPECTED_NODES` node.
///
/// Consumes at least one token, then stops at the end of the line, the end of
/// the file or any token in `stop`.
pub(crate) fn unexpected(p: &mut Parser<'_>, stop: &SyntaxSet) {
    debug_assert!(!p.at(EOF));

    let m = p.start();
    p.error("unexpected code");
    p.advance();
    while !p.at(EOF) && !p.at_line_start() && !p.at_set(stop) {
        p.advance();
    }
    m.complete(p, UNEXPECTED_NODES);
}

/// Skips stray tokens on the current line before a closing delimiter.
pub(crate) fn recover_until(p: &mut Parser<'_>, closing: SyntaxKind) {
    if !p.at(closing) && !p.at(EOF) && !p.at_line_start() {
        unexpected(p, &SyntaxSet::new([closing]));
    }
}

/// Inserts a placeholder node holding a single missing identifier.
pub(crate) fn missing_node(
    p: &mut Parser<'_>,
    kind: SyntaxKind,
    message: &str,
) -> CompletedMarker {
    p.error(message);
    let m = p.start();
    p.missing(IDENTIFIER);
    m.complete(p, kind)
}

pub(crate) fn code_block(p: &mut Parser<'_>) {
    let m = p.start();
    if p.expect(LEFT_BRACE) {
        items::code_block_item_list(p, RIGHT_BRACE);
        p.expect(RIGHT_BRACE);
    } else {
        let list = p.start();
        list.complete(p, CODE_BLOCK_ITEM_LIST);
        p.missing(RIGHT_BRACE);
    }
    m.complete(p, CODE_BLOCK);
}
