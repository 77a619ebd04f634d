use explorer_syntax::SyntaxKind::*;

use super::{EXPR_FIRST, code_block, exprs};
use crate::parser::Parser;

pub(crate) fn return_stmt(p: &mut Parser<'_>) {
    debug_assert_eq!(p.peek_kind(), RETURN_KW);

    let m = p.start();
    p.advance();
    // A value on the next line starts a new statement.
    if p.at_set(&EXPR_FIRST) && !p.at_line_start() {
        exprs::expr(p);
    }
    m.complete(p, RETURN_STMT);
}

pub(crate) fn while_stmt(p: &mut Parser<'_>) {
    debug_assert_eq!(p.peek_kind(), WHILE_KW);

    let m = p.start();
    p.advance();
    exprs::condition_list(p);
    code_block(p);
    m.complete(p, WHILE_STMT);
}
