use explorer_syntax::SyntaxKind::*;

use super::missing_node;
use crate::parser::Parser;

pub(crate) fn pattern(p: &mut Parser<'_>) {
    match p.peek_kind() {
        IDENTIFIER => {
            let m = p.start();
            p.advance();
            m.complete(p, IDENTIFIER_PATTERN);
        }
        WILDCARD => {
            let m = p.start();
            p.advance();
            m.complete(p, WILDCARD_PATTERN);
        }
        _ => _ = missing_node(p, MISSING_PATTERN, "expected pattern"),
    }
}
