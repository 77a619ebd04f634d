use explorer_syntax::SyntaxKind::*;

use super::missing_node;
use crate::parser::Parser;

pub(crate) fn type_(p: &mut Parser<'_>) {
    let mut ty = match p.peek_kind() {
        IDENTIFIER => {
            let m = p.start();
            p.advance();
            m.complete(p, IDENTIFIER_TYPE)
        }
        LEFT_SQUARE => {
            let m = p.start();
            p.advance();
            type_(p);
            p.expect(RIGHT_SQUARE);
            m.complete(p, ARRAY_TYPE)
        }
        _ => missing_node(p, MISSING_TYPE, "expected type"),
    };

    while p.at(POSTFIX_QUESTION_MARK) {
        let m = ty.precede(p);
        p.advance();
        ty = m.complete(p, OPTIONAL_TYPE);
    }
}

pub(crate) fn type_annotation(p: &mut Parser<'_>) {
    debug_assert_eq!(p.peek_kind(), COLON);

    let m = p.start();
    p.advance();
    type_(p);
    m.complete(p, TYPE_ANNOTATION);
}
