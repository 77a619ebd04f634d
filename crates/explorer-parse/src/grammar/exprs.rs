use explorer_syntax::SyntaxKind::{self, *};

use super::{EXPR_FIRST, code_block, missing_node, patterns, recover_until, types};
use crate::parser::{CompletedMarker, Parser};

/// Parses an expression. Operator sequences are kept flat in a
/// `SEQUENCE_EXPR`; precedence is applied by the folding pass.
pub(crate) fn expr(p: &mut Parser<'_>) -> CompletedMarker {
    let first = unary_expr(p);
    if !at_infix_operator(p) {
        return first;
    }

    let elements = first.precede(p);
    while at_infix_operator(p) {
        let operator = p.start();
        let kind = if p.at(EQUAL) { ASSIGNMENT_EXPR } else { BINARY_OPERATOR_EXPR };
        p.advance();
        operator.complete(p, kind);
        unary_expr(p);
    }
    let elements = elements.complete(p, EXPR_LIST);
    elements.precede(p).complete(p, SEQUENCE_EXPR)
}

fn at_infix_operator(p: &Parser<'_>) -> bool {
    matches!(p.peek_kind(), BINARY_OPERATOR | EQUAL)
}

pub(crate) fn initializer_clause(p: &mut Parser<'_>) {
    debug_assert_eq!(p.peek_kind(), EQUAL);

    let m = p.start();
    p.advance();
    expr(p);
    m.complete(p, INITIALIZER_CLAUSE);
}

fn unary_expr(p: &mut Parser<'_>) -> CompletedMarker {
    match p.peek_kind() {
        PREFIX_OPERATOR => {
            let m = p.start();
            p.advance();
            unary_expr(p);
            m.complete(p, PREFIX_OPERATOR_EXPR)
        }
        _ => postfix_expr(p),
    }
}

fn postfix_expr(p: &mut Parser<'_>) -> CompletedMarker {
    let mut lhs = primary_expr(p);

    loop {
        lhs = match p.peek_kind() {
            // `(` on a new line starts a tuple, not a call.
            LEFT_PAREN if !p.at_line_start() => {
                let m = lhs.precede(p);
                p.advance();
                labeled_expr_list(p, RIGHT_PAREN);
                recover_until(p, RIGHT_PAREN);
                p.expect(RIGHT_PAREN);
                m.complete(p, FUNCTION_CALL_EXPR)
            }
            PERIOD => {
                let m = lhs.precede(p);
                p.advance();
                let name = p.start();
                p.expect(IDENTIFIER);
                name.complete(p, DECL_REFERENCE_EXPR);
                m.complete(p, MEMBER_ACCESS_EXPR)
            }
            POSTFIX_OPERATOR => {
                let m = lhs.precede(p);
                p.advance();
                m.complete(p, POSTFIX_OPERATOR_EXPR)
            }
            _ => break,
        };
    }

    lhs
}

fn primary_expr(p: &mut Parser<'_>) -> CompletedMarker {
    let kind = match p.peek_kind() {
        IDENTIFIER | SELF_KW => DECL_REFERENCE_EXPR,
        INTEGER_LITERAL => INTEGER_LITERAL_EXPR,
        FLOAT_LITERAL => FLOAT_LITERAL_EXPR,
        TRUE_KW | FALSE_KW => BOOLEAN_LITERAL_EXPR,
        NIL_KW => NIL_LITERAL_EXPR,
        STRING_QUOTE => return string_literal(p),
        LEFT_PAREN => return tuple_expr(p),
        LEFT_SQUARE => return array_expr(p),
        IF_KW => return if_expr(p),
        _ => return missing_node(p, MISSING_EXPR, "expected expression"),
    };

    let m = p.start();
    p.advance();
    m.complete(p, kind)
}

fn string_literal(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.advance();

    let segments = p.start();
    if p.at(STRING_TEXT) {
        let segment = p.start();
        p.advance();
        segment.complete(p, STRING_SEGMENT);
    }
    segments.complete(p, STRING_LITERAL_SEGMENT_LIST);

    // The closing quote immediately follows the content; a quote after a
    // line break opens the next literal.
    if p.at(STRING_QUOTE) && p.at_glued() {
        p.advance();
    } else {
        p.error("unterminated string literal");
        p.missing(STRING_QUOTE);
    }

    m.complete(p, STRING_LITERAL_EXPR)
}

fn tuple_expr(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.advance();
    labeled_expr_list(p, RIGHT_PAREN);
    recover_until(p, RIGHT_PAREN);
    p.expect(RIGHT_PAREN);
    m.complete(p, TUPLE_EXPR)
}

fn labeled_expr_list(p: &mut Parser<'_>, closing: SyntaxKind) {
    let list = p.start();

    while !p.at(closing) && p.at_set(&EXPR_FIRST) {
        let m = p.start();
        if p.at(IDENTIFIER) && p.nth(1) == COLON {
            p.advance();
            p.advance();
        }
        expr(p);
        let comma = p.eat(COMMA);
        m.complete(p, LABELED_EXPR);
        if !comma {
            break;
        }
    }

    list.complete(p, LABELED_EXPR_LIST);
}

fn array_expr(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.advance();

    let elements = p.start();
    while p.at_set(&EXPR_FIRST) {
        let element = p.start();
        expr(p);
        let comma = p.eat(COMMA);
        element.complete(p, ARRAY_ELEMENT);
        if !comma {
            break;
        }
    }
    elements.complete(p, ARRAY_ELEMENT_LIST);

    recover_until(p, RIGHT_SQUARE);
    p.expect(RIGHT_SQUARE);
    m.complete(p, ARRAY_EXPR)
}

fn if_expr(p: &mut Parser<'_>) -> CompletedMarker {
    debug_assert_eq!(p.peek_kind(), IF_KW);

    let m = p.start();
    p.advance();
    condition_list(p);
    code_block(p);
    if p.eat(ELSE_KW) {
        if p.at(IF_KW) {
            if_expr(p);
        } else {
            code_block(p);
        }
    }
    m.complete(p, IF_EXPR)
}

pub(crate) fn condition_list(p: &mut Parser<'_>) {
    let list = p.start();

    loop {
        let element = p.start();
        let condition = p.start();
        if matches!(p.peek_kind(), LET_KW | VAR_KW) {
            optional_binding_condition(p);
        } else {
            expr(p);
        }
        condition.complete(p, CONDITION);
        let comma = p.eat(COMMA);
        element.complete(p, CONDITION_ELEMENT);
        if !comma {
            break;
        }
    }

    list.complete(p, CONDITION_ELEMENT_LIST);
}

fn optional_binding_condition(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    patterns::pattern(p);
    if p.at(COLON) {
        types::type_annotation(p);
    }
    if p.at(EQUAL) {
        initializer_clause(p);
    }
    m.complete(p, OPTIONAL_BINDING_CONDITION);
}
