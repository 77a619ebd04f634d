use explorer_syntax::SyntaxKind::{self, *};
use explorer_syntax::SyntaxSet;

use super::{DECL_FIRST, ITEM_FIRST, code_block, exprs, patterns, stmts, types, unexpected};
use crate::parser::Parser;

pub(crate) fn source_file(p: &mut Parser<'_>) {
    let m = p.start();
    code_block_item_list(p, EOF);
    p.advance_eof();
    m.complete(p, SOURCE_FILE);
}

pub(crate) fn code_block_item_list(p: &mut Parser<'_>, closing: SyntaxKind) {
    let m = p.start();
    let stop = ITEM_FIRST.union(&SyntaxSet::new([closing]));

    while !p.at(EOF) && !p.at(closing) {
        let item = p.start();
        if p.at_set(&ITEM_FIRST) {
            code_block_item(p);
            p.eat(SEMICOLON);
        } else {
            unexpected(p, &stop);
        }
        item.complete(p, CODE_BLOCK_ITEM);
    }

    m.complete(p, CODE_BLOCK_ITEM_LIST);
}

fn code_block_item(p: &mut Parser<'_>) {
    match p.peek_kind() {
        RETURN_KW => stmts::return_stmt(p),
        WHILE_KW => stmts::while_stmt(p),
        kind if DECL_FIRST.contains(kind) => decl(p),
        _ => _ = exprs::expr(p),
    }
}

fn decl(p: &mut Parser<'_>) {
    match p.peek_kind() {
        LET_KW | VAR_KW => variable_decl(p),
        FUNC_KW => function_decl(p),
        STRUCT_KW => struct_decl(p),
        IMPORT_KW => import_decl(p),
        kind => unreachable!("{kind:?} does not start a declaration"),
    }
}

fn import_decl(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();

    let path = p.start();
    loop {
        let component = p.start();
        p.expect(IDENTIFIER);
        let more = p.eat(PERIOD);
        component.complete(p, IMPORT_PATH_COMPONENT);
        if !more {
            break;
        }
    }
    path.complete(p, IMPORT_PATH_COMPONENT_LIST);

    m.complete(p, IMPORT_DECL);
}

fn variable_decl(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();

    let bindings = p.start();
    while pattern_binding(p) {}
    bindings.complete(p, PATTERN_BINDING_LIST);

    m.complete(p, VARIABLE_DECL);
}

/// Parses one binding and reports whether a comma followed it.
fn pattern_binding(p: &mut Parser<'_>) -> bool {
    let m = p.start();
    patterns::pattern(p);
    if p.at(COLON) {
        types::type_annotation(p);
    }
    if p.at(EQUAL) {
        exprs::initializer_clause(p);
    }
    let comma = p.eat(COMMA);
    m.complete(p, PATTERN_BINDING);
    comma
}

fn function_decl(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    p.expect(IDENTIFIER);

    let signature = p.start();
    parameter_clause(p);
    if p.at(ARROW) {
        let clause = p.start();
        p.advance();
        types::type_(p);
        clause.complete(p, RETURN_CLAUSE);
    }
    signature.complete(p, FUNCTION_SIGNATURE);

    code_block(p);
    m.complete(p, FUNCTION_DECL);
}

fn parameter_clause(p: &mut Parser<'_>) {
    let m = p.start();
    p.expect(LEFT_PAREN);

    let parameters = p.start();
    while matches!(p.peek_kind(), IDENTIFIER | WILDCARD) {
        if !parameter(p) {
            break;
        }
    }
    parameters.complete(p, FUNCTION_PARAMETER_LIST);

    if !matches!(p.peek_kind(), RIGHT_PAREN | LEFT_BRACE | ARROW | EOF) && !p.at_line_start() {
        unexpected(p, &SyntaxSet::new([RIGHT_PAREN, LEFT_BRACE, ARROW]));
    }
    p.expect(RIGHT_PAREN);
    m.complete(p, FUNCTION_PARAMETER_CLAUSE);
}

fn parameter(p: &mut Parser<'_>) -> bool {
    let m = p.start();
    p.advance();
    if matches!(p.peek_kind(), IDENTIFIER | WILDCARD) {
        p.advance();
    }
    p.expect(COLON);
    types::type_(p);
    let comma = p.eat(COMMA);
    m.complete(p, FUNCTION_PARAMETER);
    comma
}

fn struct_decl(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    p.expect(IDENTIFIER);
    member_block(p);
    m.complete(p, STRUCT_DECL);
}

fn member_block(p: &mut Parser<'_>) {
    let m = p.start();
    if p.expect(LEFT_BRACE) {
        member_block_item_list(p);
        p.expect(RIGHT_BRACE);
    } else {
        let members = p.start();
        members.complete(p, MEMBER_BLOCK_ITEM_LIST);
        p.missing(RIGHT_BRACE);
    }
    m.complete(p, MEMBER_BLOCK);
}

fn member_block_item_list(p: &mut Parser<'_>) {
    let m = p.start();
    let stop = DECL_FIRST.union(&SyntaxSet::new([RIGHT_BRACE]));

    while !p.at(EOF) && !p.at(RIGHT_BRACE) {
        let item = p.start();
        if p.at_set(&DECL_FIRST) {
            decl(p);
            p.eat(SEMICOLON);
        } else {
            unexpected(p, &stop);
        }
        item.complete(p, MEMBER_BLOCK_ITEM);
    }

    m.complete(p, MEMBER_BLOCK_ITEM_LIST);
}
