//! Token and node kinds.
//!
//! Token kinds come first so that [`SyntaxKind::is_token`] is a single
//! comparison against [`SyntaxKind::EOF`].

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_SQUARE,
    RIGHT_SQUARE,
    LEFT_BRACE,
    RIGHT_BRACE,
    COMMA,
    COLON,
    SEMICOLON,
    PERIOD,
    EQUAL,
    ARROW,
    POSTFIX_QUESTION_MARK,
    STRING_QUOTE,
    WILDCARD,

    LET_KW,
    VAR_KW,
    FUNC_KW,
    STRUCT_KW,
    IMPORT_KW,
    RETURN_KW,
    IF_KW,
    ELSE_KW,
    WHILE_KW,
    TRUE_KW,
    FALSE_KW,
    NIL_KW,
    SELF_KW,

    IDENTIFIER,
    INTEGER_LITERAL,
    FLOAT_LITERAL,
    STRING_TEXT,
    BINARY_OPERATOR,
    PREFIX_OPERATOR,
    POSTFIX_OPERATOR,
    EOF,

    SOURCE_FILE,
    CODE_BLOCK_ITEM_LIST,
    CODE_BLOCK_ITEM,
    CODE_BLOCK,

    IMPORT_DECL,
    IMPORT_PATH_COMPONENT_LIST,
    IMPORT_PATH_COMPONENT,
    VARIABLE_DECL,
    PATTERN_BINDING_LIST,
    PATTERN_BINDING,
    INITIALIZER_CLAUSE,
    TYPE_ANNOTATION,
    FUNCTION_DECL,
    FUNCTION_SIGNATURE,
    FUNCTION_PARAMETER_CLAUSE,
    FUNCTION_PARAMETER_LIST,
    FUNCTION_PARAMETER,
    RETURN_CLAUSE,
    STRUCT_DECL,
    MEMBER_BLOCK,
    MEMBER_BLOCK_ITEM_LIST,
    MEMBER_BLOCK_ITEM,

    RETURN_STMT,
    WHILE_STMT,

    IF_EXPR,
    CONDITION_ELEMENT_LIST,
    CONDITION_ELEMENT,
    CONDITION,
    OPTIONAL_BINDING_CONDITION,
    SEQUENCE_EXPR,
    EXPR_LIST,
    BINARY_OPERATOR_EXPR,
    ASSIGNMENT_EXPR,
    INFIX_OPERATOR_EXPR,
    PREFIX_OPERATOR_EXPR,
    POSTFIX_OPERATOR_EXPR,
    DECL_REFERENCE_EXPR,
    INTEGER_LITERAL_EXPR,
    FLOAT_LITERAL_EXPR,
    BOOLEAN_LITERAL_EXPR,
    NIL_LITERAL_EXPR,
    STRING_LITERAL_EXPR,
    STRING_LITERAL_SEGMENT_LIST,
    STRING_SEGMENT,
    TUPLE_EXPR,
    LABELED_EXPR_LIST,
    LABELED_EXPR,
    FUNCTION_CALL_EXPR,
    MEMBER_ACCESS_EXPR,
    ARRAY_EXPR,
    ARRAY_ELEMENT_LIST,
    ARRAY_ELEMENT,
    MISSING_EXPR,

    IDENTIFIER_PATTERN,
    WILDCARD_PATTERN,
    MISSING_PATTERN,

    IDENTIFIER_TYPE,
    OPTIONAL_TYPE,
    ARRAY_TYPE,
    MISSING_TYPE,

    UNEXPECTED_NODES,

    /// Placeholder for abandoned parser markers; never stored in a tree.
    TOMBSTONE,
}

/// Coarse grouping of kinds, mirroring the base node types of the grammar.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SyntaxBase {
    Decl,
    Expr,
    Stmt,
    Pattern,
    Type,
    Token,
    Other,
}

use SyntaxKind::*;

impl SyntaxKind {
    /// Returns `true` for token kinds.
    #[inline]
    pub const fn is_token(self) -> bool {
        self as u16 <= EOF as u16
    }

    /// Returns `true` for keyword tokens.
    #[inline]
    pub const fn is_keyword(self) -> bool {
        self as u16 >= LET_KW as u16 && self as u16 <= SELF_KW as u16
    }

    pub const fn base(self) -> SyntaxBase {
        if self.is_token() {
            return SyntaxBase::Token;
        }

        match self {
            IMPORT_DECL | VARIABLE_DECL | FUNCTION_DECL | STRUCT_DECL => SyntaxBase::Decl,
            RETURN_STMT | WHILE_STMT => SyntaxBase::Stmt,
            IF_EXPR
            | SEQUENCE_EXPR
            | BINARY_OPERATOR_EXPR
            | ASSIGNMENT_EXPR
            | INFIX_OPERATOR_EXPR
            | PREFIX_OPERATOR_EXPR
            | POSTFIX_OPERATOR_EXPR
            | DECL_REFERENCE_EXPR
            | INTEGER_LITERAL_EXPR
            | FLOAT_LITERAL_EXPR
            | BOOLEAN_LITERAL_EXPR
            | NIL_LITERAL_EXPR
            | STRING_LITERAL_EXPR
            | TUPLE_EXPR
            | FUNCTION_CALL_EXPR
            | MEMBER_ACCESS_EXPR
            | ARRAY_EXPR
            | MISSING_EXPR => SyntaxBase::Expr,
            IDENTIFIER_PATTERN | WILDCARD_PATTERN | MISSING_PATTERN => SyntaxBase::Pattern,
            IDENTIFIER_TYPE | OPTIONAL_TYPE | ARRAY_TYPE | MISSING_TYPE => SyntaxBase::Type,
            _ => SyntaxBase::Other,
        }
    }

    /// Type name of the node kind, e.g. `VariableDeclSyntax`.
    ///
    /// Every token kind reports `TokenSyntax`; use [`SyntaxKind::token_name`]
    /// for the token kind itself.
    pub const fn name(self) -> &'static str {
        if self.is_token() {
            return "TokenSyntax";
        }

        match self {
            SOURCE_FILE => "SourceFileSyntax",
            CODE_BLOCK_ITEM_LIST => "CodeBlockItemListSyntax",
            CODE_BLOCK_ITEM => "CodeBlockItemSyntax",
            CODE_BLOCK => "CodeBlockSyntax",
            IMPORT_DECL => "ImportDeclSyntax",
            IMPORT_PATH_COMPONENT_LIST => "ImportPathComponentListSyntax",
            IMPORT_PATH_COMPONENT => "ImportPathComponentSyntax",
            VARIABLE_DECL => "VariableDeclSyntax",
            PATTERN_BINDING_LIST => "PatternBindingListSyntax",
            PATTERN_BINDING => "PatternBindingSyntax",
            INITIALIZER_CLAUSE => "InitializerClauseSyntax",
            TYPE_ANNOTATION => "TypeAnnotationSyntax",
            FUNCTION_DECL => "FunctionDeclSyntax",
            FUNCTION_SIGNATURE => "FunctionSignatureSyntax",
            FUNCTION_PARAMETER_CLAUSE => "FunctionParameterClauseSyntax",
            FUNCTION_PARAMETER_LIST => "FunctionParameterListSyntax",
            FUNCTION_PARAMETER => "FunctionParameterSyntax",
            RETURN_CLAUSE => "ReturnClauseSyntax",
            STRUCT_DECL => "StructDeclSyntax",
            MEMBER_BLOCK => "MemberBlockSyntax",
            MEMBER_BLOCK_ITEM_LIST => "MemberBlockItemListSyntax",
            MEMBER_BLOCK_ITEM => "MemberBlockItemSyntax",
            RETURN_STMT => "ReturnStmtSyntax",
            WHILE_STMT => "WhileStmtSyntax",
            IF_EXPR => "IfExprSyntax",
            CONDITION_ELEMENT_LIST => "ConditionElementListSyntax",
            CONDITION_ELEMENT => "ConditionElementSyntax",
            CONDITION => "ConditionSyntax",
            OPTIONAL_BINDING_CONDITION => "OptionalBindingConditionSyntax",
            SEQUENCE_EXPR => "SequenceExprSyntax",
            EXPR_LIST => "ExprListSyntax",
            BINARY_OPERATOR_EXPR => "BinaryOperatorExprSyntax",
            ASSIGNMENT_EXPR => "AssignmentExprSyntax",
            INFIX_OPERATOR_EXPR => "InfixOperatorExprSyntax",
            PREFIX_OPERATOR_EXPR => "PrefixOperatorExprSyntax",
            POSTFIX_OPERATOR_EXPR => "PostfixOperatorExprSyntax",
            DECL_REFERENCE_EXPR => "DeclReferenceExprSyntax",
            INTEGER_LITERAL_EXPR => "IntegerLiteralExprSyntax",
            FLOAT_LITERAL_EXPR => "FloatLiteralExprSyntax",
            BOOLEAN_LITERAL_EXPR => "BooleanLiteralExprSyntax",
            NIL_LITERAL_EXPR => "NilLiteralExprSyntax",
            STRING_LITERAL_EXPR => "StringLiteralExprSyntax",
            STRING_LITERAL_SEGMENT_LIST => "StringLiteralSegmentListSyntax",
            STRING_SEGMENT => "StringSegmentSyntax",
            TUPLE_EXPR => "TupleExprSyntax",
            LABELED_EXPR_LIST => "LabeledExprListSyntax",
            LABELED_EXPR => "LabeledExprSyntax",
            FUNCTION_CALL_EXPR => "FunctionCallExprSyntax",
            MEMBER_ACCESS_EXPR => "MemberAccessExprSyntax",
            ARRAY_EXPR => "ArrayExprSyntax",
            ARRAY_ELEMENT_LIST => "ArrayElementListSyntax",
            ARRAY_ELEMENT => "ArrayElementSyntax",
            MISSING_EXPR => "MissingExprSyntax",
            IDENTIFIER_PATTERN => "IdentifierPatternSyntax",
            WILDCARD_PATTERN => "WildcardPatternSyntax",
            MISSING_PATTERN => "MissingPatternSyntax",
            IDENTIFIER_TYPE => "IdentifierTypeSyntax",
            OPTIONAL_TYPE => "OptionalTypeSyntax",
            ARRAY_TYPE => "ArrayTypeSyntax",
            MISSING_TYPE => "MissingTypeSyntax",
            UNEXPECTED_NODES => "UnexpectedNodesSyntax",
            _ => "Syntax",
        }
    }

    /// Name of a token kind, e.g. `letKeyword` or `identifier`.
    pub const fn token_name(self) -> &'static str {
        match self {
            LEFT_PAREN => "leftParen",
            RIGHT_PAREN => "rightParen",
            LEFT_SQUARE => "leftSquare",
            RIGHT_SQUARE => "rightSquare",
            LEFT_BRACE => "leftBrace",
            RIGHT_BRACE => "rightBrace",
            COMMA => "comma",
            COLON => "colon",
            SEMICOLON => "semicolon",
            PERIOD => "period",
            EQUAL => "equal",
            ARROW => "arrow",
            POSTFIX_QUESTION_MARK => "postfixQuestionMark",
            STRING_QUOTE => "stringQuote",
            WILDCARD => "wildcard",
            LET_KW => "letKeyword",
            VAR_KW => "varKeyword",
            FUNC_KW => "funcKeyword",
            STRUCT_KW => "structKeyword",
            IMPORT_KW => "importKeyword",
            RETURN_KW => "returnKeyword",
            IF_KW => "ifKeyword",
            ELSE_KW => "elseKeyword",
            WHILE_KW => "whileKeyword",
            TRUE_KW => "trueKeyword",
            FALSE_KW => "falseKeyword",
            NIL_KW => "nilKeyword",
            SELF_KW => "selfKeyword",
            IDENTIFIER => "identifier",
            INTEGER_LITERAL => "integerLiteral",
            FLOAT_LITERAL => "floatLiteral",
            STRING_TEXT => "stringSegment",
            BINARY_OPERATOR => "binaryOperator",
            PREFIX_OPERATOR => "prefixOperator",
            POSTFIX_OPERATOR => "postfixOperator",
            EOF => "endOfFile",
            _ => "unknown",
        }
    }

    /// Token kinds whose text varies and is therefore part of their
    /// description, e.g. `identifier("x")`.
    #[inline]
    pub const fn has_text_payload(self) -> bool {
        matches!(
            self,
            IDENTIFIER
                | INTEGER_LITERAL
                | FLOAT_LITERAL
                | STRING_TEXT
                | BINARY_OPERATOR
                | PREFIX_OPERATOR
                | POSTFIX_OPERATOR
        )
    }

    /// Text a token of this kind always has; missing tokens display it.
    pub const fn fixed_text(self) -> Option<&'static str> {
        let text = match self {
            LEFT_PAREN => "(",
            RIGHT_PAREN => ")",
            LEFT_SQUARE => "[",
            RIGHT_SQUARE => "]",
            LEFT_BRACE => "{",
            RIGHT_BRACE => "}",
            COMMA => ",",
            COLON => ":",
            SEMICOLON => ";",
            PERIOD => ".",
            EQUAL => "=",
            ARROW => "->",
            POSTFIX_QUESTION_MARK => "?",
            STRING_QUOTE => "\"",
            WILDCARD => "_",
            LET_KW => "let",
            VAR_KW => "var",
            FUNC_KW => "func",
            STRUCT_KW => "struct",
            IMPORT_KW => "import",
            RETURN_KW => "return",
            IF_KW => "if",
            ELSE_KW => "else",
            WHILE_KW => "while",
            TRUE_KW => "true",
            FALSE_KW => "false",
            NIL_KW => "nil",
            SELF_KW => "self",
            _ => return None,
        };
        Some(text)
    }

    /// Maps an identifier-like word to its keyword kind.
    pub fn from_keyword(word: &str) -> Option<Self> {
        let kind = match word {
            "let" => LET_KW,
            "var" => VAR_KW,
            "func" => FUNC_KW,
            "struct" => STRUCT_KW,
            "import" => IMPORT_KW,
            "return" => RETURN_KW,
            "if" => IF_KW,
            "else" => ELSE_KW,
            "while" => WHILE_KW,
            "true" => TRUE_KW,
            "false" => FALSE_KW,
            "nil" => NIL_KW,
            "self" => SELF_KW,
            _ => return None,
        };
        Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_precede_nodes() {
        assert!(EOF.is_token());
        assert!(IDENTIFIER.is_token());
        assert!(!SOURCE_FILE.is_token());
        assert!(!UNEXPECTED_NODES.is_token());
    }

    #[test]
    fn keywords_round_trip_through_fixed_text() {
        for kind in [LET_KW, VAR_KW, FUNC_KW, STRUCT_KW, IMPORT_KW, RETURN_KW, SELF_KW] {
            assert!(kind.is_keyword());
            let text = kind.fixed_text().unwrap();
            assert_eq!(SyntaxKind::from_keyword(text), Some(kind));
            assert!(kind.token_name().ends_with("Keyword"));
        }
        assert!(!IDENTIFIER.is_keyword());
    }

    #[test]
    fn node_names_carry_syntax_suffix() {
        assert_eq!(VARIABLE_DECL.name(), "VariableDeclSyntax");
        assert_eq!(IDENTIFIER.name(), "TokenSyntax");
        assert_eq!(VARIABLE_DECL.base(), SyntaxBase::Decl);
        assert_eq!(MISSING_EXPR.base(), SyntaxBase::Expr);
        assert_eq!(CODE_BLOCK.base(), SyntaxBase::Other);
        assert_eq!(COMMA.base(), SyntaxBase::Token);
    }
}
