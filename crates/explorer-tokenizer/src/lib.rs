//! Tokenizer producing tokens with their leading and trailing trivia.
//!
//! Trailing trivia runs up to, but not including, the next line break; every
//! line break and whatever follows it belongs to the leading trivia of the
//! next token.

mod cursor;

use std::collections::VecDeque;

use cursor::{Cursor, EOF_CHAR};
pub use explorer_syntax::SyntaxKind;
use explorer_syntax::SyntaxKind::*;
use explorer_syntax::{TriviaPiece, TriviaPieceKind};
use text_size::{TextRange, TextSize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub leading: Vec<TriviaPiece>,
    pub kind: SyntaxKind,
    pub kind_range: TextRange,
    pub trailing: Vec<TriviaPiece>,
}

impl Token {
    /// Returns `true` when the leading trivia contains a line break.
    pub fn has_leading_newline(&self) -> bool {
        self.leading.iter().any(|piece| piece.kind.is_newline())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    /// Right after an opening quote: text up to the closing quote or the end
    /// of the line is string content, not trivia.
    StringBody,
}

pub struct Tokenizer<'a> {
    text: &'a str,
    cursor: Cursor<'a>,
    mode: Mode,
    current: Token,
    lookahead: VecDeque<Token>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut tokenizer = Self {
            text,
            cursor: Cursor::new(text),
            mode: Mode::Normal,
            current: Token {
                leading: Vec::new(),
                kind: EOF,
                kind_range: TextRange::empty(TextSize::new(0)),
                trailing: Vec::new(),
            },
            lookahead: VecDeque::new(),
        };
        tokenizer.current = tokenizer.lex();
        tokenizer
    }

    /// Returns the next token without consuming it.
    pub fn peek(&self) -> &Token {
        &self.current
    }

    /// Returns the token `n` positions ahead; `nth(0)` is [`Tokenizer::peek`].
    pub fn nth(&mut self, n: usize) -> &Token {
        if n == 0 {
            return &self.current;
        }
        while self.lookahead.len() < n {
            let token = self.lex();
            self.lookahead.push_back(token);
        }
        &self.lookahead[n - 1]
    }

    /// Consumes and returns the next token. Once the input is exhausted every
    /// call returns an empty `EOF` token.
    pub fn next_token(&mut self) -> Token {
        let next = match self.lookahead.pop_front() {
            Some(token) => token,
            None => self.lex(),
        };
        std::mem::replace(&mut self.current, next)
    }

    fn offset(&self) -> TextSize {
        TextSize::new(self.text.len() as u32) - self.cursor.len()
    }

    fn range(&self) -> TextRange {
        let end = self.offset();
        let len = self.cursor.pos_within_token();
        TextRange::new(end - len, end)
    }

    fn text(&self) -> &'a str {
        &self.text[self.range()]
    }

    fn lex(&mut self) -> Token {
        if self.mode == Mode::StringBody {
            if let Some(token) = self.string_body() {
                return token;
            }
        }

        let leading = self.trivia(false);
        let (kind, kind_range) = self.syntax_kind();
        let trailing = if kind == STRING_QUOTE {
            self.mode = Mode::StringBody;
            Vec::new()
        } else {
            self.trivia(true)
        };

        Token { leading, kind, kind_range, trailing }
    }

    /// Lexes string content or the closing quote. Returns `None` when the
    /// string is unterminated on this line.
    fn string_body(&mut self) -> Option<Token> {
        if self.cursor.is_eof() || matches!(self.cursor.peek(), '\n' | '\r') {
            self.mode = Mode::Normal;
            return None;
        }

        if self.cursor.matches('"') {
            self.cursor.advance();
            let kind_range = self.range();
            self.cursor.reset_pos_within_token();
            self.mode = Mode::Normal;
            let trailing = self.trivia(true);
            return Some(Token { leading: Vec::new(), kind: STRING_QUOTE, kind_range, trailing });
        }

        while !self.cursor.is_eof() {
            match self.cursor.peek() {
                '"' | '\n' | '\r' => break,
                '\\' => {
                    self.cursor.advance();
                    if !self.cursor.is_eof() && !matches!(self.cursor.peek(), '\n' | '\r') {
                        self.cursor.advance();
                    }
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }

        let kind_range = self.range();
        self.cursor.reset_pos_within_token();
        Some(Token { leading: Vec::new(), kind: STRING_TEXT, kind_range, trailing: Vec::new() })
    }

    fn trivia(&mut self, trailing: bool) -> Vec<TriviaPiece> {
        let mut pieces = Vec::new();

        loop {
            if self.cursor.is_eof() {
                break;
            }

            let kind = match self.cursor.peek() {
                ' ' => {
                    self.cursor.advance_while(|c| c == ' ');
                    TriviaPieceKind::Spaces
                }
                '\t' => {
                    self.cursor.advance_while(|c| c == '\t');
                    TriviaPieceKind::Tabs
                }
                '\u{b}' => {
                    self.cursor.advance_while(|c| c == '\u{b}');
                    TriviaPieceKind::VerticalTabs
                }
                '\u{c}' => {
                    self.cursor.advance_while(|c| c == '\u{c}');
                    TriviaPieceKind::Formfeeds
                }
                '\n' if !trailing => {
                    self.cursor.advance_while(|c| c == '\n');
                    TriviaPieceKind::Newlines
                }
                '\r' if !trailing => {
                    if self.cursor.second() == '\n' {
                        while self.cursor.starts_with("\r\n") {
                            self.cursor.advance();
                            self.cursor.advance();
                        }
                        TriviaPieceKind::CarriageReturnLineFeeds
                    } else {
                        while self.cursor.matches('\r') && self.cursor.second() != '\n' {
                            self.cursor.advance();
                        }
                        TriviaPieceKind::CarriageReturns
                    }
                }
                '/' if self.cursor.second() == '/' => {
                    let doc = self.cursor.nth(2) == '/' && self.cursor.nth(3) != '/';
                    self.cursor.advance_while(|c| !matches!(c, '\n' | '\r'));
                    if doc { TriviaPieceKind::DocLineComment } else { TriviaPieceKind::LineComment }
                }
                '/' if self.cursor.second() == '*' => {
                    let doc = self.cursor.nth(2) == '*' && self.cursor.nth(3) != '/';
                    self.block_comment();
                    if doc { TriviaPieceKind::DocBlockComment } else { TriviaPieceKind::BlockComment }
                }
                '#' if self.cursor.second() == '!' && self.offset() == TextSize::new(0) => {
                    self.cursor.advance_while(|c| !matches!(c, '\n' | '\r'));
                    TriviaPieceKind::Shebang
                }
                '#' => {
                    self.cursor.advance_while(|c| c == '#');
                    TriviaPieceKind::Pounds
                }
                '\\' => {
                    self.cursor.advance_while(|c| c == '\\');
                    TriviaPieceKind::Backslashes
                }
                c if is_unexpected(c) => {
                    self.cursor.advance_while(is_unexpected);
                    TriviaPieceKind::UnexpectedText
                }
                _ => break,
            };

            pieces.push(TriviaPiece::new(kind, self.cursor.pos_within_token()));
            self.cursor.reset_pos_within_token();
        }

        pieces
    }

    /// Consumes a possibly nested block comment. An unterminated comment runs
    /// to the end of the input.
    fn block_comment(&mut self) {
        self.cursor.advance();
        self.cursor.advance();

        let mut depth = 1u32;
        while !self.cursor.is_eof() {
            if self.cursor.starts_with("/*") {
                self.cursor.advance();
                self.cursor.advance();
                depth += 1;
            } else if self.cursor.starts_with("*/") {
                self.cursor.advance();
                self.cursor.advance();
                depth -= 1;
                if depth == 0 {
                    break;
                }
            } else {
                self.cursor.advance();
            }
        }
    }

    fn syntax_kind(&mut self) -> (SyntaxKind, TextRange) {
        if self.cursor.is_eof() {
            return (EOF, TextRange::empty(self.offset()));
        }

        let previous = self.cursor.previous();

        let kind = match self.cursor.advance() {
            '(' => LEFT_PAREN,
            ')' => RIGHT_PAREN,
            '[' => LEFT_SQUARE,
            ']' => RIGHT_SQUARE,
            '{' => LEFT_BRACE,
            '}' => RIGHT_BRACE,
            ',' => COMMA,
            ':' => COLON,
            ';' => SEMICOLON,
            '"' => STRING_QUOTE,
            first_char @ '0'..='9' => self.number(first_char),
            first_char if is_identifier_start(first_char) => {
                self.cursor.advance_while(is_identifier_continue);

                match self.text() {
                    "_" => WILDCARD,
                    text => SyntaxKind::from_keyword(text).unwrap_or(IDENTIFIER),
                }
            }
            first_char if is_operator(first_char) => self.operator(previous),
            first_char => unreachable!("{first_char:?} should have been lexed as trivia"),
        };

        let range = self.range();
        self.cursor.reset_pos_within_token();

        (kind, range)
    }

    fn operator(&mut self, previous: char) -> SyntaxKind {
        while is_operator(self.cursor.peek()) && !self.at_comment_start() {
            self.cursor.advance();
        }

        let left_bound = match previous {
            '(' | '[' | '{' | ',' | ':' | ';' => false,
            EOF_CHAR => false,
            prev => !prev.is_whitespace(),
        };

        let right_bound = match self.cursor.peek() {
            _ if self.cursor.is_eof() || self.at_comment_start() => false,
            ')' | ']' | '}' | ',' | ':' | ';' => false,
            '.' => !left_bound,
            peeked => !peeked.is_whitespace(),
        };

        match self.text() {
            "=" => EQUAL,
            "." => PERIOD,
            "->" => ARROW,
            "?" if left_bound => POSTFIX_QUESTION_MARK,
            _ => {
                if left_bound == right_bound {
                    BINARY_OPERATOR
                } else if left_bound {
                    POSTFIX_OPERATOR
                } else {
                    PREFIX_OPERATOR
                }
            }
        }
    }

    fn at_comment_start(&self) -> bool {
        self.cursor.starts_with("//") || self.cursor.starts_with("/*")
    }

    fn number(&mut self, c: char) -> SyntaxKind {
        if c == '0' {
            match self.cursor.peek() {
                'b' | 'o' => {
                    self.cursor.advance();
                    self.digits(false);
                }
                'x' => {
                    self.cursor.advance();
                    self.digits(true);
                }
                '0'..='9' | '_' | '.' | 'e' | 'E' => {
                    self.digits(false);
                }
                _ => return INTEGER_LITERAL,
            }
        } else {
            self.digits(false);
        }

        if self.cursor.matches('.') && self.cursor.second().is_ascii_digit() {
            self.cursor.advance();
            self.digits(false);
            self.float_exponent();
            return FLOAT_LITERAL;
        }

        if self.cursor.matches('e') || self.cursor.matches('E') {
            self.float_exponent();
            return FLOAT_LITERAL;
        }

        INTEGER_LITERAL
    }

    fn digits(&mut self, allow_hex: bool) {
        loop {
            match self.cursor.peek() {
                '_' | '0'..='9' => {
                    self.cursor.advance();
                }
                'a'..='f' | 'A'..='F' if allow_hex => {
                    self.cursor.advance();
                }
                _ => return,
            }
        }
    }

    fn float_exponent(&mut self) {
        if self.cursor.matches('e') || self.cursor.matches('E') {
            self.cursor.advance();
            if self.cursor.matches('-') || self.cursor.matches('+') {
                self.cursor.advance();
            }
            self.digits(false);
        }
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_identifier_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

fn is_operator(c: char) -> bool {
    matches!(
        c,
        '/' | '=' | '-' | '+' | '*' | '%' | '<' | '>' | '!' | '&' | '|' | '^' | '~' | '.' | '?'
    )
}

fn is_punctuation(c: char) -> bool {
    matches!(c, '(' | ')' | '[' | ']' | '{' | '}' | ',' | ':' | ';' | '"')
}

/// Characters that start neither a token nor a known trivia piece.
fn is_unexpected(c: char) -> bool {
    !(matches!(c, ' ' | '\t' | '\u{b}' | '\u{c}' | '\n' | '\r' | '#' | '\\')
        || c.is_ascii_digit()
        || is_identifier_start(c)
        || is_operator(c)
        || is_punctuation(c))
}
