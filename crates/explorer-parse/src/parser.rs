use drop_bomb::DropBomb;
use explorer_errors::Diagnostic;
use explorer_syntax::{Builder, SyntaxKind, SyntaxSet, SyntaxTree};
use explorer_tokenizer::{Token, Tokenizer};
use text_size::TextRange;

pub(crate) struct Parser<'t> {
    text: &'t str,
    tokenizer: Tokenizer<'t>,
    events: Vec<Event>,
    diagnostics: Vec<Diagnostic>,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(text: &'t str) -> Self {
        Self { text, tokenizer: Tokenizer::new(text), events: Vec::new(), diagnostics: Vec::new() }
    }

    pub(crate) fn peek_kind(&self) -> SyntaxKind {
        self.tokenizer.peek().kind
    }

    pub(crate) fn nth(&mut self, n: usize) -> SyntaxKind {
        self.tokenizer.nth(n).kind
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn at_set(&self, set: &SyntaxSet) -> bool {
        set.contains(self.peek_kind())
    }

    /// Returns `true` when a line break separates the next token from the
    /// previous one.
    pub(crate) fn at_line_start(&self) -> bool {
        self.tokenizer.peek().has_leading_newline()
    }

    /// Returns `true` when the next token directly follows the previous one.
    pub(crate) fn at_glued(&self) -> bool {
        self.tokenizer.peek().leading.is_empty()
    }

    pub(crate) fn advance(&mut self) {
        if self.at(SyntaxKind::EOF) {
            return;
        }

        let token = self.tokenizer.next_token();
        self.events.push(Event::Token(token));
    }

    /// Consumes the end of file token, which carries the trailing trivia of
    /// the whole file.
    pub(crate) fn advance_eof(&mut self) {
        debug_assert!(self.at(SyntaxKind::EOF));
        let token = self.tokenizer.next_token();
        self.events.push(Event::Token(token));
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.advance();
            return true;
        }
        false
    }

    /// Consumes a token of `kind` or inserts a missing one in its place.
    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }

        let message = match kind.fixed_text() {
            Some(text) => format!("expected `{text}`"),
            None => format!("expected {}", describe(kind)),
        };
        self.error(message);
        self.missing(kind);
        false
    }

    pub(crate) fn missing(&mut self, kind: SyntaxKind) {
        self.events.push(Event::Missing(kind));
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len() as u32;
        self.events.push(Event::TOMBSTONE);
        Marker::new(pos)
    }

    pub(crate) fn error(&mut self, message: impl Into<String>) {
        let range = self.error_range();
        self.diagnostics.push(Diagnostic::error(message, range));
    }

    fn error_range(&self) -> TextRange {
        let token = self.tokenizer.peek();
        if token.kind == SyntaxKind::EOF {
            return TextRange::empty(token.kind_range.start());
        }
        token.kind_range
    }

    pub(crate) fn build_tree(self) -> (SyntaxTree, Vec<Diagnostic>) {
        let Parser { text, tokenizer: _, mut events, diagnostics } = self;
        let mut builder = Builder::new(text);
        let mut forward_parents = Vec::new();

        for i in 0..events.len() {
            match std::mem::replace(&mut events[i], Event::TOMBSTONE) {
                Event::Start { kind, forward_parent } => {
                    if kind == SyntaxKind::TOMBSTONE {
                        continue;
                    }

                    forward_parents.push(kind);
                    let mut idx = i;
                    let mut fp = forward_parent;
                    while let Some(fwd) = fp {
                        idx += fwd as usize;

                        fp = match std::mem::replace(&mut events[idx], Event::TOMBSTONE) {
                            Event::Start { kind, forward_parent } => {
                                if kind != SyntaxKind::TOMBSTONE {
                                    forward_parents.push(kind);
                                }
                                forward_parent
                            }
                            _ => unreachable!(),
                        };
                    }

                    for kind in forward_parents.drain(..).rev() {
                        builder.start_node(kind);
                    }
                }
                Event::Finish => {
                    builder.finish_node();
                }
                Event::Token(Token { leading, kind, kind_range, trailing }) => {
                    builder.token(leading, kind, kind_range.len(), trailing);
                }
                Event::Missing(kind) => {
                    builder.missing_token(kind);
                }
            }
        }

        (builder.finish(), diagnostics)
    }
}

fn describe(kind: SyntaxKind) -> &'static str {
    match kind {
        SyntaxKind::IDENTIFIER => "identifier",
        SyntaxKind::STRING_TEXT => "string content",
        SyntaxKind::INTEGER_LITERAL | SyntaxKind::FLOAT_LITERAL => "number",
        SyntaxKind::EOF => "end of file",
        _ => "operator",
    }
}

enum Event {
    Start { kind: SyntaxKind, forward_parent: Option<u32> },
    Token(Token),
    Missing(SyntaxKind),
    Finish,
}

impl Event {
    const TOMBSTONE: Self = Event::Start { kind: SyntaxKind::TOMBSTONE, forward_parent: None };
}

pub(crate) struct Marker {
    position: u32,
    bomb: DropBomb,
}

impl Marker {
    fn new(pos: u32) -> Marker {
        Marker {
            position: pos,
            bomb: DropBomb::new("Marker must be completed"),
        }
    }

    pub(crate) fn complete(mut self, p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
        self.bomb.defuse();

        match &mut p.events[self.position as usize] {
            Event::Start { kind: slot, .. } => {
                *slot = kind;
            }
            _ => unreachable!(),
        }

        p.events.push(Event::Finish);
        CompletedMarker::new(self.position)
    }
}

pub(crate) struct CompletedMarker {
    pos: u32,
}

impl CompletedMarker {
    fn new(pos: u32) -> Self {
        CompletedMarker { pos }
    }

    pub(crate) fn precede(self, p: &mut Parser<'_>) -> Marker {
        let new_pos = p.start();

        match &mut p.events[self.pos as usize] {
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some(new_pos.position - self.pos);
            }
            _ => unreachable!(),
        }

        new_pos
    }
}
