//! Incremental builder for the immutable syntax tree.

use text_size::TextSize;

use crate::layout::{Shape, assign_slots};
use crate::syntax::{Child, NodeData, TokenData, TriviaSpan};
use crate::{NodeOrToken, Presence, SyntaxKind, SyntaxTree, TriviaPiece};

/// Builds a `SyntaxTree` from parser events.
///
/// Nodes are opened and closed in pre-order; tokens are appended to the most
/// recently opened node. Token lengths must add up to the text passed to
/// [`Builder::new`] by the time [`Builder::finish`] is called.
pub struct Builder {
    text: Box<str>,
    nodes: Vec<NodeData>,
    tokens: Vec<TokenData>,
    trivia: Vec<TriviaPiece>,
    children: Vec<Child>,

    children_pool: Vec<Vec<Child>>,
    opened: Vec<Opened>,
    text_len: TextSize,
}

struct Opened {
    node: u32,
    children: Vec<Child>,
}

impl Drop for Builder {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.opened.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

const DEFAULT_TREE_DEPTH: usize = 128;
const DEFAULT_TREE_SIZE: usize = 1024;
const DEFAULT_CHILDREN_LEN: usize = 10;

impl Builder {
    /// Creates a new builder for `text`.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.into(),
            nodes: Vec::with_capacity(DEFAULT_TREE_SIZE),
            tokens: Vec::with_capacity(DEFAULT_TREE_SIZE),
            trivia: Vec::with_capacity(DEFAULT_TREE_SIZE),
            children: Vec::with_capacity(DEFAULT_TREE_SIZE),

            children_pool: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            opened: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            text_len: TextSize::new(0),
        }
    }

    /// Retrieves a recycled children buffer or allocates a new one.
    fn new_children_vec(&mut self) -> Vec<Child> {
        self.children_pool.pop().unwrap_or_else(|| Vec::with_capacity(DEFAULT_CHILDREN_LEN))
    }

    /// Returns a children buffer to the pool.
    fn recycle_children_vec(&mut self, mut vec: Vec<Child>) {
        vec.clear();
        self.children_pool.push(vec);
    }

    #[track_caller]
    fn last_opened(&mut self) -> &mut Opened {
        self.opened.last_mut().expect("no opened nodes?")
    }

    /// Starts a new node of the given kind.
    pub fn start_node(&mut self, kind: SyntaxKind) {
        debug_assert!(!kind.is_token(), "{kind:?} is a token kind");
        assert!(
            !self.opened.is_empty() || self.nodes.is_empty(),
            "a syntax tree has exactly one root"
        );

        let new_node = to_u32(self.nodes.len());
        let parent = self.opened.last().map(|opened| opened.node);
        self.nodes.push(NodeData {
            kind,
            parent,
            children_start: 0,
            children_len: 0,
            tokens: None,
            offset: self.text_len,
        });
        if let Some(parent) = self.opened.last_mut() {
            parent.children.push(Child { element: NodeOrToken::Node(new_node), slot: None });
        }
        let children = self.new_children_vec();
        self.opened.push(Opened { node: new_node, children });
    }

    /// Finishes the most recently started node and assigns its children to
    /// the slots declared for its kind.
    pub fn finish_node(&mut self) {
        let Opened { node, mut children } = self.opened.pop().expect("no opened nodes?");
        let kind = self.nodes[node as usize].kind;

        if let Shape::Layout(slots) = kind.shape() {
            let kinds: Vec<SyntaxKind> =
                children.iter().map(|child| self.element_kind(child.element)).collect();
            assign_slots(slots, kinds, |index, slot| children[index].slot = slot);
        }

        let data = &mut self.nodes[node as usize];
        data.children_start = to_u32(self.children.len());
        data.children_len = to_u32(children.len());
        self.children.extend_from_slice(&children);
        self.recycle_children_vec(children);
    }

    fn element_kind(&self, element: NodeOrToken<u32, u32>) -> SyntaxKind {
        match element {
            NodeOrToken::Node(node) => self.nodes[node as usize].kind,
            NodeOrToken::Token(token) => self.tokens[token as usize].kind,
        }
    }

    /// Adds a token with its leading and trailing trivia.
    pub fn token(
        &mut self,
        leading_trivia: impl IntoIterator<Item = TriviaPiece>,
        kind: SyntaxKind,
        text_len: TextSize,
        trailing_trivia: impl IntoIterator<Item = TriviaPiece>,
    ) {
        debug_assert!(kind.is_token(), "{kind:?} is a node kind");

        let full_start = self.text_len;
        let leading = self.push_trivia(leading_trivia);
        let start = self.text_len;
        self.advance(text_len);
        let trailing = self.push_trivia(trailing_trivia);

        self.push_token(TokenData {
            kind,
            presence: Presence::Present,
            parent: 0,
            full_start,
            start,
            len: text_len,
            full_end: self.text_len,
            leading,
            trailing,
        });
    }

    /// Adds a zero-width token that the parser expected but did not find.
    pub fn missing_token(&mut self, kind: SyntaxKind) {
        debug_assert!(kind.is_token(), "{kind:?} is a node kind");

        let offset = self.text_len;
        let empty = TriviaSpan { start: to_u32(self.trivia.len()), len: 0 };
        self.push_token(TokenData {
            kind,
            presence: Presence::Missing,
            parent: 0,
            full_start: offset,
            start: offset,
            len: TextSize::new(0),
            full_end: offset,
            leading: empty,
            trailing: empty,
        });
    }

    fn push_trivia(&mut self, pieces: impl IntoIterator<Item = TriviaPiece>) -> TriviaSpan {
        let start = to_u32(self.trivia.len());
        for piece in pieces {
            self.advance(piece.len);
            self.trivia.push(piece);
        }
        TriviaSpan { start, len: to_u32(self.trivia.len()) - start }
    }

    fn advance(&mut self, len: TextSize) {
        self.text_len += len;
        assert!(
            self.text.is_char_boundary(usize::from(self.text_len)),
            "token boundary at {:?} is not a char boundary",
            self.text_len
        );
    }

    fn push_token(&mut self, mut token: TokenData) {
        let parent = self.last_opened().node;
        token.parent = parent;
        let index = to_u32(self.tokens.len());
        self.tokens.push(token);
        self.last_opened().children.push(Child { element: NodeOrToken::Token(index), slot: None });
        self.update_first_last_tokens(index);
    }

    /// Updates token ranges for all open ancestor nodes.
    fn update_first_last_tokens(&mut self, token: u32) {
        for ancestor in &self.opened {
            let node = &mut self.nodes[ancestor.node as usize];
            match &mut node.tokens {
                None => node.tokens = Some((token, token)),
                Some((_first, last)) => *last = token,
            }
        }
    }

    /// Finishes building and returns the immutable `SyntaxTree`.
    pub fn finish(mut self) -> SyntaxTree {
        assert!(self.opened.is_empty(), "unfinished nodes remain");
        assert!(!self.nodes.is_empty(), "a syntax tree needs a root node");
        assert_eq!(
            usize::from(self.text_len),
            self.text.len(),
            "tokens and trivia must cover the whole text"
        );

        SyntaxTree {
            text: std::mem::take(&mut self.text),
            nodes: std::mem::take(&mut self.nodes).into_boxed_slice(),
            tokens: std::mem::take(&mut self.tokens).into_boxed_slice(),
            trivia: std::mem::take(&mut self.trivia).into_boxed_slice(),
            children: std::mem::take(&mut self.children).into_boxed_slice(),
        }
    }
}

#[inline]
#[track_caller]
fn to_u32(len: usize) -> u32 {
    u32::try_from(len).expect("syntax tree exceeds u32::MAX elements")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind::*;
    use crate::TriviaPieceKind;

    fn spaces(len: u32) -> TriviaPiece {
        TriviaPiece::new(TriviaPieceKind::Spaces, TextSize::new(len))
    }

    #[test]
    fn token_ranges_include_trivia() {
        let mut builder = Builder::new(" x ");
        builder.start_node(DECL_REFERENCE_EXPR);
        builder.token([spaces(1)], IDENTIFIER, TextSize::new(1), [spaces(1)]);
        builder.finish_node();
        let tree = builder.finish();

        let root = tree.root();
        let token = root.first_token().unwrap();
        assert_eq!(token.text(), "x");
        assert_eq!(u32::from(token.trimmed_range().start()), 1);
        assert_eq!(u32::from(token.text_range().end()), 3);
        assert_eq!(root.text_trimmed(), "x");
        assert_eq!(root.slot(0).and_then(|it| it.into_token()).map(|it| it.kind()), Some(IDENTIFIER));
    }

    #[test]
    fn missing_tokens_are_zero_width() {
        let mut builder = Builder::new("{");
        builder.start_node(CODE_BLOCK);
        builder.token([], LEFT_BRACE, TextSize::new(1), []);
        builder.start_node(CODE_BLOCK_ITEM_LIST);
        builder.finish_node();
        builder.missing_token(RIGHT_BRACE);
        builder.finish_node();
        let tree = builder.finish();

        let root = tree.root();
        let right = root.last_token().unwrap();
        assert!(right.is_missing());
        assert_eq!(right.text(), "}");
        assert!(right.trimmed_range().is_empty());
        assert_eq!(u32::from(right.trimmed_range().start()), 1);
        assert!(!root.is_missing());
        assert_eq!(root.slot(2).map(|it| it.kind()), Some(RIGHT_BRACE));
    }

    #[test]
    #[should_panic(expected = "you should call `Builder::finish()`")]
    fn dropping_an_unfinished_builder_panics() {
        let mut builder = Builder::new("");
        builder.start_node(SOURCE_FILE);
    }
}
