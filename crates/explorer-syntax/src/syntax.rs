//! Public syntax tree API built on an immutable, index-linked arena.

use std::fmt;

use text_size::{TextRange, TextSize};

use crate::{SyntaxKind, TriviaPiece, TriviaPieceKind};

/// Owned syntax tree for a single source text.
#[derive(Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    pub(crate) text: Box<str>,
    pub(crate) nodes: Box<[NodeData]>,
    pub(crate) tokens: Box<[TokenData]>,
    pub(crate) trivia: Box<[TriviaPiece]>,
    pub(crate) children: Box<[Child]>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeData {
    pub(crate) kind: SyntaxKind,
    pub(crate) parent: Option<u32>,
    pub(crate) children_start: u32,
    pub(crate) children_len: u32,
    /// First and last token index, inclusive.
    pub(crate) tokens: Option<(u32, u32)>,
    /// Text offset at which the node was opened.
    pub(crate) offset: TextSize,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) struct TokenData {
    pub(crate) kind: SyntaxKind,
    pub(crate) presence: Presence,
    pub(crate) parent: u32,
    pub(crate) full_start: TextSize,
    pub(crate) start: TextSize,
    pub(crate) len: TextSize,
    pub(crate) full_end: TextSize,
    pub(crate) leading: TriviaSpan,
    pub(crate) trailing: TriviaSpan,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) struct TriviaSpan {
    pub(crate) start: u32,
    pub(crate) len: u32,
}

impl TriviaSpan {
    fn range(self) -> std::ops::Range<usize> {
        self.start as usize..(self.start + self.len) as usize
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) struct Child {
    pub(crate) element: NodeOrToken<u32, u32>,
    pub(crate) slot: Option<u16>,
}

impl SyntaxTree {
    /// Returns the root syntax node.
    #[inline]
    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode { tree: self, index: 0 }
    }

    /// Returns the full source text for this tree.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of nodes in the tree.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of tokens in the tree, missing tokens included.
    #[inline]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    fn node(&self, index: u32) -> &NodeData {
        &self.nodes[index as usize]
    }

    fn token(&self, index: u32) -> &TokenData {
        &self.tokens[index as usize]
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.root(), f)
    }
}

/// Whether a token was present in the source or inserted by error recovery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Presence {
    Present,
    Missing,
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Present => "present",
            Self::Missing => "missing",
        })
    }
}

/// Token handle tied to the lifetime of the tree.
#[derive(Clone, Copy)]
pub struct SyntaxToken<'a> {
    tree: &'a SyntaxTree,
    index: u32,
}

impl<'a> SyntaxToken<'a> {
    #[inline]
    fn data(self) -> &'a TokenData {
        self.tree.token(self.index)
    }

    /// Returns this token's kind.
    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.data().kind
    }

    #[inline]
    pub fn presence(self) -> Presence {
        self.data().presence
    }

    #[inline]
    pub fn is_missing(self) -> bool {
        self.presence() == Presence::Missing
    }

    /// Returns the token text range including attached trivia.
    #[inline]
    pub fn text_range(self) -> TextRange {
        let data = self.data();
        TextRange::new(data.full_start, data.full_end)
    }

    /// Returns the token text range excluding trivia.
    ///
    /// Missing tokens report an empty range at the offset they were expected.
    #[inline]
    pub fn trimmed_range(self) -> TextRange {
        let data = self.data();
        TextRange::at(data.start, data.len)
    }

    /// Returns the token text excluding trivia.
    ///
    /// Missing tokens have no source text and report the text their kind
    /// always has (`}` for a right brace) or an empty string.
    #[inline]
    pub fn text(self) -> &'a str {
        match self.presence() {
            Presence::Present => &self.tree.text[self.trimmed_range()],
            Presence::Missing => self.kind().fixed_text().unwrap_or(""),
        }
    }

    /// Describes the token kind, followed by the token text for kinds whose
    /// text varies: `letKeyword`, `identifier("number")`.
    pub fn description(self) -> String {
        let kind = self.kind();
        if kind.has_text_payload() {
            format!("{}({:?})", kind.token_name(), self.text())
        } else {
            kind.token_name().to_owned()
        }
    }

    /// Iterates over leading trivia.
    #[inline]
    pub fn leading_trivia(self) -> TriviaIter<'a> {
        let data = self.data();
        TriviaIter::new(self.tree, data.leading, data.full_start)
    }

    /// Iterates over trailing trivia.
    #[inline]
    pub fn trailing_trivia(self) -> TriviaIter<'a> {
        let data = self.data();
        TriviaIter::new(self.tree, data.trailing, data.start + data.len)
    }

    /// Raw leading trivia pieces.
    #[inline]
    pub fn leading_pieces(self) -> &'a [TriviaPiece] {
        &self.tree.trivia[self.data().leading.range()]
    }

    /// Raw trailing trivia pieces.
    #[inline]
    pub fn trailing_pieces(self) -> &'a [TriviaPiece] {
        &self.tree.trivia[self.data().trailing.range()]
    }

    /// Returns `true` when the leading trivia contains a line break.
    pub fn has_leading_newline(self) -> bool {
        self.leading_pieces().iter().any(|piece| piece.kind.is_newline())
    }

    /// Returns the parent node.
    #[inline]
    pub fn parent(self) -> SyntaxNode<'a> {
        SyntaxNode { tree: self.tree, index: self.data().parent }
    }
}

impl fmt::Debug for SyntaxToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range = self.trimmed_range();
        write!(f, "{:?}@{}..{}", self.kind(), u32::from(range.start()), u32::from(range.end()))?;
        if self.is_missing() {
            return f.write_str(" missing");
        }
        write!(f, " {:?}", self.text())?;
        for (label, pieces) in [("leading", self.leading_pieces()), ("trailing", self.trailing_pieces())]
        {
            if pieces.is_empty() {
                continue;
            }
            write!(f, " {label}=[")?;
            for (i, piece) in pieces.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{:?}({})", piece.kind, u32::from(piece.len))?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

/// A single trivia piece resolved against the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyntaxTrivia<'a> {
    pub kind: TriviaPieceKind,
    pub text: &'a str,
    pub range: TextRange,
}

impl SyntaxTrivia<'_> {
    /// Number of repetitions of a repetition piece; `1` for text pieces.
    #[inline]
    pub fn count(&self) -> usize {
        TriviaPiece::new(self.kind, self.range.len()).count()
    }
}

/// Iterator over trivia attached to one side of a token.
#[derive(Clone)]
pub struct TriviaIter<'a> {
    tree: &'a SyntaxTree,
    pieces: std::slice::Iter<'a, TriviaPiece>,
    offset: TextSize,
}

impl<'a> TriviaIter<'a> {
    fn new(tree: &'a SyntaxTree, span: TriviaSpan, offset: TextSize) -> Self {
        Self { tree, pieces: tree.trivia[span.range()].iter(), offset }
    }
}

impl<'a> Iterator for TriviaIter<'a> {
    type Item = SyntaxTrivia<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let piece = self.pieces.next()?;
        let range = TextRange::at(self.offset, piece.len);
        self.offset = range.end();
        Some(SyntaxTrivia { kind: piece.kind, text: &self.tree.text[range], range })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pieces.size_hint()
    }
}

impl ExactSizeIterator for TriviaIter<'_> {
    #[inline]
    fn len(&self) -> usize {
        self.pieces.len()
    }
}

/// Node handle tied to the lifetime of the tree.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    tree: &'a SyntaxTree,
    index: u32,
}

impl<'a> SyntaxNode<'a> {
    #[inline]
    fn data(self) -> &'a NodeData {
        self.tree.node(self.index)
    }

    /// Returns this node's kind.
    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.data().kind
    }

    /// Returns the first token spanned by this node.
    #[inline]
    pub fn first_token(self) -> Option<SyntaxToken<'a>> {
        let (first, _) = self.data().tokens?;
        Some(SyntaxToken { tree: self.tree, index: first })
    }

    /// Returns the last token spanned by this node.
    #[inline]
    pub fn last_token(self) -> Option<SyntaxToken<'a>> {
        let (_, last) = self.data().tokens?;
        Some(SyntaxToken { tree: self.tree, index: last })
    }

    /// Iterates over every token in this subtree in source order.
    pub fn tokens(self) -> impl DoubleEndedIterator<Item = SyntaxToken<'a>> + 'a {
        let tree = self.tree;
        let range = match self.data().tokens {
            Some((first, last)) => first..last + 1,
            None => 0..0,
        };
        range.map(move |index| SyntaxToken { tree, index })
    }

    /// Returns the text range covered by this node, trivia included.
    #[inline]
    pub fn text_range(self) -> TextRange {
        match (self.first_token(), self.last_token()) {
            (Some(first), Some(last)) => {
                TextRange::new(first.text_range().start(), last.text_range().end())
            }
            _ => TextRange::empty(self.data().offset),
        }
    }

    /// Returns the range with leading/trailing trivia trimmed away.
    #[inline]
    pub fn trimmed_range(self) -> TextRange {
        match (self.first_token(), self.last_token()) {
            (Some(first), Some(last)) => {
                TextRange::new(first.trimmed_range().start(), last.trimmed_range().end())
            }
            _ => TextRange::empty(self.data().offset),
        }
    }

    /// Returns the text slice covered by this node.
    #[inline]
    pub fn text(self) -> &'a str {
        &self.tree.text[self.text_range()]
    }

    /// Returns the text slice excluding leading/trailing trivia.
    #[inline]
    pub fn text_trimmed(self) -> &'a str {
        &self.tree.text[self.trimmed_range()]
    }

    /// A node is missing when it spans at least one token and every token
    /// it spans was inserted by error recovery.
    pub fn is_missing(self) -> bool {
        self.data().tokens.is_some() && self.tokens().all(SyntaxToken::is_missing)
    }

    /// Returns the parent node if any.
    #[inline]
    pub fn parent(self) -> Option<Self> {
        Some(Self { tree: self.tree, index: self.data().parent? })
    }

    /// Returns an iterator of ancestors starting from this node.
    #[inline]
    pub fn ancestors(self) -> impl Iterator<Item = SyntaxNode<'a>> + Clone {
        std::iter::successors(Some(self), |it| it.parent())
    }

    fn child_entries(self) -> &'a [Child] {
        let data = self.data();
        let start = data.children_start as usize;
        &self.tree.children[start..start + data.children_len as usize]
    }

    fn element(self, element: NodeOrToken<u32, u32>) -> SyntaxElement<'a> {
        match element {
            NodeOrToken::Node(index) => NodeOrToken::Node(SyntaxNode { tree: self.tree, index }),
            NodeOrToken::Token(index) => NodeOrToken::Token(SyntaxToken { tree: self.tree, index }),
        }
    }

    /// Number of direct children, tokens included.
    #[inline]
    pub fn child_count(self) -> usize {
        self.data().children_len as usize
    }

    /// Iterates children including tokens.
    #[inline]
    pub fn children_with_tokens(self) -> ChildrenWithTokens<'a> {
        ChildrenWithTokens { node: self, children: self.child_entries().iter() }
    }

    /// Iterates child nodes, skipping tokens.
    #[inline]
    pub fn children(self) -> impl Iterator<Item = SyntaxNode<'a>> {
        self.children_with_tokens().filter_map(SyntaxElement::into_node)
    }

    /// Returns the child assigned to the slot at `index` of this node's
    /// layout, if present.
    pub fn slot(self, index: usize) -> Option<SyntaxElement<'a>> {
        let index = u16::try_from(index).ok()?;
        self.child_entries()
            .iter()
            .find(|child| child.slot == Some(index))
            .map(|child| self.element(child.element))
    }

    /// Returns a preorder iterator over nodes and tokens.
    #[inline]
    pub fn preorder_with_tokens(self) -> PreorderWithTokens<'a> {
        PreorderWithTokens::new(self)
    }
}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut depth = 0usize;
        for event in self.preorder_with_tokens() {
            match event {
                WalkEventWithTokens::EnterNode(node) => {
                    let range = node.text_range();
                    writeln!(
                        f,
                        "{:indent$}{:?}@{}..{}",
                        "",
                        node.kind(),
                        u32::from(range.start()),
                        u32::from(range.end()),
                        indent = depth * 2
                    )?;
                    depth += 1;
                }
                WalkEventWithTokens::LeaveNode(_) => depth -= 1,
                WalkEventWithTokens::Token(token) => {
                    writeln!(f, "{:indent$}{token:?}", "", indent = depth * 2)?;
                }
            }
        }
        Ok(())
    }
}

/// Node or token element inside the tree.
pub type SyntaxElement<'a> = NodeOrToken<SyntaxNode<'a>, SyntaxToken<'a>>;

impl<'a> SyntaxElement<'a> {
    pub fn kind(self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn trimmed_range(self) -> TextRange {
        match self {
            NodeOrToken::Node(node) => node.trimmed_range(),
            NodeOrToken::Token(token) => token.trimmed_range(),
        }
    }

    pub fn is_missing(self) -> bool {
        match self {
            NodeOrToken::Node(node) => node.is_missing(),
            NodeOrToken::Token(token) => token.is_missing(),
        }
    }
}

/// Iterator over children including tokens.
#[derive(Clone)]
pub struct ChildrenWithTokens<'a> {
    node: SyntaxNode<'a>,
    children: std::slice::Iter<'a, Child>,
}

impl<'a> Iterator for ChildrenWithTokens<'a> {
    type Item = SyntaxElement<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let child = self.children.next()?;
        Some(self.node.element(child.element))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.children.size_hint()
    }
}

impl DoubleEndedIterator for ChildrenWithTokens<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let child = self.children.next_back()?;
        Some(self.node.element(child.element))
    }
}

impl ExactSizeIterator for ChildrenWithTokens<'_> {
    #[inline]
    fn len(&self) -> usize {
        self.children.len()
    }
}

/// Preorder traversal over nodes and tokens.
#[derive(Clone)]
pub struct PreorderWithTokens<'a> {
    stack: Vec<(SyntaxNode<'a>, ChildrenWithTokens<'a>)>,
    root: Option<SyntaxNode<'a>>,
}

impl<'a> PreorderWithTokens<'a> {
    #[inline]
    fn new(start: SyntaxNode<'a>) -> PreorderWithTokens<'a> {
        PreorderWithTokens { stack: Vec::with_capacity(128), root: Some(start) }
    }

    /// Skips the subtree of the node that was just entered. No `LeaveNode`
    /// event is produced for it.
    #[inline]
    pub fn skip_subtree(&mut self) {
        assert!(self.stack.pop().is_some(), "must have a subtree to skip");
    }
}

impl<'a> Iterator for PreorderWithTokens<'a> {
    type Item = WalkEventWithTokens<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let Some((_, active_node)) = self.stack.last_mut() else {
            let root = self.root.take()?;
            self.stack.push((root, root.children_with_tokens()));
            return Some(WalkEventWithTokens::EnterNode(root));
        };
        match active_node.next() {
            Some(NodeOrToken::Node(child)) => {
                self.stack.push((child, child.children_with_tokens()));
                Some(WalkEventWithTokens::EnterNode(child))
            }
            Some(NodeOrToken::Token(child)) => Some(WalkEventWithTokens::Token(child)),
            None => {
                let (exited_node, _) = self.stack.pop()?;
                Some(WalkEventWithTokens::LeaveNode(exited_node))
            }
        }
    }
}

/// Preorder walk event including tokens.
#[derive(Clone, Copy, Debug)]
pub enum WalkEventWithTokens<'a> {
    EnterNode(SyntaxNode<'a>),
    LeaveNode(SyntaxNode<'a>),
    Token(SyntaxToken<'a>),
}

/// Node-or-token wrapper used throughout the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    /// Converts into the node variant, if any.
    pub fn into_node(self) -> Option<N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Converts into the token variant, if any.
    pub fn into_token(self) -> Option<T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }

    /// Returns a shared reference to the node, if any.
    pub fn as_node(&self) -> Option<&N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Returns a shared reference to the token, if any.
    pub fn as_token(&self) -> Option<&T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;
    use text_size::TextSize;

    use super::*;
    use crate::Builder;
    use crate::SyntaxKind::*;

    fn piece(kind: TriviaPieceKind, len: u32) -> TriviaPiece {
        TriviaPiece::new(kind, TextSize::new(len))
    }

    /// `let x = 1 // one\n`
    fn variable() -> SyntaxTree {
        let text = "let x = 1 // one\n";
        let mut builder = Builder::new(text);
        builder.start_node(SOURCE_FILE);
        builder.start_node(CODE_BLOCK_ITEM_LIST);
        builder.start_node(CODE_BLOCK_ITEM);
        builder.start_node(VARIABLE_DECL);
        builder.token([], LET_KW, TextSize::new(3), [piece(TriviaPieceKind::Spaces, 1)]);
        builder.start_node(PATTERN_BINDING_LIST);
        builder.start_node(PATTERN_BINDING);
        builder.start_node(IDENTIFIER_PATTERN);
        builder.token([], IDENTIFIER, TextSize::new(1), [piece(TriviaPieceKind::Spaces, 1)]);
        builder.finish_node();
        builder.start_node(INITIALIZER_CLAUSE);
        builder.token([], EQUAL, TextSize::new(1), [piece(TriviaPieceKind::Spaces, 1)]);
        builder.start_node(INTEGER_LITERAL_EXPR);
        builder.token(
            [],
            INTEGER_LITERAL,
            TextSize::new(1),
            [piece(TriviaPieceKind::Spaces, 1), piece(TriviaPieceKind::LineComment, 6)],
        );
        builder.finish_node();
        builder.finish_node();
        builder.finish_node();
        builder.finish_node();
        builder.finish_node();
        builder.finish_node();
        builder.finish_node();
        builder.token([piece(TriviaPieceKind::Newlines, 1)], EOF, TextSize::new(0), []);
        builder.finish_node();
        builder.finish()
    }

    #[test]
    fn debug_dump() {
        let tree = variable();
        expect![[r#"
            SOURCE_FILE@0..17
              CODE_BLOCK_ITEM_LIST@0..16
                CODE_BLOCK_ITEM@0..16
                  VARIABLE_DECL@0..16
                    LET_KW@0..3 "let" trailing=[Spaces(1)]
                    PATTERN_BINDING_LIST@4..16
                      PATTERN_BINDING@4..16
                        IDENTIFIER_PATTERN@4..6
                          IDENTIFIER@4..5 "x" trailing=[Spaces(1)]
                        INITIALIZER_CLAUSE@6..16
                          EQUAL@6..7 "=" trailing=[Spaces(1)]
                          INTEGER_LITERAL_EXPR@8..16
                            INTEGER_LITERAL@8..9 "1" trailing=[Spaces(1), LineComment(6)]
              EOF@17..17 "" leading=[Newlines(1)]
        "#]]
        .assert_eq(&format!("{tree:?}"));
    }

    #[test]
    fn preorder_visits_root_and_balances() {
        let tree = variable();
        let mut enters = 0;
        let mut leaves = 0;
        let mut tokens = 0;
        for event in tree.root().preorder_with_tokens() {
            match event {
                WalkEventWithTokens::EnterNode(_) => enters += 1,
                WalkEventWithTokens::LeaveNode(_) => leaves += 1,
                WalkEventWithTokens::Token(_) => tokens += 1,
            }
        }
        assert_eq!(enters, tree.node_count());
        assert_eq!(enters, leaves);
        assert_eq!(tokens, tree.token_count());
    }

    #[test]
    fn skip_subtree_omits_children_and_leave() {
        let tree = variable();
        let mut walk = tree.root().preorder_with_tokens();
        let mut kinds = Vec::new();
        while let Some(event) = walk.next() {
            match event {
                WalkEventWithTokens::EnterNode(node) => {
                    kinds.push(node.kind());
                    if node.kind() == PATTERN_BINDING_LIST {
                        walk.skip_subtree();
                    }
                }
                WalkEventWithTokens::LeaveNode(node) => {
                    assert_ne!(node.kind(), PATTERN_BINDING_LIST);
                }
                WalkEventWithTokens::Token(token) => kinds.push(token.kind()),
            }
        }
        assert_eq!(
            kinds,
            [SOURCE_FILE, CODE_BLOCK_ITEM_LIST, CODE_BLOCK_ITEM, VARIABLE_DECL, LET_KW, PATTERN_BINDING_LIST, EOF]
        );
    }

    #[test]
    fn trivia_and_slots() {
        let tree = variable();
        let literal = tree.root().tokens().find(|it| it.kind() == INTEGER_LITERAL).unwrap();
        let trailing: Vec<_> = literal.trailing_trivia().map(|it| (it.kind, it.text)).collect();
        assert_eq!(
            trailing,
            [(TriviaPieceKind::Spaces, " "), (TriviaPieceKind::LineComment, "// one")]
        );
        assert_eq!(literal.description(), r#"integerLiteral("1")"#);

        let binding = literal.parent().ancestors().find(|it| it.kind() == PATTERN_BINDING).unwrap();
        assert_eq!(binding.slot(0).map(SyntaxElement::kind), Some(IDENTIFIER_PATTERN));
        assert!(binding.slot(1).is_none());
        assert_eq!(binding.slot(2).map(SyntaxElement::kind), Some(INITIALIZER_CLAUSE));
        assert_eq!(binding.text_trimmed(), "x = 1");

        let eof = tree.root().last_token().unwrap();
        assert!(eof.has_leading_newline());
        assert_eq!(eof.description(), "endOfFile");
    }
}
