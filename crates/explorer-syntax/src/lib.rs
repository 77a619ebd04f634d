//! Lossless, immutable syntax tree with parent links, attached trivia and
//! named child slots.
//!
//! The tree is built once through [`Builder`] and then navigated by cheap,
//! lifetime-bound handles.

mod builder;
/// Static child layout of every node kind.
pub mod layout;
mod syntax;
mod syntax_kind;
mod syntax_set;
mod trivia;

/// Incremental builder for constructing a `SyntaxTree`.
pub use builder::Builder;
/// Child layout descriptors.
pub use layout::{Shape, Slot, SlotKind};
/// Primary syntax tree API types and adapters.
pub use syntax::{
    ChildrenWithTokens, NodeOrToken, PreorderWithTokens, Presence, SyntaxElement, SyntaxNode,
    SyntaxToken, SyntaxTree, SyntaxTrivia, TriviaIter, WalkEventWithTokens,
};
/// Token and node kinds used throughout the tree.
pub use syntax_kind::{SyntaxBase, SyntaxKind};
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
/// Trivia pieces attached to tokens.
pub use trivia::{TriviaPiece, TriviaPieceKind};
pub use text_size::{TextRange, TextSize};
