//! Single-pass walk producing the markup and the node records together.

use explorer_syntax::{
    NodeOrToken, SyntaxBase, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken,
    WalkEventWithTokens,
};

use crate::location::LocationConverter;
use crate::record::{NodeRecord, Range, SyntaxCategory, TokenInfo};
use crate::structure::structure;
use crate::text::{
    display_invisibles, escape_html, source_accurate_text, substitute_invisibles,
    transform_whitespaces,
};
use crate::trivia::render_trivia;
use crate::{SerializeOptions, Serialized};

/// Walks a tree once, appending a span per element to the markup and a
/// record per element to the record list.
///
/// Records are indexed by id. `current` is the innermost open record; on
/// leaving an element the walk returns to that record's parent.
pub(crate) struct Visitor<'a> {
    converter: LocationConverter<'a>,
    show_missing_tokens: bool,

    html: String,
    records: Vec<NodeRecord>,
    next_id: u32,
    current: Option<u32>,
}

impl<'a> Visitor<'a> {
    pub(crate) fn new(converter: LocationConverter<'a>, options: &SerializeOptions) -> Self {
        Self {
            converter,
            show_missing_tokens: options.show_missing_tokens,
            html: String::new(),
            records: Vec::new(),
            next_id: 0,
            current: None,
        }
    }

    pub(crate) fn walk(mut self, root: SyntaxNode<'_>) -> Serialized {
        let mut events = root.preorder_with_tokens();
        while let Some(event) = events.next() {
            match event {
                WalkEventWithTokens::EnterNode(node) => {
                    if self.is_hidden(node.is_missing()) {
                        events.skip_subtree();
                        continue;
                    }
                    self.enter(NodeOrToken::Node(node));
                }
                WalkEventWithTokens::LeaveNode(_) => self.leave(),
                WalkEventWithTokens::Token(token) => {
                    if self.is_hidden(token.is_missing()) {
                        continue;
                    }
                    self.enter(NodeOrToken::Token(token));
                    self.visit_token(token);
                    self.leave();
                }
            }
        }

        debug_assert!(self.current.is_none(), "unbalanced walk");
        Serialized { html: self.html, nodes: self.records }
    }

    fn is_hidden(&self, missing: bool) -> bool {
        missing && !self.show_missing_tokens
    }

    fn enter(&mut self, element: SyntaxElement<'_>) {
        let kind = element.kind();
        let type_name = kind.name();
        let label = escape_html(type_name.strip_suffix("Syntax").unwrap_or(type_name));

        let (title, content, data_type, structure) = match element {
            NodeOrToken::Token(token) => (
                source_accurate_text(token).to_owned(),
                token.description(),
                "Token",
                Vec::new(),
            ),
            NodeOrToken::Node(node) => {
                (node.text_trimmed().to_owned(), type_name.to_owned(), "Syntax", structure(node))
            }
        };

        let (start, end) = self.converter.range(element.trimmed_range());
        let range = Range::new(start, end);

        let id = self.next_id;
        self.next_id += 1;

        self.html.push_str(&format!(
            "<span class='{label}' data-id='{id}' data-title='{title}' data-content='{content}' data-type='{data_type}' data-range='{range}'>",
            title = display_invisibles(&escape_html(&title)),
            content = substitute_invisibles(&escape_html(&content)),
            range = range.to_attribute(),
        ));

        self.records.push(NodeRecord {
            id,
            parent: self.current,
            text: label,
            range,
            structure,
            category: category(kind),
            token: None,
            class: None,
        });
        self.current = Some(id);
    }

    fn visit_token(&mut self, token: SyntaxToken<'_>) {
        let mut info =
            TokenInfo { kind: token.description(), leading_trivia: String::new(), trailing_trivia: String::new() };

        for piece in token.leading_trivia() {
            let fragment = render_trivia(&piece);
            info.leading_trivia.push_str(&transform_whitespaces(&fragment));
            self.html.push_str(&fragment);
        }
        self.process_token(token);
        for piece in token.trailing_trivia() {
            let fragment = render_trivia(&piece);
            info.trailing_trivia.push_str(&transform_whitespaces(&fragment));
            self.html.push_str(&fragment);
        }

        let Some(record) = self.current.and_then(|id| self.records.get_mut(id as usize)) else {
            return;
        };
        record.text = transform_whitespaces(&substitute_invisibles(&escape_html(token.text())));
        if token.is_missing() {
            record.class = Some(token.presence().to_string());
        }
        record.token = Some(info);
    }

    /// The token's own span, nested in the span of its record.
    fn process_token(&mut self, token: SyntaxToken<'_>) {
        let description = token.description();
        let mut kind = description.split('(').next().unwrap_or_default();
        if kind.ends_with("Keyword") {
            kind = "keyword";
        }

        let (start, end) = self.converter.range(token.trimmed_range());
        let text = if !token.is_missing() || self.show_missing_tokens {
            substitute_invisibles(&escape_html(source_accurate_text(token)))
        } else {
            String::new()
        };

        self.html.push_str(&format!(
            "<span class='token {kind} {presence}' data-title='{title}' data-content='{content}' data-type='Token' data-range='{range}'>{text}</span>",
            kind = escape_html(kind),
            presence = token.presence(),
            title = display_invisibles(&escape_html(source_accurate_text(token))),
            content = substitute_invisibles(&escape_html(&description)),
            range = Range::new(start, end).to_attribute(),
        ));
    }

    fn leave(&mut self) {
        self.html.push_str("</span>");
        self.current =
            self.current.and_then(|id| self.records.get(id as usize)).and_then(|record| record.parent);
    }
}

fn category(kind: SyntaxKind) -> SyntaxCategory {
    if kind.is_collection() {
        return SyntaxCategory::Collection;
    }
    match kind.base() {
        SyntaxBase::Decl => SyntaxCategory::Decl,
        SyntaxBase::Expr => SyntaxCategory::Expr,
        SyntaxBase::Pattern => SyntaxCategory::Pattern,
        SyntaxBase::Type => SyntaxCategory::Type,
        SyntaxBase::Stmt | SyntaxBase::Token | SyntaxBase::Other => SyntaxCategory::Other,
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;
    use explorer_syntax::SyntaxKind::*;
    use line_index::LineIndex;

    use super::*;

    fn walk(text: &str, show_missing_tokens: bool) -> Serialized {
        let parse = explorer_parse::parse(text);
        let line_index = LineIndex::new(text);
        let converter = LocationConverter::new(text, &line_index);
        Visitor::new(converter, &SerializeOptions { show_missing_tokens }).walk(parse.tree.root())
    }

    #[test]
    fn markup_nests_like_the_tree() {
        let serialized = walk("x", false);
        expect![[r#"
            <span class='SourceFile' data-id='0' data-title='x' data-content='SourceFileSyntax' data-type='Syntax' data-range='{"startRow":1,"startColumn":1,"endRow":1,"endColumn":2}'>
            <span class='CodeBlockItemList' data-id='1' data-title='x' data-content='CodeBlockItemListSyntax' data-type='Syntax' data-range='{"startRow":1,"startColumn":1,"endRow":1,"endColumn":2}'>
            <span class='CodeBlockItem' data-id='2' data-title='x' data-content='CodeBlockItemSyntax' data-type='Syntax' data-range='{"startRow":1,"startColumn":1,"endRow":1,"endColumn":2}'>
            <span class='DeclReferenceExpr' data-id='3' data-title='x' data-content='DeclReferenceExprSyntax' data-type='Syntax' data-range='{"startRow":1,"startColumn":1,"endRow":1,"endColumn":2}'>
            <span class='Token' data-id='4' data-title='x' data-content='identifier(&quot;x&quot;)' data-type='Token' data-range='{"startRow":1,"startColumn":1,"endRow":1,"endColumn":2}'>
            <span class='token identifier present' data-title='x' data-content='identifier(&quot;x&quot;)' data-type='Token' data-range='{"startRow":1,"startColumn":1,"endRow":1,"endColumn":2}'>x</span>
            </span>
            </span>
            </span>
            </span>
            <span class='Token' data-id='5' data-title='' data-content='endOfFile' data-type='Token' data-range='{"startRow":1,"startColumn":2,"endRow":1,"endColumn":2}'>
            <span class='token endOfFile present' data-title='' data-content='endOfFile' data-type='Token' data-range='{"startRow":1,"startColumn":2,"endRow":1,"endColumn":2}'>
            </span>
            </span>
            </span>
        "#]]
        .assert_eq(&format!("{}\n", serialized.html.replace("><", ">\n<")));
    }

    #[test]
    fn records_follow_preorder() {
        let serialized = walk("let number = 0", false);
        let labels: Vec<_> = serialized
            .nodes
            .iter()
            .map(|record| format!("{} {:?} {:?}", record.id, record.parent, record.text))
            .collect();
        expect![[r#"
            0 None "SourceFile"
            1 Some(0) "CodeBlockItemList"
            2 Some(1) "CodeBlockItem"
            3 Some(2) "VariableDecl"
            4 Some(3) "let"
            5 Some(3) "PatternBindingList"
            6 Some(5) "PatternBinding"
            7 Some(6) "IdentifierPattern"
            8 Some(7) "number"
            9 Some(6) "InitializerClause"
            10 Some(9) "="
            11 Some(9) "IntegerLiteralExpr"
            12 Some(11) "0"
            13 Some(0) ""
        "#]]
        .assert_eq(&(labels.join("\n") + "\n"));
    }

    #[test]
    fn token_records_carry_trivia() {
        let serialized = walk("let a = 1 // one\n", false);
        let literal = serialized.nodes.iter().find(|record| record.text == "1").unwrap();
        let token = literal.token.as_ref().unwrap();
        assert_eq!(token.kind, r#"integerLiteral("1")"#);
        assert_eq!(token.leading_trivia, "");
        assert_eq!(
            token.trailing_trivia,
            "␣<span class='lineComment' data-title='//␣one' data-content='lineComment' data-type='Trivia'>//␣one</span>"
        );

        let eof = serialized.nodes.last().unwrap();
        assert_eq!(eof.token.as_ref().unwrap().leading_trivia, "↲<br/>");
        assert!(serialized.html.contains("<br/><span class='token endOfFile present'"));
    }

    #[test]
    fn categories() {
        assert_eq!(category(VARIABLE_DECL), SyntaxCategory::Decl);
        assert_eq!(category(SEQUENCE_EXPR), SyntaxCategory::Expr);
        assert_eq!(category(IDENTIFIER_PATTERN), SyntaxCategory::Pattern);
        assert_eq!(category(OPTIONAL_TYPE), SyntaxCategory::Type);
        assert_eq!(category(RETURN_STMT), SyntaxCategory::Other);
        assert_eq!(category(CODE_BLOCK_ITEM_LIST), SyntaxCategory::Collection);
        assert_eq!(category(EXPR_LIST), SyntaxCategory::Collection);
        assert_eq!(category(IDENTIFIER), SyntaxCategory::Other);
    }

    #[test]
    fn keyword_tokens_share_a_class() {
        let serialized = walk("let number = 0", false);
        assert!(serialized.html.contains("<span class='token keyword present' data-title='let'"));
        assert!(serialized.html.contains("<span class='token equal present' data-title='='"));
    }

    #[test]
    fn missing_tokens_follow_the_option() {
        let hidden = walk("func f() {", false);
        assert!(hidden.nodes.iter().all(|record| record.class.is_none()));
        assert!(!hidden.html.contains("missing"));

        let shown = walk("func f() {", true);
        let brace = shown.nodes.iter().find(|record| record.class.is_some()).unwrap();
        assert_eq!(brace.text, "}");
        assert_eq!(brace.class.as_deref(), Some("missing"));
        assert!(shown.html.contains("<span class='token rightBrace missing' data-title='}'"));
        assert_eq!(shown.nodes.len(), hidden.nodes.len() + 1);
    }
}
