use explorer_serialize::{
    LocationConverter, SerializeOptions, Serialized, SyntaxCategory, escape_html, serialize,
};
use explorer_syntax::{NodeOrToken, SyntaxElement, SyntaxTree, WalkEventWithTokens};
use line_index::LineIndex;

const SOURCES: &[&str] = &[
    include_str!("../../explorer-parse/test_data/control_flow.swift"),
    include_str!("../../explorer-parse/test_data/function.swift"),
    include_str!("../../explorer-parse/test_data/missing_brace.swift"),
    include_str!("../../explorer-parse/test_data/struct.swift"),
    include_str!("../../explorer-parse/test_data/trivia.swift"),
    include_str!("../../explorer-parse/test_data/unexpected.swift"),
    include_str!("../../explorer-parse/test_data/variable.swift"),
    "",
    "import a.",
    "struct S",
    "func f() {\n  if x {\n",
    "let é = \"😀\" + [1, 2][0]\n",
    "\tlet\u{b}x\u{c}= 1\r\n\\ ## $ /* a /* b */ */\n",
    "}}} )( = = = [1, f(x:",
];

fn run(text: &str, show_missing_tokens: bool) -> (SyntaxTree, Serialized) {
    let tree = explorer_parse::parse(text).tree;
    let line_index = LineIndex::new(text);
    let converter = LocationConverter::new(text, &line_index);
    let serialized = serialize(&tree, &converter, &SerializeOptions { show_missing_tokens });
    (tree, serialized)
}

/// Elements the serializer renders, in rendering order.
fn rendered(tree: &SyntaxTree, show_missing_tokens: bool) -> Vec<SyntaxElement<'_>> {
    let mut elements = Vec::new();
    let mut events = tree.root().preorder_with_tokens();
    while let Some(event) = events.next() {
        match event {
            WalkEventWithTokens::EnterNode(node) => {
                if node.is_missing() && !show_missing_tokens {
                    events.skip_subtree();
                } else {
                    elements.push(NodeOrToken::Node(node));
                }
            }
            WalkEventWithTokens::LeaveNode(_) => {}
            WalkEventWithTokens::Token(token) => {
                if !token.is_missing() || show_missing_tokens {
                    elements.push(NodeOrToken::Token(token));
                }
            }
        }
    }
    elements
}

fn each_case(mut f: impl FnMut(&str, bool, &SyntaxTree, &Serialized)) {
    for text in SOURCES {
        for show_missing_tokens in [false, true] {
            let (tree, serialized) = run(text, show_missing_tokens);
            f(text, show_missing_tokens, &tree, &serialized);
        }
    }
}

#[test]
fn spans_are_balanced() {
    each_case(|text, _, _, serialized| {
        let mut depth = 0usize;
        let mut opened = 0;
        let html = &serialized.html;
        for (index, _) in html.match_indices('<') {
            let rest = &html[index..];
            if rest.starts_with("<span ") {
                depth += 1;
                opened += 1;
            } else if rest.starts_with("</span>") {
                assert!(depth > 0, "closing span without an opening one in {text:?}");
                depth -= 1;
            } else {
                assert!(rest.starts_with("<br/>"), "unexpected tag in {text:?}: {rest}");
            }
        }
        assert_eq!(depth, 0, "unclosed spans in {text:?}");
        assert_eq!(opened, html.matches("</span>").count());
    });
}

#[test]
fn one_record_per_rendered_element() {
    each_case(|text, show_missing_tokens, tree, serialized| {
        let elements = rendered(tree, show_missing_tokens);
        assert_eq!(serialized.nodes.len(), elements.len(), "{text:?}");
        if show_missing_tokens {
            assert_eq!(serialized.nodes.len(), tree.node_count() + tree.token_count());
        }

        let tokens = serialized.nodes.iter().filter(|record| record.token.is_some()).count();
        let nodes = serialized.nodes.len() - tokens;
        assert_eq!(tokens, elements.iter().filter(|element| element.as_token().is_some()).count());
        assert_eq!(nodes, elements.iter().filter(|element| element.as_node().is_some()).count());

        for (index, record) in serialized.nodes.iter().enumerate() {
            assert_eq!(record.id as usize, index);
            let attribute = format!("data-id='{}'", record.id);
            assert_eq!(serialized.html.matches(&attribute).count(), 1, "{text:?}: {attribute}");
        }
    });
}

#[test]
fn parent_chains_reach_the_root() {
    each_case(|text, _, _, serialized| {
        let records = &serialized.nodes;
        let roots: Vec<_> = records.iter().filter(|record| record.parent.is_none()).collect();
        assert_eq!(roots.len(), 1, "{text:?}");
        assert_eq!(roots[0].id, 0);

        for record in records {
            let mut steps = 0;
            let mut current = record;
            while let Some(parent) = current.parent {
                assert!(parent < current.id, "{text:?}: parent {parent} after {}", current.id);
                current = &records[parent as usize];
                steps += 1;
                assert!(steps <= records.len());
            }
            assert_eq!(current.id, 0);
        }
    });
}

#[test]
fn escaping_twice_is_detectable() {
    for text in ["a & b", "<span>", "\"quoted\"", "it's"] {
        let once = escape_html(text);
        assert_ne!(escape_html(&once), once, "{text:?}");
    }
    for text in ["let number = 0", "", "ünïcödé"] {
        assert_eq!(escape_html(text), text);
    }
}

#[test]
fn missing_tokens_follow_the_option() {
    each_case(|text, show_missing_tokens, tree, serialized| {
        let missing_in_tree = tree.root().tokens().filter(|token| token.is_missing()).count();
        let missing_records = serialized
            .nodes
            .iter()
            .filter(|record| record.class.as_deref() == Some("missing"))
            .count();
        let missing_spans = serialized.html.matches(" missing' data-title=").count();

        if show_missing_tokens {
            assert_eq!(missing_records, missing_in_tree, "{text:?}");
            assert_eq!(missing_spans, missing_in_tree, "{text:?}");
        } else {
            assert!(serialized.nodes.iter().all(|record| record.class.is_none()), "{text:?}");
            assert_eq!(missing_spans, 0, "{text:?}");
        }
    });
}

#[test]
fn collections_report_raw_counts() {
    each_case(|text, show_missing_tokens, tree, serialized| {
        let elements = rendered(tree, show_missing_tokens);
        for (record, element) in serialized.nodes.iter().zip(elements) {
            let NodeOrToken::Node(node) = element else { continue };
            assert_eq!(record.category == SyntaxCategory::Collection, node.kind().is_collection());
            if record.category != SyntaxCategory::Collection {
                continue;
            }

            let names: Vec<_> = record.structure.iter().map(|property| property.name.as_str()).collect();
            assert_eq!(names, ["Element", "Count"], "{text:?}");
            let count = record.structure[1].value.as_ref().unwrap().text.as_str();
            assert_eq!(count, node.child_count().to_string(), "{text:?}");
        }
    });
}

#[test]
fn hidden_elements_still_count() {
    let (_, serialized) = run("import a.", false);
    let path = serialized.nodes.iter().find(|record| record.text == "ImportPathComponentList").unwrap();
    assert_eq!(path.structure[1].value.as_ref().unwrap().text, "2");

    let components = serialized
        .nodes
        .iter()
        .filter(|record| record.parent == Some(path.id))
        .count();
    assert_eq!(components, 1);
}
