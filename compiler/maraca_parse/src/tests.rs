#![allow(clippy::unwrap_used, clippy::expect_used)]

use maraca_ir::{BinaryOp, Bracket, Chained, NodeArena, NodeId, NodeKind, UnaryOp};
use pretty_assertions::assert_eq;

use crate::{parse, ParseErrorKind};

/// Parse `source` and return its only top-level item.
fn single(source: &str) -> (NodeArena, NodeId) {
    let parsed = parse(source).unwrap();
    let Some(NodeKind::List {
        bracket: Bracket::None,
        items,
    }) = parsed.arena.kind(parsed.root)
    else {
        panic!("root is not a bracketless list");
    };
    assert_eq!(items.len(), 1, "expected one item in {source:?}");
    let item = items[0];
    (parsed.arena, item)
}

fn kind(arena: &NodeArena, id: NodeId) -> &NodeKind {
    arena.kind(id).unwrap()
}

fn value(arena: &NodeArena, id: NodeId) -> &str {
    match kind(arena, id) {
        NodeKind::Value(v) => v,
        other => panic!("expected a value, found {other:?}"),
    }
}

fn list_items(arena: &NodeArena, id: NodeId) -> (Bracket, Vec<NodeId>) {
    match kind(arena, id) {
        NodeKind::List { bracket, items } => (*bracket, items.clone()),
        other => panic!("expected a list, found {other:?}"),
    }
}

fn error_kind(source: &str) -> ParseErrorKind {
    parse(source).unwrap_err().kind
}

// Values

#[test]
fn words_and_escapes() {
    let cases = [
        ("abc", "abc"),
        ("42", "42"),
        ("_", " "),
        ("\\-", "-"),
        ("\"\"", ""),
        ("\"a b\"", "a b"),
        ("\"\\<x\\>\"", "<x>"),
        ("\"a\\\\b\"", "a\\b"),
    ];
    for (source, expected) in cases {
        let (arena, id) = single(source);
        assert_eq!(value(&arena, id), expected, "source {source:?}");
    }
}

#[test]
fn string_line_breaks() {
    // A wrap point reads as one space, indentation included.
    let (arena, id) = single("\"aaa bbb\n    ccc\"");
    assert_eq!(value(&arena, id), "aaa bbb ccc");

    // `\` before the break is a real newline.
    let (arena, id) = single("\"foo\\\n   bar\"");
    assert_eq!(value(&arena, id), "foo\nbar");

    // Escaped blanks survive the indentation skip.
    let (arena, id) = single("\"a\\\n  \\ \\ b\"");
    assert_eq!(value(&arena, id), "a\n  b");
}

#[test]
fn string_with_blocks_is_a_template() {
    let (arena, id) = single("\"hi {name}!\"");
    let (bracket, items) = list_items(&arena, id);
    assert_eq!(bracket, Bracket::None);
    assert_eq!(items.len(), 3);
    assert_eq!(
        kind(&arena, items[0]),
        &NodeKind::Part {
            text: "hi ".into(),
            first: true,
            last: false,
        }
    );
    let (embed_bracket, embed_items) = list_items(&arena, items[1]);
    assert_eq!(embed_bracket, Bracket::Curly);
    assert_eq!(value(&arena, embed_items[0]), "name");
    assert_eq!(
        kind(&arena, items[2]),
        &NodeKind::Part {
            text: "!".into(),
            first: false,
            last: true,
        }
    );
    assert!(arena.is_template(&items));
}

#[test]
fn adjacent_blocks_keep_edge_parts_only() {
    let (arena, id) = single("\"[a]<b>\"");
    let (_, items) = list_items(&arena, id);
    assert_eq!(items.len(), 4);
    assert!(matches!(
        kind(&arena, items[0]),
        NodeKind::Part { text, first: true, .. } if text.is_empty()
    ));
    assert!(matches!(
        kind(&arena, items[3]),
        NodeKind::Part { text, last: true, .. } if text.is_empty()
    ));
}

#[test]
fn comments_and_inline_code() {
    let (arena, id) = single("`note \\`x\\``");
    assert_eq!(kind(&arena, id), &NodeKind::Comment("note `x`".into()));

    let (arena, id) = single("'a\\'b\n  c'");
    assert_eq!(kind(&arena, id), &NodeKind::Eval("a'b\n  c".into()));
}

#[test]
fn placeholders_and_references() {
    let (arena, id) = single("?");
    assert_eq!(kind(&arena, id), &NodeKind::Context);
    let (arena, id) = single("~");
    assert_eq!(kind(&arena, id), &NodeKind::Identity);
    let (arena, id) = single("#std");
    assert_eq!(kind(&arena, id), &NodeKind::Library("std".into()));

    let (arena, id) = single("@@x");
    let NodeKind::Interpret { level, body } = kind(&arena, id) else {
        panic!("expected interpret");
    };
    assert_eq!(*level, 2);
    assert_eq!(value(&arena, *body), "x");
}

#[test]
fn nested_interpret_through_parens() {
    let (arena, id) = single("@(@x)");
    let NodeKind::Interpret { level: 1, body } = kind(&arena, id) else {
        panic!("expected interpret");
    };
    assert!(matches!(
        kind(&arena, *body),
        NodeKind::Interpret { level: 1, .. }
    ));
}

// Functions and assignments

#[test]
fn function_forms() {
    let (arena, id) = single("k=>v=>>x");
    let NodeKind::Function {
        key: Some(k),
        value: Some(v),
        body,
    } = kind(&arena, id)
    else {
        panic!("expected key and value bindings");
    };
    assert_eq!(value(&arena, *k), "k");
    assert_eq!(value(&arena, *v), "v");
    assert_eq!(value(&arena, *body), "x");

    let (arena, id) = single("v=>>x");
    assert!(matches!(
        kind(&arena, id),
        NodeKind::Function {
            key: None,
            value: Some(_),
            ..
        }
    ));

    let (arena, id) = single("=>x");
    assert!(matches!(
        kind(&arena, id),
        NodeKind::Function {
            key: None,
            value: None,
            ..
        }
    ));
}

#[test]
fn parenthesised_value_function_stays_nested() {
    let (arena, id) = single("k=>(v=>>x)");
    let NodeKind::Function {
        key: Some(_),
        value: None,
        body,
    } = kind(&arena, id)
    else {
        panic!("expected a key-only function");
    };
    assert!(matches!(
        kind(&arena, *body),
        NodeKind::Function {
            key: None,
            value: Some(_),
            ..
        }
    ));
}

#[test]
fn function_body_on_next_line() {
    let (arena, id) = single("k=>\n  a=>b");
    let NodeKind::Function { body, .. } = kind(&arena, id) else {
        panic!("expected function");
    };
    assert!(matches!(
        kind(&arena, *body),
        NodeKind::Function {
            key: Some(_),
            value: None,
            ..
        }
    ));
}

#[test]
fn assignment_shorthands() {
    let (arena, id) = single("k:=");
    let NodeKind::Assign {
        key: Some(k),
        value: Some(v),
    } = kind(&arena, id)
    else {
        panic!("expected assign");
    };
    assert_eq!(k, v);

    let (arena, id) = single("k::");
    let NodeKind::Assign {
        key: Some(k),
        value: Some(v),
    } = kind(&arena, id)
    else {
        panic!("expected assign");
    };
    let NodeKind::Combine { dot: true, items } = kind(&arena, *v) else {
        panic!("expected context lookup");
    };
    assert_eq!(kind(&arena, items[0].node), &NodeKind::Context);
    assert_eq!(items[1].node, *k);
}

#[test]
fn assignment_shapes() {
    let (arena, id) = single(":");
    assert_eq!(
        kind(&arena, id),
        &NodeKind::Assign {
            key: None,
            value: None
        }
    );

    let (arena, id) = single("k:");
    assert!(matches!(
        kind(&arena, id),
        NodeKind::Assign {
            key: Some(_),
            value: None
        }
    ));

    let (arena, id) = single("k: :v");
    let NodeKind::Assign {
        value: Some(inner), ..
    } = kind(&arena, id)
    else {
        panic!("expected assign");
    };
    assert!(matches!(
        kind(&arena, *inner),
        NodeKind::Assign { key: None, value: Some(_) }
    ));

    let (arena, id) = single("k: =>v");
    let NodeKind::Assign {
        value: Some(inner), ..
    } = kind(&arena, id)
    else {
        panic!("expected assign");
    };
    assert!(matches!(kind(&arena, *inner), NodeKind::Function { .. }));
}

#[test]
fn assignment_value_on_next_line() {
    let (arena, id) = single("key:\n  longvalue");
    let NodeKind::Assign {
        value: Some(v), ..
    } = kind(&arena, id)
    else {
        panic!("expected assign");
    };
    assert_eq!(value(&arena, *v), "longvalue");
}

// Operators

fn binary_parts(arena: &NodeArena, id: NodeId) -> (BinaryOp, NodeId, NodeId) {
    match kind(arena, id) {
        NodeKind::Binary { op, left, right } => (*op, *left, *right),
        other => panic!("expected binary, found {other:?}"),
    }
}

#[test]
fn binary_precedence() {
    let (arena, id) = single("a + b * c");
    let (op, left, right) = binary_parts(&arena, id);
    assert_eq!(op, BinaryOp::Add);
    assert_eq!(value(&arena, left), "a");
    assert_eq!(binary_parts(&arena, right).0, BinaryOp::Mul);

    let (arena, id) = single("(a + b) * c");
    let (op, left, _) = binary_parts(&arena, id);
    assert_eq!(op, BinaryOp::Mul);
    assert_eq!(binary_parts(&arena, left).0, BinaryOp::Add);
}

#[test]
fn associativity() {
    let (arena, id) = single("a - b - c");
    let (_, left, right) = binary_parts(&arena, id);
    assert_eq!(binary_parts(&arena, left).0, BinaryOp::Sub);
    assert_eq!(value(&arena, right), "c");

    let (arena, id) = single("a ^ b ^ c");
    let (_, left, right) = binary_parts(&arena, id);
    assert_eq!(value(&arena, left), "a");
    assert_eq!(binary_parts(&arena, right).0, BinaryOp::Pow);
}

#[test]
fn broken_binary() {
    let (arena, id) = single("aaaa\n  +\n  bbbb");
    let (op, _, right) = binary_parts(&arena, id);
    assert_eq!(op, BinaryOp::Add);
    assert_eq!(value(&arena, right), "bbbb");
}

#[test]
fn unary_operators() {
    let (arena, id) = single("- 5");
    assert!(matches!(
        kind(&arena, id),
        NodeKind::Unary {
            op: UnaryOp::Neg,
            ..
        }
    ));
    let (arena, id) = single("!(x == 5)");
    let NodeKind::Unary {
        op: UnaryOp::Not,
        operand,
    } = kind(&arena, id)
    else {
        panic!("expected not");
    };
    assert_eq!(binary_parts(&arena, *operand).0, BinaryOp::Eq);
}

#[test]
fn push_and_trigger() {
    let (arena, id) = single("a -> b -> c");
    let NodeKind::Push { value: inner, .. } = kind(&arena, id) else {
        panic!("expected push");
    };
    assert!(matches!(kind(&arena, *inner), NodeKind::Push { .. }));

    let (arena, id) = single("a | b == c");
    let NodeKind::Trigger { trigger, action } = kind(&arena, id) else {
        panic!("expected trigger");
    };
    assert_eq!(value(&arena, *trigger), "a");
    assert_eq!(binary_parts(&arena, *action).0, BinaryOp::Eq);
}

// Chains

#[test]
fn member_chains() {
    for source in ["a.b.c", "a\n  .b\n  .c"] {
        let (arena, id) = single(source);
        let NodeKind::Combine { dot: true, items } = kind(&arena, id) else {
            panic!("expected member chain in {source:?}");
        };
        assert_eq!(items.len(), 3);
    }
}

#[test]
fn juxtaposition_records_spacing() {
    let (arena, id) = single("a b\"x\"");
    let NodeKind::Combine { dot: false, items } = kind(&arena, id) else {
        panic!("expected juxtaposition");
    };
    let spacing: Vec<bool> = items.iter().map(|c: &Chained| c.space_after).collect();
    assert_eq!(spacing, vec![true, false, false]);
}

// Lists

#[test]
fn blocks() {
    let (arena, id) = single("[a, b, c]");
    let (bracket, items) = list_items(&arena, id);
    assert_eq!(bracket, Bracket::Square);
    assert_eq!(items.len(), 3);

    for (source, expected) in [("{a}", Bracket::Curly), ("<a>", Bracket::Angle)] {
        let (arena, id) = single(source);
        assert_eq!(list_items(&arena, id).0, expected);
    }

    let (arena, id) = single("[]");
    assert!(list_items(&arena, id).1.is_empty());

    let (arena, id) = single("[\n  a,\n  b,\n]");
    assert_eq!(list_items(&arena, id).1.len(), 2);
}

#[test]
fn blank_slots() {
    for source in ["[a,\n\n  b]", "[a,,b]", "[a, , ,b]"] {
        let (arena, id) = single(source);
        let (_, items) = list_items(&arena, id);
        assert_eq!(items.len(), 3, "source {source:?}");
        assert_eq!(kind(&arena, items[1]), &NodeKind::Nil);
    }

    let (arena, id) = single("[,a,]");
    assert_eq!(list_items(&arena, id).1.len(), 1);
}

#[test]
fn parentheses_group_without_nodes() {
    let (arena, id) = single("(a)");
    assert_eq!(value(&arena, id), "a");

    let (arena, id) = single("(a, b)");
    let (bracket, items) = list_items(&arena, id);
    assert_eq!(bracket, Bracket::None);
    assert_eq!(items.len(), 2);
}

#[test]
fn root_is_bracketless_list() {
    let parsed = parse("a:1, b:2").unwrap();
    let (bracket, items) = list_items(&parsed.arena, parsed.root);
    assert_eq!(bracket, Bracket::None);
    assert_eq!(items.len(), 2);

    let parsed = parse("  \n").unwrap();
    assert!(list_items(&parsed.arena, parsed.root).1.is_empty());
}

#[test]
fn spans_cover_source() {
    let source = "k: a + b";
    let parsed = parse(source).unwrap();
    let (_, items) = list_items(&parsed.arena, parsed.root);
    let span = parsed.arena.get(items[0]).unwrap().span;
    assert_eq!((span.start, span.end), (0, 8));
}

// Errors

#[test]
fn unterminated_input() {
    assert_eq!(error_kind("[a"), ParseErrorKind::Unterminated("block"));
    assert_eq!(error_kind("\"abc"), ParseErrorKind::Unterminated("string"));
    assert_eq!(error_kind("`abc"), ParseErrorKind::Unterminated("comment"));
    assert_eq!(error_kind("'abc"), ParseErrorKind::Unterminated("inline code"));
}

#[test]
fn unexpected_input() {
    assert_eq!(error_kind("a b]"), ParseErrorKind::UnexpectedChar(']'));
    assert_eq!(error_kind("a, $"), ParseErrorKind::UnexpectedChar('$'));
    assert_eq!(error_kind("k:a+"), ParseErrorKind::UnexpectedEnd);
    assert_eq!(
        error_kind("[a; b]"),
        ParseErrorKind::Expected("`,` between items")
    );
    assert_eq!(error_kind("(a]"), ParseErrorKind::Expected("`)`"));
}

#[test]
fn error_position() {
    let source = "a,\n  )";
    let err = parse(source).unwrap_err();
    assert_eq!(err.line_col(source), (2, 3));
    assert_eq!(err.to_string(), "unexpected character `)`");
}
