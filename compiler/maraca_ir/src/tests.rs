use pretty_assertions::assert_eq;

use super::*;

#[test]
fn node_id_sentinel_is_invalid() {
    assert!(!NodeId::INVALID.is_valid());
    assert!(NodeId::new(0).is_valid());
    assert_eq!(NodeId::default(), NodeId::INVALID);
    assert_eq!(format!("{}", NodeId::new(7)), "#7");
    assert_eq!(format!("{:?}", NodeId::INVALID), "NodeId::INVALID");
}

#[test]
fn span_merge_and_len() {
    let a = Span::new(4, 9);
    let b = Span::new(2, 6);
    assert_eq!(a.merge(b), Span::new(2, 9));
    assert_eq!(a.len(), 5);
    assert!(Span::DUMMY.is_empty());
    assert_eq!(Span::from_range(3..8), Span::new(3, 8));
}

#[test]
fn span_line_col_counts_chars() {
    let source = "ab\ncé d";
    // 'd' sits after a two-byte character.
    let offset = source.find('d').unwrap_or(0);
    let span = Span::from_range(offset..offset + 1);
    assert_eq!(span.line_col(source), (2, 4));
    assert_eq!(Span::new(0, 0).line_col(source), (1, 1));
}

#[test]
fn operator_levels_are_ordered() {
    assert!(Level::Sequence < Level::Item);
    assert!(Level::Item < Level::Push);
    assert!(Level::Equality < Level::Additive);
    assert!(Level::Dot < Level::Atom);
    assert_eq!(Level::Atom.tighter(), Level::Atom);
    assert_eq!(BinaryOp::Mod.level(), Level::Multiplicative);
    assert!(BinaryOp::Pow.is_right_assoc());
    assert!(!BinaryOp::Sub.is_right_assoc());
    assert!(UnaryOp::Neg.spaced());
    assert!(!UnaryOp::Not.spaced());
}

#[test]
fn bracket_table() {
    assert_eq!(Bracket::Curly.pair(), Some(("{", "}")));
    assert_eq!(Bracket::from_open('<'), Some(Bracket::Angle));
    assert_eq!(Bracket::Square.closer(), Some(']'));
    assert_eq!(Bracket::None.pair(), None);
    assert_eq!(Bracket::from_open('('), None);
}

#[test]
fn arena_alloc_and_lookup() {
    let mut arena = NodeArena::new();
    let a = arena.value("a");
    let b = arena.value("b");
    let list = arena.list(Bracket::Square, vec![a, b]);
    assert_eq!(arena.len(), 3);
    assert_eq!(arena.kind(a), Some(&NodeKind::Value("a".into())));
    assert_eq!(
        arena.kind(list),
        Some(&NodeKind::List {
            bracket: Bracket::Square,
            items: vec![a, b],
        })
    );
    assert!(arena.get(NodeId::new(99)).is_none());

    arena.truncate(1);
    assert_eq!(arena.len(), 1);
    assert!(arena.kind(b).is_none());
}

#[test]
fn levels_follow_node_kind() {
    let mut arena = NodeArena::new();
    let a = arena.value("a");
    let b = arena.value("b");
    let sum = arena.alloc(NodeKind::Binary {
        op: BinaryOp::Add,
        left: a,
        right: b,
    });
    let assign = arena.assign(Some(a), Some(b));
    let chain = arena.dot_chain(&[a, b]);
    let juxt = arena.spaced_chain(&[a, b]);
    let single = arena.list(Bracket::None, vec![sum]);
    let many = arena.list(Bracket::None, vec![a, b]);
    let block = arena.list(Bracket::Curly, vec![a, b]);

    assert_eq!(arena.level(a), Level::Atom);
    assert_eq!(arena.level(sum), Level::Additive);
    assert_eq!(arena.level(assign), Level::Item);
    assert_eq!(arena.level(chain), Level::Dot);
    assert_eq!(arena.level(juxt), Level::Juxtapose);
    assert_eq!(arena.level(single), Level::Additive);
    assert_eq!(arena.level(many), Level::Sequence);
    assert_eq!(arena.level(block), Level::Atom);
    assert_eq!(arena.level(NodeId::INVALID), Level::Atom);
}

#[test]
fn template_detection() {
    let mut arena = NodeArena::new();
    let open = arena.alloc(NodeKind::Part {
        text: "hi ".into(),
        first: true,
        last: false,
    });
    let embed = arena.value("x");
    let close = arena.alloc(NodeKind::Part {
        text: "!".into(),
        first: false,
        last: true,
    });
    assert!(arena.is_template(&[open, embed, close]));
    assert!(!arena.is_template(&[open, embed]));
    assert!(!arena.is_template(&[]));

    let template = arena.list(Bracket::None, vec![open, embed, close]);
    assert_eq!(arena.level(template), Level::Atom);
}

#[test]
fn spaced_chain_clears_last_bit() {
    let mut arena = NodeArena::new();
    let a = arena.value("a");
    let b = arena.value("b");
    let chain = arena.spaced_chain(&[a, b]);
    let Some(NodeKind::Combine { dot, items }) = arena.kind(chain) else {
        panic!("expected combine");
    };
    assert!(!dot);
    assert_eq!(items, &vec![Chained::new(a, true), Chained::new(b, false)]);
}

#[test]
fn structural_equality_ignores_ids_and_spans() {
    let mut left = NodeArena::new();
    let _offset = left.value("unused");
    let a = left.alloc_at(NodeKind::Value("a".into()), Span::new(3, 4));
    let b = left.value("b");
    let l_root = left.list(Bracket::Square, vec![a, b]);

    let mut right = NodeArena::new();
    let a2 = right.value("a");
    let b2 = right.value("b");
    let r_root = right.list(Bracket::Square, vec![a2, b2]);

    assert!(structurally_equal(&left, l_root, &right, r_root));

    let c2 = right.value("c");
    let other = right.list(Bracket::Square, vec![a2, c2]);
    assert!(!structurally_equal(&left, l_root, &right, other));

    let curly = right.list(Bracket::Curly, vec![a2, b2]);
    assert!(!structurally_equal(&left, l_root, &right, curly));
}

#[test]
fn structural_equality_on_optional_slots() {
    let mut left = NodeArena::new();
    let k = left.value("k");
    let keyed = left.assign(Some(k), None);

    let mut right = NodeArena::new();
    let k2 = right.value("k");
    let keyed2 = right.assign(Some(k2), None);
    let unpack = right.assign(None, Some(k2));

    assert!(structurally_equal(&left, keyed, &right, keyed2));
    assert!(!structurally_equal(&left, keyed, &right, unpack));
    assert!(structurally_equal(
        &left,
        NodeId::INVALID,
        &right,
        NodeId::INVALID
    ));
    assert!(!structurally_equal(&left, keyed, &right, NodeId::INVALID));
}
