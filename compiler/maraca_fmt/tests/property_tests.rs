//! Property-based tests for the Maraca formatter.
//!
//! Generated sources and documents check that:
//! 1. Idempotence: format(parse(format(tree))) == format(tree)
//! 2. Literal round-trip: any text value survives format then parse
//! 3. Structure: re-parsing the output yields an equivalent tree
//! 4. Width respect: nested word lists never print past the width
//! 5. Break monotonicity: a narrower width never breaks fewer groups
//! 6. Fill greediness: word wrap uses the greedy line count

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use maraca_fmt::doc::{fill, line, token};
use maraca_fmt::{compile, format_tree, render, FormatConfig, Printer};
use maraca_ir::{structurally_equal, NodeArena, NodeKind};
use proptest::prelude::*;

// -- Code Generation Strategies --

fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9]{0,5}").expect("valid regex")
}

fn leaf_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        word_strategy(),
        (0u32..10_000).prop_map(|n| n.to_string()),
        Just("?".to_string()),
        Just("~".to_string()),
        Just("_".to_string()),
        Just("#std".to_string()),
        prop::string::string_regex("[a-z ]{0,20}")
            .expect("valid regex")
            .prop_map(|s| format!("\"{}\"", s)),
    ]
}

/// Sources in canonical syntax, with operands parenthesised where it matters.
fn expr_strategy() -> impl Strategy<Value = String> {
    leaf_strategy().prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5)
                .prop_map(|items| format!("[{}]", items.join(", "))),
            prop::collection::vec(inner.clone(), 1..4)
                .prop_map(|items| format!("{{{}}}", items.join(", "))),
            (inner.clone(), inner.clone()).prop_map(|(k, v)| format!("({}):{}", k, v)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({}) + ({})", a, b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({}) * ({})", a, b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({}) -> ({})", a, b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({}) | ({})", a, b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({})=>({})", a, b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({}) ({})", a, b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({})({})", a, b)),
            inner.clone().prop_map(|a| format!("!({})", a)),
        ]
    })
}

fn program_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(expr_strategy(), 1..6).prop_map(|items| items.join(", "))
}

/// Nested lists of short words.
fn word_list_strategy() -> impl Strategy<Value = String> {
    word_strategy().prop_recursive(3, 40, 6, |inner| {
        prop::collection::vec(inner, 0..7).prop_map(|items| format!("[{}]", items.join(", ")))
    })
}

/// Text mixing plain characters with everything quoting has to handle.
fn literal_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => prop::sample::select(vec!['a', 'b', 'Z', '1', 'é']),
            3 => Just(' '),
            1 => Just('\n'),
            1 => Just('\t'),
            1 => prop::sample::select(vec!['<', '>', '"', '\\', '{', '[', ']', '`', '-', '_']),
        ],
        0..40,
    )
    .prop_map(String::from_iter)
}

fn format_source(source: &str, width: usize) -> String {
    let parsed = maraca_parse::parse(source)
        .unwrap_or_else(|e| panic!("failed to parse {:?}: {}", source, e));
    format_tree(
        &parsed.arena,
        parsed.root,
        &FormatConfig::with_print_width(width),
    )
    .unwrap()
}

fn broken_groups(source: &str, width: usize) -> usize {
    let parsed = maraca_parse::parse(source).unwrap();
    let config = FormatConfig::with_print_width(width);
    let doc = compile(&parsed.arena, parsed.root, &config).unwrap();
    let mut printer = Printer::new(width, config.tab_width);
    printer.print(&doc);
    printer.broken_groups()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn formatting_is_idempotent(source in program_strategy(), width in 10usize..100) {
        let first = format_source(&source, width);
        let second = format_source(&first, width);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn literals_round_trip(text in literal_strategy(), width in 5usize..60) {
        let mut arena = NodeArena::new();
        let id = arena.value(text.clone());
        let formatted = format_tree(&arena, id, &FormatConfig::with_print_width(width)).unwrap();

        let parsed = maraca_parse::parse(&formatted)
            .unwrap_or_else(|e| panic!("failed to parse {:?}: {}", formatted, e));
        let Some(NodeKind::List { items, .. }) = parsed.arena.kind(parsed.root) else {
            panic!("root is not a list");
        };
        prop_assert_eq!(items.len(), 1);
        prop_assert_eq!(
            parsed.arena.kind(items[0]),
            Some(&NodeKind::Value(text))
        );
    }

    #[test]
    fn formatting_preserves_structure(source in program_strategy(), width in 10usize..100) {
        let original = maraca_parse::parse(&source).unwrap();
        let formatted = format_source(&source, width);
        let reparsed = maraca_parse::parse(&formatted)
            .unwrap_or_else(|e| panic!("failed to parse {:?}: {}", formatted, e));
        prop_assert!(
            structurally_equal(&original.arena, original.root, &reparsed.arena, reparsed.root),
            "{:?} reformatted as {:?}",
            source,
            formatted
        );
    }

    #[test]
    fn lines_respect_width(source in word_list_strategy(), width in 24usize..100) {
        let formatted = format_source(&source, width);
        for line in formatted.lines() {
            prop_assert!(
                line.chars().count() <= width,
                "line {:?} exceeds {}",
                line,
                width
            );
        }
    }

    #[test]
    fn narrower_never_breaks_less(source in word_list_strategy(), width in 2usize..100, shrink in 1usize..40) {
        let narrow = width.saturating_sub(shrink).max(1);
        prop_assert!(broken_groups(&source, narrow) >= broken_groups(&source, width));
    }

    #[test]
    fn fill_wraps_greedily(n in 1usize..60, width in 1usize..40) {
        let mut parts = Vec::with_capacity(2 * n);
        for i in 0..n {
            if i > 0 {
                parts.push(line());
            }
            parts.push(token("x"));
        }
        let output = render(&fill(parts), width, 2);

        let per_line = (width + 1) / 2;
        let expected = n.div_ceil(per_line);
        prop_assert_eq!(output.lines().count(), expected);
    }
}
