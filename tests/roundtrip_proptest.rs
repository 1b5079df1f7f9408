//! Property tests over generated canonical documents
//!
//! Any tree the parser can produce must survive both renderers: rebuilding and
//! reparsing gives the same tree, and so does a trip through JSON. Blank lines
//! anywhere in the text and long chains of nested blocks must not change that.

use choco_instances::choco::formats::rebuild_with_indent;
use choco_instances::choco::lexer::MAX_NESTING_DEPTH;
use choco_instances::choco::roundtrip::verify;
use choco_instances::{
    from_json, parse_document, rebuild, to_json, Document, Element, Instance, Value, ValueType,
};
use proptest::prelude::*;

fn identifier() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,8}"
}

fn named_type() -> impl Strategy<Value = ValueType> {
    identifier()
        .prop_filter("reserved type word", |name| {
            !matches!(name.as_str(), "int" | "real" | "double" | "string")
        })
        .prop_map(ValueType::Named)
}

fn text_lexeme() -> impl Strategy<Value = String> {
    prop_oneof![
        identifier(),
        "[0-9]{1,6}",
        "[+-][0-9]{1,6}",
        "\"[a-z ]{0,8}\"",
    ]
}

fn typed_value() -> impl Strategy<Value = (ValueType, Value)> {
    let text_type = prop_oneof![
        Just(ValueType::Real),
        Just(ValueType::Double),
        Just(ValueType::String),
        named_type(),
    ];
    prop_oneof![
        any::<i64>().prop_map(|n| (ValueType::Int, Value::Int(n))),
        (text_type, text_lexeme()).prop_map(|(value_type, text)| (value_type, Value::Text(text))),
    ]
}

fn clafer_line() -> impl Strategy<Value = Element> {
    (
        identifier(),
        prop::option::of(0u64..1000),
        prop::option::of(identifier()),
        prop::option::of(typed_value()),
    )
        .prop_map(|(name, index, supertype, typed)| {
            let mut element = Element::new(name);
            element.index = index;
            element.supertype = supertype;
            if let Some((value_type, value)) = typed {
                element = element.with_value(value_type, value);
            }
            element
        })
}

fn element() -> impl Strategy<Value = Element> {
    clafer_line().prop_recursive(3, 24, 3, |inner| {
        (clafer_line(), prop::collection::vec(inner, 1..3))
            .prop_map(|(line, children)| line.with_children(children))
    })
}

fn document() -> impl Strategy<Value = Document> {
    prop::collection::vec((0u64..10_000, prop::collection::vec(element(), 1..4)), 0..4).prop_map(
        |instances| {
            Document::new(
                instances
                    .into_iter()
                    .map(|(id, elements)| Instance::new(id, elements))
                    .collect(),
            )
        },
    )
}

/// A single chain of nested elements, 99 to `MAX_NESTING_DEPTH` blocks deep
fn chain() -> impl Strategy<Value = Element> {
    prop::collection::vec(clafer_line(), 100..=MAX_NESTING_DEPTH + 1).prop_map(|lines| {
        lines
            .into_iter()
            .rev()
            .reduce(|child, parent| parent.with_children(vec![child]))
            .unwrap_or_else(|| Element::new("Root"))
    })
}

/// Drop the rebuild's blank lines and put `gaps[i]` blank lines before line `i`
fn reflow_blank_lines(text: &str, gaps: &[usize]) -> String {
    let mut out = String::new();
    for (i, line) in text.lines().filter(|line| !line.trim().is_empty()).enumerate() {
        for blank in 0..gaps[i % gaps.len()] {
            out.push_str(if blank % 2 == 0 { "\n" } else { "  \t\n" });
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

proptest! {
    #[test]
    fn rebuild_then_parse_is_identity(doc in document()) {
        let text = rebuild(&doc).unwrap();
        prop_assert_eq!(parse_document(&text).unwrap(), doc);
    }

    #[test]
    fn rebuilt_text_verifies_lossless(doc in document()) {
        let text = rebuild(&doc).unwrap();
        let report = verify(&text).unwrap();
        prop_assert!(report.is_lossless(), "{}", report.diff());
    }

    #[test]
    fn nesting_width_does_not_change_the_tree(doc in document(), width in 1usize..6) {
        let text = rebuild_with_indent(&doc, width).unwrap();
        prop_assert_eq!(parse_document(&text).unwrap(), doc);
    }

    #[test]
    fn json_round_trip_is_identity(doc in document(), indent in 0usize..6) {
        let json = to_json(&doc, indent).unwrap();
        prop_assert_eq!(from_json(&json).unwrap(), doc);
    }

    #[test]
    fn blank_line_placement_is_irrelevant(
        doc in document(),
        gaps in prop::collection::vec(0usize..3, 1..16),
    ) {
        let text = reflow_blank_lines(&rebuild(&doc).unwrap(), &gaps);
        prop_assert_eq!(&parse_document(&text).unwrap(), &doc);
        let report = verify(&text).unwrap();
        prop_assert!(report.is_lossless(), "{}", report.diff());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn deep_chains_survive_both_renderers(root in chain(), id in 0u64..100) {
        let doc = Document::new(vec![Instance::new(id, vec![root])]);
        let text = rebuild(&doc).unwrap();
        prop_assert_eq!(&parse_document(&text).unwrap(), &doc);
        prop_assert!(verify(&text).unwrap().is_lossless());
        prop_assert_eq!(&from_json(&to_json(&doc, 2).unwrap()).unwrap(), &doc);
    }
}
