//! Property-based tests for the two round-trip guarantees:
//!
//! - printing any parser-producible tree and parsing it back gives the same tree
//! - checking the termified form of any schema value gives the same value

use proptest::prelude::*;
use termpose::{
    combine_trans, ensure_tag, float_trans, from_str_with, int_trans, map_trans, optional_tag,
    parse, print, print_with_options, string_trans, tagged_sequence, to_string_with,
    PrintOptions, Term, Trans,
};

/// Text for a leaf: mostly plain words, sometimes anything at all.
fn leaf_text() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-z][a-z0-9_.'-]{0,8}",
        1 => any::<String>(),
        1 => "[a-z ]{1,12}(\n[a-z ]{1,12}){1,3}",
    ]
}

fn tag_text() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-z]{1,8}",
        1 => any::<String>(),
    ]
}

/// Trees the parser can produce. The parser never builds a node carrying both
/// a tag and a value, so neither does this.
fn arb_term() -> impl Strategy<Value = Term> {
    let leaf = leaf_text().prop_map(Term::leaf);
    leaf.prop_recursive(5, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Term::list),
            (tag_text(), prop::collection::vec(inner, 0..6))
                .prop_map(|(tag, children)| Term::tagged(tag, children)),
        ]
    })
}

fn roundtrip(t: &Term, options: &PrintOptions) -> std::result::Result<(), TestCaseError> {
    let text = print_with_options(t, options);
    match parse(&text) {
        Ok(back) => {
            prop_assert_eq!(&back, t, "printed:\n{}", text);
            Ok(())
        }
        Err(e) => Err(TestCaseError::fail(format!("{}\nprinted:\n{}", e, text))),
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Product {
    name: String,
    cost: f64,
    stock: i64,
    note: Option<String>,
}

fn arb_product() -> impl Strategy<Value = Product> {
    (
        leaf_text(),
        any::<f64>().prop_filter("finite", |x| x.is_finite()),
        any::<i64>(),
        proptest::option::of(leaf_text()),
    )
        .prop_map(|(name, cost, stock, note)| Product {
            name,
            cost,
            stock,
            note,
        })
}

fn products() -> impl Trans<Vec<Product>> {
    tagged_sequence(
        "products",
        combine_trans(
            |(name, cost, stock, note)| Product {
                name,
                cost,
                stock,
                note,
            },
            |p: &Product| (p.name.clone(), p.cost, p.stock, p.note.clone()),
            (
                string_trans(),
                ensure_tag("cost", float_trans()),
                ensure_tag("stock", int_trans()),
                optional_tag("note", string_trans()),
            ),
        ),
    )
}

proptest! {
    #[test]
    fn prop_print_parse_roundtrip(t in arb_term()) {
        roundtrip(&t, &PrintOptions::default())?;
    }

    #[test]
    fn prop_roundtrip_with_spaces_and_no_blocks(t in arb_term(), n in 1usize..5) {
        roundtrip(&t, &PrintOptions::new().with_spaces(n).with_string_blocks(false))?;
    }

    #[test]
    fn prop_print_is_deterministic(t in arb_term()) {
        let once = print(&t);
        let reparsed = parse(&once).unwrap();
        prop_assert_eq!(print(&reparsed), once);
    }

    #[test]
    fn prop_products_check_termify(items in prop::collection::vec(arb_product(), 0..8)) {
        let schema = products();
        prop_assert_eq!(schema.check(&schema.termify(&items)).unwrap(), items);
    }

    #[test]
    fn prop_products_through_text(items in prop::collection::vec(arb_product(), 0..8)) {
        let schema = products();
        let text = to_string_with(&items, &schema);
        prop_assert_eq!(from_str_with(&text, &schema).unwrap(), items);
    }

    #[test]
    fn prop_fail_fast_index(len in 1usize..10, bad in 0usize..10) {
        let bad = bad % len;
        let mut doc = String::from("n");
        for i in 0..len {
            if i == bad {
                doc.push_str("\n\toops");
            } else {
                doc.push_str(&format!("\n\t{}", i));
            }
        }
        let err = tagged_sequence("n", int_trans()).check(&parse(&doc).unwrap()).unwrap_err();
        prop_assert_eq!(err.index(), Some(bad));
    }

    #[test]
    fn prop_map_keeps_order(keys in prop::collection::vec("[a-z]{1,6}", 0..10)) {
        let doc: Vec<String> = keys.iter().enumerate().map(|(i, k)| format!("{}:{}", k, i)).collect();
        let map = map_trans(int_trans()).check(&parse(&format!("({})", doc.join(" "))).unwrap()).unwrap();
        let mut expected: Vec<&String> = Vec::new();
        for k in &keys {
            if !expected.contains(&k) {
                expected.push(k);
            }
        }
        prop_assert_eq!(map.keys().collect::<Vec<_>>(), expected);
    }
}
