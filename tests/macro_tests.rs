use termpose::{parse, print, term, Term};

#[test]
fn test_term_macro_leaves() {
    assert_eq!(term!("hammer"), Term::leaf("hammer"));
    assert_eq!(term!(42), Term::leaf("42"));
    assert_eq!(term!(9.5), Term::leaf("9.5"));
    assert_eq!(term!(true), Term::leaf("true"));
    assert_eq!(term!(""), Term::leaf(""));
}

#[test]
fn test_term_macro_expressions() {
    let name = String::from("bee's knee");
    assert_eq!(term!(name), Term::leaf("bee's knee"));
    assert_eq!(term!((-3)), Term::leaf("-3"));
    assert_eq!(term!((1 + 2)), Term::leaf("3"));
}

#[test]
fn test_term_macro_empty() {
    assert_eq!(term!(()), Term::empty());
    assert_eq!(term!([]), Term::empty());
    assert_eq!(term!({ "flag": [] }), Term::tagged("flag", vec![]));
}

#[test]
fn test_term_macro_nested() {
    let t = term!({ "products": [
        ["hammer", { "cost": 5 }, { "description": "premium hammer" }],
        [{ "tags": ["tool", "steel"] }, "anvil"]
    ]});

    assert_eq!(t.tag(), Some("products"));
    assert_eq!(t.children().len(), 2);
    let hammer = &t.children()[0];
    assert_eq!(hammer.children()[0], Term::leaf("hammer"));
    assert_eq!(
        hammer.child_tagged("cost"),
        Some(&Term::tagged_value("cost", "5"))
    );
    let anvil = &t.children()[1];
    assert_eq!(anvil.child_tagged("tags").unwrap().children().len(), 2);
}

#[test]
fn test_term_macro_matches_parser() {
    let built = term!({ "root": [
        ["hammer", { "cost": 5 }],
        { "pos": [1, 2] },
        ["a", { "pos": [[1, 2]] }]
    ]});
    let text = "root\n\thammer cost:5\n\tpos\n\t\t1\n\t\t2\n\ta pos:(1 2)";
    assert_eq!(built, parse(text).unwrap());
    assert_eq!(print(&built), text);
}
