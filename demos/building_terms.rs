//! Building trees by hand and with the term! macro.
//!
//! Run with: cargo run --example building_terms

use std::error::Error;
use termpose::{parse, print, term, Term};

fn main() -> Result<(), Box<dyn Error>> {
    // Constructors
    let hammer = Term::list(vec![
        Term::leaf("hammer"),
        Term::tagged_value("cost", "5"),
        Term::tagged("sizes", vec![Term::leaf("s"), Term::leaf("m"), Term::leaf("l")]),
    ]);
    println!("By hand:\n{}\n", hammer);

    // The same shape with the macro
    let from_macro = term!(["hammer", { "cost": 5 }, { "sizes": ["s", "m", "l"] }]);
    assert_eq!(hammer, from_macro);

    // Walking a parsed tree
    let doc = parse("inventory\n\thammer cost:5\n\ttwine cost:0 note:\"for parcels\"")?;
    if let Some(tag) = doc.tag() {
        println!("Root tag: {}", tag);
    }
    for item in doc.children() {
        let name = item.children().first().and_then(Term::value).unwrap_or("?");
        let cost = item
            .child_tagged("cost")
            .and_then(|c| c.children().first())
            .and_then(Term::value)
            .unwrap_or("-");
        let at = item
            .position()
            .map(|p| format!("line {}", p.line))
            .unwrap_or_default();
        println!("  {} costs {} ({})", name, cost, at);
    }

    // Printing normalizes whatever style the source used
    let messy = parse("inventory\n  \"hammer\"    cost:5\n  twine cost:(0)")?;
    println!("\nNormalized:\n{}", print(&messy));

    // Trees also serialize with serde
    let json = serde_json::to_string_pretty(&from_macro)?;
    println!("\nAs JSON:\n{}", json);

    Ok(())
}
