//! Maps, pairs, optional fields and default translations.
//!
//! Run with: cargo run --example maps_and_pairs

use indexmap::IndexMap;
use std::error::Error;
use termpose::{
    combine_trans, datetime_trans, default_trans, ensure_tag, from_str, from_str_with, int_trans,
    optional_tag, pair_trans, parse, sequence, string_trans, tagged_map_trans, to_string,
    to_string_with, Trans,
};

#[derive(Debug, Clone)]
struct Shipment {
    id: String,
    sent: chrono::DateTime<chrono::Utc>,
    carrier: Option<String>,
    lines: Vec<(String, i64)>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Stock levels keyed by product, in document order
    let stock = tagged_map_trans("stock", int_trans());
    let levels = from_str_with("stock\n\thammer:3\n\ttwine:40\n\tanvil:1", &stock)?;
    for (name, count) in &levels {
        println!("{:<8} {}", name, count);
    }

    // A record mixing positional, required, optional and nested fields
    let shipment = combine_trans(
        |(id, sent, carrier, lines)| Shipment {
            id,
            sent,
            carrier,
            lines,
        },
        |s: &Shipment| (s.id.clone(), s.sent, s.carrier.clone(), s.lines.clone()),
        (
            string_trans(),
            ensure_tag("sent", datetime_trans()),
            optional_tag("carrier", string_trans()),
            ensure_tag("lines", sequence(pair_trans(string_trans(), int_trans()))),
        ),
    );

    let text = "s-104 sent:\"2024-03-01T09:00:00Z\" lines:\n\thammer 2\n\ttwine 10";
    let s = shipment.check(&parse(text)?)?;
    println!("\n{:?}", s);
    println!("{}", to_string_with(&s, &shipment));

    // Types with a default translation need no schema at all
    let mut prices: IndexMap<String, f64> = IndexMap::new();
    prices.insert("hammer".to_string(), 5.0);
    prices.insert("bee's knee".to_string(), 9.5);
    let written = to_string(&prices);
    println!("\n{}", written);
    let back: IndexMap<String, f64> = from_str(&written)?;
    assert_eq!(back, prices);

    let tags = ensure_tag("tags", default_trans::<Vec<String>>());
    println!("{:?}", tags.check(&parse("hammer tags:(tool steel)")?)?);

    Ok(())
}
