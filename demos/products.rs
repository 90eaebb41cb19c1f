//! The product catalogue, from text to typed values and back.
//!
//! Run with: cargo run --example products

use std::error::Error;
use termpose::{
    combine_trans, ensure_tag, float_trans, from_str_with, string_trans, tagged_sequence,
    to_string_with, Trans,
};

#[derive(Debug, Clone, PartialEq)]
struct Product {
    name: String,
    cost: f64,
    description: String,
}

const CATALOGUE: &str = "products
\thammer cost:5 description\"
\t\tpremium hammer. great for smashing
\t\"bee's knee\" cost:9.50 description\"
\t\tsupposedly really good thing
\ttwine cost:0 description\"
\t\tmake a text adventure
";

fn main() -> Result<(), Box<dyn Error>> {
    let schema = tagged_sequence(
        "products",
        combine_trans(
            |(name, cost, description)| Product {
                name,
                cost,
                description,
            },
            |p: &Product| (p.name.clone(), p.cost, p.description.clone()),
            (
                string_trans(),
                ensure_tag("cost", float_trans()),
                ensure_tag("description", string_trans()),
            ),
        ),
    );

    let mut products = from_str_with(CATALOGUE, &schema)?;
    for p in &products {
        println!("{:<12} {:>6.2}  {}", p.name, p.cost, p.description);
    }

    products.push(Product {
        name: "anvil".to_string(),
        cost: 120.0,
        description: "heavy.\ndo not drop".to_string(),
    });

    println!("\nWritten back:");
    println!("{}", to_string_with(&products, &schema));

    // Errors point at the failing product and field
    let broken = "products\n\thammer cost:five description:x";
    if let Err(e) = from_str_with(broken, &schema) {
        println!("\nError: {}", e);
    }

    // The tree is available too
    let term = schema.termify(&products);
    println!("\n{} products, {} nodes", term.children().len(), term.node_count());

    Ok(())
}
