//! Customizing parsing and printing.
//!
//! Run with: cargo run --example custom_options

use std::error::Error;
use termpose::{parse, parse_with_options, print, print_with_options, ParseOptions, PrintOptions};

fn main() -> Result<(), Box<dyn Error>> {
    let doc = parse(
        "recipe\n\tname:bread\n\tsteps\"\n\t\tmix flour and water\n\t\tknead\n\t\tbake at 220",
    )?;

    // Default: tabs and raw string blocks
    println!("Default:");
    println!("{}\n", print(&doc));

    // Two-space indentation
    println!("Two spaces:");
    println!("{}\n", print_with_options(&doc, &PrintOptions::new().with_spaces(2)));

    // Multi-line strings as quoted escapes
    println!("Without string blocks:");
    let flat = print_with_options(&doc, &PrintOptions::new().with_string_blocks(false));
    println!("{}\n", flat);
    assert_eq!(parse(&flat)?, doc);

    // A tighter nesting limit for untrusted input
    let strict = ParseOptions::new().with_max_depth(8);
    let hostile = format!("{}x{}", "(".repeat(64), ")".repeat(64));
    match parse_with_options(&hostile, &strict) {
        Ok(_) => println!("Parsed deep input"),
        Err(e) => println!("Rejected deep input: {}", e.msg),
    }

    Ok(())
}
