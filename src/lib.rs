//! # termpose
//!
//! A reader, writer and schema library for termpose, an indentation-based
//! notation for trees.
//!
//! ## What is termpose?
//!
//! Termpose text maps onto a single, simple tree type, [`Term`]: an ordered node
//! with an optional tag, and either an optional text value or a list of
//! children. Types come from schemas, not from the text.
//!
//! ```text
//! products
//!     hammer cost:5 description"
//!         premium hammer. great for smashing
//!     twine cost:0 description"
//!         make a text adventure
//! ```
//!
//! ## Key Features
//!
//! - **Lossless trees**: `parse(print(t)) == t` for every parsed tree
//! - **Bidirectional schemas**: every translator decodes (`check`) and encodes
//!   (`termify`), and the two always agree
//! - **Precise errors**: syntax errors carry line and column; schema errors
//!   carry the path to the failing node and its source position
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ### Reading and writing trees
//!
//! ```rust
//! use termpose::{parse, print, Term};
//!
//! let t = parse("hammer cost:5").unwrap();
//! assert_eq!(t.children()[0], Term::leaf("hammer"));
//! assert_eq!(print(&t), "hammer cost:5");
//! ```
//!
//! ### Schemas
//!
//! Translators compose into a schema for your own types, with no derives and
//! no trait impls on the types themselves:
//!
//! ```rust
//! use termpose::{
//!     combine_trans, ensure_tag, float_trans, from_str_with, string_trans, tagged_sequence,
//!     Trans,
//! };
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Product {
//!     name: String,
//!     cost: f64,
//!     description: String,
//! }
//!
//! let schema = tagged_sequence(
//!     "products",
//!     combine_trans(
//!         |(name, cost, description)| Product { name, cost, description },
//!         |p: &Product| (p.name.clone(), p.cost, p.description.clone()),
//!         (
//!             string_trans(),
//!             ensure_tag("cost", float_trans()),
//!             ensure_tag("description", string_trans()),
//!         ),
//!     ),
//! );
//!
//! let text = "products\n\
//!             \thammer cost:5 description\"\n\
//!             \t\tpremium hammer. great for smashing\n\
//!             \ttwine cost:0 description\"\n\
//!             \t\tmake a text adventure";
//!
//! let products = from_str_with(text, &schema).unwrap();
//! assert_eq!(products.len(), 2);
//! assert_eq!(products[0].cost, 5.0);
//! assert_eq!(products[1].description, "make a text adventure");
//!
//! // And back again
//! let round = from_str_with(&termpose::to_string_with(&products, &schema), &schema).unwrap();
//! assert_eq!(round, products);
//! ```
//!
//! ### Default translations
//!
//! Common types have a canonical form through [`ToTerm`] and [`FromTerm`]:
//!
//! ```rust
//! use termpose::{from_str, to_string};
//!
//! let text = to_string(&vec![1.5f64, 2.0]);
//! assert_eq!(text, "1.5 2");
//! let back: Vec<f64> = from_str(&text).unwrap();
//! assert_eq!(back, vec![1.5, 2.0]);
//! ```
//!
//! ## Concurrency
//!
//! Parsing, printing and checking are pure functions over immutable data.
//! Terms and translators can be shared between threads freely.
//!
//! ## Format Specification
//!
//! See the [`format`] module for the full grammar.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`products.rs`** - The product catalogue, end to end
//! - **`building_terms.rs`** - Trees by hand and with the `term!` macro
//! - **`custom_options.rs`** - Indentation and string block settings
//! - **`maps_and_pairs.rs`** - Maps, pairs, optional fields and default translations
//!
//! Run any example with: `cargo run --example <name>`

pub mod combine;
pub mod convert;
pub mod error;
pub mod field;
pub mod format;
pub mod leaf;
pub mod macros;
pub mod options;
pub mod parser;
pub mod printer;
pub mod sequence;
pub mod term;
pub mod trans;

pub use combine::{combine_trans, pair_trans, CombineTrans, FieldSet, PairTrans};
pub use convert::{default_trans, DefaultTrans, FromTerm, ToTerm};
pub use error::{CheckError, CheckErrorKind, Error, Result, Segment, SyntaxError, SyntaxErrorKind};
pub use field::{ensure_tag, optional_tag, DuplicatePolicy, EnsureTag, OptionalTag};
pub use leaf::{
    bigint_trans, bool_trans, datetime_trans, float_trans, int_trans, isize_trans, number_trans,
    string_trans, usize_trans, BigIntTrans, BoolTrans, DateTimeTrans, NumberTrans, StringTrans,
};
pub use options::{Indent, ParseOptions, PrintOptions};
pub use parser::{parse_with_options, Parser};
pub use printer::{print_with_options, Printer};
pub use sequence::{
    map_trans, sequence, tagged_map_trans, tagged_sequence, MapTrans, Sequence, TaggedMapTrans,
    TaggedSequence,
};
pub use term::{Position, Term};
pub use trans::Trans;

/// Parses termpose text into a tree, with default options.
///
/// Either the whole document parses or an error is returned; there is no
/// partial result.
///
/// # Examples
///
/// ```rust
/// use termpose::{parse, Term};
///
/// let t = parse("cost:5").unwrap();
/// assert_eq!(t, Term::tagged_value("cost", "5"));
/// ```
///
/// # Errors
///
/// Returns a [`SyntaxError`] with the line and column of the first problem.
pub fn parse(text: &str) -> std::result::Result<Term, SyntaxError> {
    parse_with_options(text, &ParseOptions::default())
}

/// Renders a tree in canonical form, indented with tabs.
///
/// # Examples
///
/// ```rust
/// use termpose::{print, Term};
///
/// let t = Term::tagged("products", vec![Term::leaf("hammer"), Term::leaf("twine")]);
/// assert_eq!(print(&t), "products\n\thammer\n\ttwine");
/// ```
#[must_use]
pub fn print(term: &Term) -> String {
    print_with_options(term, &PrintOptions::default())
}

/// Parses `text` and checks it against `schema`.
///
/// # Errors
///
/// Returns [`Error::Syntax`] if the text does not parse, or [`Error::Check`] if
/// the tree does not match the schema.
pub fn from_str_with<T, X>(text: &str, schema: &X) -> Result<T>
where
    X: Trans<T> + ?Sized,
{
    let term = parse(text)?;
    Ok(schema.check(&term)?)
}

/// Termifies `value` with `schema` and prints the result.
#[must_use]
pub fn to_string_with<T, X>(value: &T, schema: &X) -> String
where
    X: Trans<T> + ?Sized,
{
    print(&schema.termify(value))
}

/// Parses `text` into a `T` using its default translation.
///
/// # Examples
///
/// ```rust
/// use termpose::from_str;
///
/// let v: Vec<u32> = from_str("1 2 3").unwrap();
/// assert_eq!(v, vec![1, 2, 3]);
/// ```
///
/// # Errors
///
/// Returns an error if the text does not parse or does not fit `T`.
pub fn from_str<T: FromTerm>(text: &str) -> Result<T> {
    let term = parse(text)?;
    Ok(T::from_term(&term)?)
}

/// Prints `value` using its default translation.
#[must_use]
pub fn to_string<T: ToTerm + ?Sized>(value: &T) -> String {
    print(&value.to_term())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let err = from_str::<Vec<i64>>("1 (2").unwrap_err();
        assert!(matches!(err, Error::Syntax(_)));

        let err = from_str::<Vec<i64>>("1 two").unwrap_err();
        match err {
            Error::Check(e) => assert_eq!(e.index(), Some(1)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_schema_helpers() {
        let schema = tagged_sequence("n", int_trans());
        let text = to_string_with(&vec![3, 1, 2], &schema);
        assert_eq!(text, "n\n\t3\n\t1\n\t2");
        assert_eq!(from_str_with(&text, &schema).unwrap(), vec![3, 1, 2]);
    }

    #[test]
    fn test_trees_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Term>();
        assert_send_sync::<TaggedSequence<EnsureTag<NumberTrans<f64>>>>();
        assert_send_sync::<DefaultTrans<Vec<String>>>();
    }
}
