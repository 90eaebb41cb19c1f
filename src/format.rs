//! The termpose text format
//!
//! This module documents the format as read by [`parse`](crate::parse) and
//! written by [`print`](crate::print). It contains no code.
//!
//! # Overview
//!
//! Termpose is an indentation-based notation for trees. Every document maps to
//! one [`Term`](crate::Term): a node with an optional tag, and either an
//! optional text value (a leaf) or an ordered list of children. There are no
//! types in the text; numbers, booleans and dates are just leaves that a
//! schema interprets.
//!
//! ```text
//! products
//!     hammer cost:5 description"
//!         premium hammer. great for smashing
//!     "bee's knee" cost:9.50 description"
//!         supposedly really good thing
//! ```
//!
//! # Lines
//!
//! Each non-blank line is a node. Its tokens, separated by whitespace, are the
//! node's children, so `hammer cost:5` is an untagged node with two children.
//! A line holding a single token is just that token.
//!
//! A line followed by deeper-indented lines gains those lines as children:
//!
//! | Line | Indented block | Result |
//! |------|----------------|--------|
//! | `word` | none | leaf `word` |
//! | `word` | lines | node tagged `word`, children are the lines |
//! | `a b` | none | untagged node `(a b)` |
//! | `a b` | lines | untagged node `a`, `b`, then the lines |
//! | `a tag:` | lines | untagged node `a`, `tag` (the lines go under `tag`) |
//! | `:` | lines | untagged node of the lines |
//!
//! A document with one top-level line is that line's node. Several top-level
//! lines form an untagged node. An empty document is the empty node `()`.
//!
//! ## Indentation
//!
//! Either tabs or spaces may be used, but not both: the first indented line
//! decides. Siblings must share one width, and a dedent must return to a
//! width that is already open.
//!
//! ```rust
//! use termpose::{parse, SyntaxErrorKind};
//!
//! let err = parse("a\n\tb\n    c").unwrap_err();
//! assert_eq!(err.kind, SyntaxErrorKind::BadIndentation);
//! ```
//!
//! # Tokens
//!
//! | Token | Meaning |
//! |-------|---------|
//! | `word` | leaf |
//! | `"some text"` | leaf, with escapes `\\ \" \n \r \t \b \f \0 \uXXXX` |
//! | `(a b c)` | untagged node; `()` is the empty node |
//! | `tag:value` | node tagged `tag` with one child, which is itself a token |
//! | `tag:` | node tagged `tag` with no children, or with the following block |
//! | `:` | untagged node holding the following block |
//!
//! Bare words may contain anything except whitespace, `"`, `:`, `(` and `)`.
//! Quote anything else, including the empty string.
//!
//! ```rust
//! use termpose::{parse, Term};
//!
//! let t = parse("point:(1 2)").unwrap();
//! assert_eq!(
//!     t,
//!     Term::tagged("point", vec![Term::list(vec![Term::leaf("1"), Term::leaf("2")])])
//! );
//! ```
//!
//! # String blocks
//!
//! A `"` ending a line starts a raw string. Every following line indented
//! deeper than the opener belongs to it, taken verbatim with the common
//! indentation removed. Inside the block nothing is tokenized.
//!
//! - `tag"` (or `tag:"`) produces a node tagged `tag` holding the string
//! - a lone `"` produces the string itself
//!
//! ```rust
//! use termpose::{parse, Term};
//!
//! let t = parse("note\"\n\tfirst line\n\t  second: \"quoted\"").unwrap();
//! assert_eq!(
//!     t,
//!     Term::tagged_value("note", "first line\n  second: \"quoted\"")
//! );
//! ```
//!
//! # Printing
//!
//! The printer always produces the same text for the same tree, and that text
//! parses back to an equal tree. It prefers the shortest form:
//!
//! - `tag:child` when a tagged node has one inline child
//! - one line of tokens when every child fits inline
//! - a raw string block for multi-line text at the end of a line
//! - an indented block otherwise
//!
//! Source formatting such as indentation width or redundant quotes is not
//! preserved.
//!
//! ```rust
//! use termpose::{parse, print};
//!
//! let t = parse("products\n  \"hammer\"   cost:5").unwrap();
//! assert_eq!(print(&t), "products\n\thammer cost:5");
//! ```
