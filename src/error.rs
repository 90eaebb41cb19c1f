//! Error types for termpose parsing and schema checking.
//!
//! There are two families of failure, and a unifying [`Error`] for callers that
//! go straight from text to typed values:
//!
//! - [`SyntaxError`]: the parser rejected the document. Always fatal to the
//!   whole parse; no partial tree is ever returned.
//! - [`CheckError`]: a tree was well-formed but did not match a schema. It
//!   carries the path from the root to the failing node and, when the node
//!   came from the parser, its source position.
//!
//! ## Examples
//!
//! ```rust
//! use termpose::{parse, SyntaxErrorKind};
//!
//! let err = parse("name \"unterminated").unwrap_err();
//! assert_eq!(err.kind, SyntaxErrorKind::UnterminatedQuote);
//! assert_eq!(err.line, 1);
//! ```

use crate::term::{Position, Term};
use std::fmt;
use thiserror::Error;

/// The kinds of syntax error the parser can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum SyntaxErrorKind {
    /// A quoted token was not closed before the end of its line.
    #[error("unterminated quote")]
    UnterminatedQuote,

    /// Mixed tabs and spaces, or a dedent that matches no open level.
    #[error("bad indentation")]
    BadIndentation,

    /// A character or token that the grammar does not allow at this point.
    #[error("unexpected token")]
    UnexpectedToken,

    /// Nesting exceeded [`ParseOptions::max_depth`](crate::ParseOptions::max_depth).
    #[error("nesting too deep")]
    NestingTooDeep,
}

/// A parse failure with its location in the source text.
///
/// `line` and `column` are 1-based. `context` holds the offending source line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Syntax error at line {line}, column {column}: {kind}: {msg}\n{context}")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub line: usize,
    pub column: usize,
    pub msg: String,
    pub context: String,
}

impl SyntaxError {
    /// Creates a syntax error at the given location.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use termpose::{SyntaxError, SyntaxErrorKind};
    ///
    /// let err = SyntaxError::new(SyntaxErrorKind::UnexpectedToken, 3, 7, "stray ')'", "a b)");
    /// assert!(err.to_string().contains("line 3, column 7"));
    /// ```
    pub fn new(kind: SyntaxErrorKind, line: usize, column: usize, msg: &str, context: &str) -> Self {
        SyntaxError {
            kind,
            line,
            column,
            msg: msg.to_string(),
            context: context.to_string(),
        }
    }
}

/// One step on the way from a root term to a nested one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A child by index.
    Index(usize),
    /// A child located by its tag.
    Field(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Index(i) => write!(f, "[{}]", i),
            Segment::Field(name) => write!(f, ".{}", name),
        }
    }
}

/// What went wrong when checking a term against a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckErrorKind {
    #[error("expected tag \"{expected}\", found {}", describe_tag(.found))]
    TagMismatch {
        expected: String,
        found: Option<String>,
    },

    #[error("missing field {0}")]
    MissingField(Segment),

    #[error("field \"{field}\" appears {count} times")]
    AmbiguousField { field: String, count: usize },

    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("cannot read {text:?} as {target}: {reason}")]
    ConversionError {
        target: &'static str,
        text: String,
        reason: String,
    },
}

fn describe_tag(tag: &Option<String>) -> String {
    match tag {
        Some(t) => format!("\"{}\"", t),
        None => "no tag".to_string(),
    }
}

/// A schema failure, localized by path and (when known) source position.
///
/// The path is stored outermost first, so `$[1].cost` means "the `cost` field of
/// the root's second child".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckError {
    pub kind: CheckErrorKind,
    pub path: Vec<Segment>,
    pub position: Option<Position>,
}

impl CheckError {
    /// Creates an error about `term`, picking up its source position if it has one.
    pub fn new(kind: CheckErrorKind, term: &Term) -> Self {
        CheckError {
            kind,
            path: Vec::new(),
            position: term.position(),
        }
    }

    /// Creates an error with no location yet.
    pub fn detached(kind: CheckErrorKind) -> Self {
        CheckError {
            kind,
            path: Vec::new(),
            position: None,
        }
    }

    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use termpose::{CheckError, CheckErrorKind, Term};
    ///
    /// let err = CheckError::type_mismatch(&Term::empty(), "a value", "an empty node");
    /// assert!(matches!(err.kind, CheckErrorKind::TypeMismatch { .. }));
    /// assert!(err.to_string().contains("expected a value"));
    /// ```
    pub fn type_mismatch(term: &Term, expected: &str, found: &str) -> Self {
        CheckError::new(
            CheckErrorKind::TypeMismatch {
                expected: expected.to_string(),
                found: found.to_string(),
            },
            term,
        )
    }

    /// Creates a conversion error for a scalar that could not be read as `target`.
    pub fn conversion<E: fmt::Display>(term: &Term, target: &'static str, text: &str, reason: E) -> Self {
        CheckError::new(
            CheckErrorKind::ConversionError {
                target,
                text: text.to_string(),
                reason: reason.to_string(),
            },
            term,
        )
    }

    /// Prefixes the path with one more segment, as the error travels outwards.
    #[must_use]
    pub fn within(mut self, segment: Segment) -> Self {
        self.path.insert(0, segment);
        self
    }

    /// The index of the outermost child on the path, if the path starts with one.
    ///
    /// Sequence schemas report the failing item here.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self.path.first() {
            Some(Segment::Index(i)) => Some(*i),
            _ => None,
        }
    }

    /// Renders the path as `$`, `$[2]`, `$[2].cost`, ...
    #[must_use]
    pub fn path_string(&self) -> String {
        let mut out = String::from("$");
        for segment in &self.path {
            out.push_str(&segment.to_string());
        }
        out
    }
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Check error at {}: {}", self.path_string(), self.kind)?;
        if let Some(pos) = self.position {
            write!(f, " (line {}, column {})", pos.line, pos.column)?;
        }
        Ok(())
    }
}

impl std::error::Error for CheckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// Any failure on the way from text to a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Check(#[from] CheckError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_rendering() {
        let err = CheckError::detached(CheckErrorKind::MissingField(Segment::Field(
            "cost".to_string(),
        )))
        .within(Segment::Field("price".to_string()))
        .within(Segment::Index(1));
        assert_eq!(err.path_string(), "$[1].price");
        assert_eq!(err.index(), Some(1));
        assert!(err.to_string().contains("missing field .cost"));
    }

    #[test]
    fn test_position_in_message() {
        let term = Term::leaf("x").with_position(Position { line: 4, column: 2 });
        let err = CheckError::type_mismatch(&term, "a number", "\"x\"");
        assert!(err.to_string().ends_with("(line 4, column 2)"));
    }

    #[test]
    fn test_tag_mismatch_message() {
        let kind = CheckErrorKind::TagMismatch {
            expected: "products".to_string(),
            found: None,
        };
        assert_eq!(kind.to_string(), "expected tag \"products\", found no tag");
    }
}
