//! The termpose tree.
//!
//! A [`Term`] is an ordered, optionally tagged tree node. It is either a leaf
//! (no children, optional inline value) or an interior node (children, no
//! value). The tag is independent of that distinction.
//!
//! Terms are built by the parser, by schema `termify` calls, or by hand through
//! the constructors here. There is no way to mutate a term after it is built.
//!
//! ```rust
//! use termpose::Term;
//!
//! let cost = Term::tagged_value("cost", "5");
//! assert_eq!(cost.tag(), Some("cost"));
//! assert_eq!(cost.children()[0].value(), Some("5"));
//!
//! let product = Term::list(vec![Term::leaf("hammer"), cost]);
//! assert_eq!(product.to_string(), "hammer cost:5");
//! ```

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A 1-based source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// A node of a termpose tree.
///
/// Equality compares tag, value and children (recursively, order-sensitive).
/// The recorded source position is ignored.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Term {
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Term>,
    #[serde(skip)]
    position: Option<Position>,
}

impl Term {
    /// A bare scalar leaf.
    pub fn leaf(value: impl Into<String>) -> Self {
        Term {
            value: Some(value.into()),
            ..Term::default()
        }
    }

    /// The empty node: no tag, no value, no children. Written `()`.
    #[must_use]
    pub fn empty() -> Self {
        Term::default()
    }

    /// An untagged interior node.
    pub fn list(children: Vec<Term>) -> Self {
        Term {
            children,
            ..Term::default()
        }
    }

    /// A tagged node with the given children.
    pub fn tagged(tag: impl Into<String>, children: Vec<Term>) -> Self {
        Term {
            tag: Some(tag.into()),
            children,
            ..Term::default()
        }
    }

    /// The `tag:value` shorthand: a tagged node with a single leaf child.
    pub fn tagged_value(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Term::tagged(tag, vec![Term::leaf(value)])
    }

    pub(crate) fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    #[inline]
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[Term] {
        &self.children
    }

    /// Where the parser found this node. `None` for terms built in code.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Returns `true` if this node has no children.
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` for the node written `()`.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tag.is_none() && self.value.is_none() && self.children.is_empty()
    }

    /// Returns the first direct child tagged `tag`.
    ///
    /// ```rust
    /// use termpose::parse;
    ///
    /// let t = parse("hammer cost:5 cost:7").unwrap();
    /// let cost = t.child_tagged("cost").unwrap();
    /// assert_eq!(cost.children()[0].value(), Some("5"));
    /// ```
    #[must_use]
    pub fn child_tagged(&self, tag: &str) -> Option<&Term> {
        self.children_tagged(tag).next()
    }

    /// Iterates over every direct child tagged `tag`, in order.
    pub fn children_tagged<'a, 'b>(&'a self, tag: &'b str) -> impl Iterator<Item = &'a Term> + 'b
    where
        'a: 'b,
    {
        self.children.iter().filter(move |c| c.tag() == Some(tag))
    }

    /// Counts this node and all of its descendants.
    #[must_use]
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(t) = stack.pop() {
            count += 1;
            stack.extend(t.children.iter());
        }
        count
    }

    /// Parses termpose text with default options. See [`crate::parse`].
    pub fn parse(text: &str) -> std::result::Result<Term, crate::SyntaxError> {
        crate::parse(text)
    }

    /// Renders this tree in canonical form with default options. See [`crate::print`].
    #[must_use]
    pub fn pretty_print(&self) -> String {
        crate::print(self)
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.value == other.value && self.children == other.children
    }
}

impl Eq for Term {}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::print(self))
    }
}

impl From<&str> for Term {
    fn from(value: &str) -> Self {
        Term::leaf(value)
    }
}

impl From<String> for Term {
    fn from(value: String) -> Self {
        Term::leaf(value)
    }
}

impl From<Vec<Term>> for Term {
    fn from(children: Vec<Term>) -> Self {
        Term::list(children)
    }
}

#[derive(Deserialize)]
struct RawTerm {
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    children: Vec<Term>,
}

impl<'de> Deserialize<'de> for Term {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawTerm::deserialize(deserializer)?;
        if raw.value.is_some() && !raw.children.is_empty() {
            return Err(D::Error::custom("a term cannot have both a value and children"));
        }
        Ok(Term {
            tag: raw.tag,
            value: raw.value,
            children: raw.children,
            position: None,
        })
    }
}
