//! Homogeneous collections: sequences and maps.
//!
//! A sequence decodes every child of a node with one inner translator:
//!
//! ```text
//! products            <- tagged_sequence("products", ...)
//!     hammer cost:5   <- item 0
//!     twine cost:0    <- item 1
//! ```
//!
//! A map reads children of the form `key:value` (or `key` with an indented
//! block) into an [`IndexMap`], keeping document order.
//!
//! Both fail fast: the first bad child aborts the check, and its index or
//! key is prefixed to the error path.

use crate::error::{CheckError, CheckErrorKind, Segment};
use crate::term::Term;
use crate::trans::{describe, Trans};
use indexmap::IndexMap;
use log::{debug, trace};

fn check_items<T, X: Trans<T>>(node: &Term, inner: &X) -> Result<Vec<T>, CheckError> {
    node.children()
        .iter()
        .enumerate()
        .map(|(i, child)| inner.check(child).map_err(|e| e.within(Segment::Index(i))))
        .collect()
}

fn expect_tag(node: &Term, tag: &str) -> Result<(), CheckError> {
    if node.tag() == Some(tag) {
        return Ok(());
    }
    Err(CheckError::new(
        CheckErrorKind::TagMismatch {
            expected: tag.to_string(),
            found: node.tag().map(str::to_string),
        },
        node,
    ))
}

/// A document root or node with an expected tag, holding a list of items.
/// See [`tagged_sequence`].
#[derive(Debug, Clone)]
pub struct TaggedSequence<X> {
    tag: String,
    inner: X,
}

/// Creates a translator for a node tagged `tag` whose children are all
/// decoded by `inner`.
///
/// ```rust
/// use termpose::{parse, string_trans, tagged_sequence, Trans};
///
/// let names = tagged_sequence("names", string_trans());
/// let term = parse("names\n\tada\n\tgrace").unwrap();
/// assert_eq!(names.check(&term).unwrap(), vec!["ada", "grace"]);
/// ```
pub fn tagged_sequence<X>(tag: impl Into<String>, inner: X) -> TaggedSequence<X> {
    TaggedSequence {
        tag: tag.into(),
        inner,
    }
}

impl<T, X: Trans<T>> Trans<Vec<T>> for TaggedSequence<X> {
    fn check(&self, node: &Term) -> Result<Vec<T>, CheckError> {
        expect_tag(node, &self.tag)?;
        let items = check_items(node, &self.inner)?;
        debug!("checked sequence {:?} with {} items", self.tag, items.len());
        Ok(items)
    }

    fn termify(&self, items: &Vec<T>) -> Term {
        Term::tagged(
            self.tag.as_str(),
            items.iter().map(|item| self.inner.termify(item)).collect(),
        )
    }
}

/// A list of items with no tag requirement. See [`sequence`].
#[derive(Debug, Clone)]
pub struct Sequence<X> {
    inner: X,
}

/// Creates a translator for any node whose children are all decoded by
/// `inner`. The node's tag, if any, is ignored; `termify` writes an untagged
/// node.
pub fn sequence<X>(inner: X) -> Sequence<X> {
    Sequence { inner }
}

impl<T, X: Trans<T>> Trans<Vec<T>> for Sequence<X> {
    fn check(&self, node: &Term) -> Result<Vec<T>, CheckError> {
        if node.value().is_some() {
            return Err(CheckError::type_mismatch(node, "a list", &describe(node)));
        }
        check_items(node, &self.inner)
    }

    fn termify(&self, items: &Vec<T>) -> Term {
        Term::list(items.iter().map(|item| self.inner.termify(item)).collect())
    }
}

fn check_entries<V, X: Trans<V>>(node: &Term, inner: &X) -> Result<IndexMap<String, V>, CheckError> {
    let mut map = IndexMap::with_capacity(node.children().len());
    for (i, child) in node.children().iter().enumerate() {
        let key = child.tag().ok_or_else(|| {
            CheckError::type_mismatch(child, "a key:value entry", &describe(child))
                .within(Segment::Index(i))
        })?;
        if map.contains_key(key) {
            trace!("ignoring repeated map key {:?}", key);
            continue;
        }
        let value_term = match child.children() {
            [only] => only,
            _ => child,
        };
        let value = inner
            .check(value_term)
            .map_err(|e| e.within(Segment::Field(key.to_string())))?;
        map.insert(key.to_string(), value);
    }
    Ok(map)
}

fn termify_entries<V, X: Trans<V>>(map: &IndexMap<String, V>, inner: &X) -> Vec<Term> {
    map.iter()
        .map(|(key, value)| Term::tagged(key.as_str(), vec![inner.termify(value)]))
        .collect()
}

/// String-keyed entries. See [`map_trans`].
#[derive(Debug, Clone)]
pub struct MapTrans<X> {
    inner: X,
}

/// Creates a translator for a node whose children are `key:value` entries.
///
/// Order is preserved. When a key repeats, the first entry wins.
///
/// ```rust
/// use termpose::{int_trans, map_trans, parse, Trans};
///
/// let stock = map_trans(int_trans());
/// let map = stock.check(&parse("hammer:3 twine:40").unwrap()).unwrap();
/// assert_eq!(map.get_index(0), Some((&"hammer".to_string(), &3)));
/// assert_eq!(map["twine"], 40);
/// ```
pub fn map_trans<X>(inner: X) -> MapTrans<X> {
    MapTrans { inner }
}

impl<V, X: Trans<V>> Trans<IndexMap<String, V>> for MapTrans<X> {
    fn check(&self, node: &Term) -> Result<IndexMap<String, V>, CheckError> {
        if node.value().is_some() {
            return Err(CheckError::type_mismatch(node, "a map", &describe(node)));
        }
        check_entries(node, &self.inner)
    }

    fn termify(&self, map: &IndexMap<String, V>) -> Term {
        Term::list(termify_entries(map, &self.inner))
    }
}

/// String-keyed entries under an expected tag. See [`tagged_map_trans`].
#[derive(Debug, Clone)]
pub struct TaggedMapTrans<X> {
    tag: String,
    inner: X,
}

/// Like [`map_trans`], but the node itself must be tagged `tag`.
pub fn tagged_map_trans<X>(tag: impl Into<String>, inner: X) -> TaggedMapTrans<X> {
    TaggedMapTrans {
        tag: tag.into(),
        inner,
    }
}

impl<V, X: Trans<V>> Trans<IndexMap<String, V>> for TaggedMapTrans<X> {
    fn check(&self, node: &Term) -> Result<IndexMap<String, V>, CheckError> {
        expect_tag(node, &self.tag)?;
        let map = check_entries(node, &self.inner)?;
        debug!("checked map {:?} with {} entries", self.tag, map.len());
        Ok(map)
    }

    fn termify(&self, map: &IndexMap<String, V>) -> Term {
        Term::tagged(self.tag.as_str(), termify_entries(map, &self.inner))
    }
}
