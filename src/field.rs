//! Tag-located fields.
//!
//! [`ensure_tag`] finds a field by its tag among a node's direct children, the
//! way `cost:5` is found inside `hammer cost:5 description"...`. Because the
//! lookup is by tag, named fields may appear in any order in the source.
//!
//! The matched child is unwrapped before the inner translator sees it:
//!
//! - a child with exactly one child of its own (`cost:5`, or a `description`
//!   string block) passes that single child
//! - a tagged leaf that carries a value passes a plain leaf of that value
//! - anything else (`point` with two children, an empty `flag:`) passes the
//!   matched child itself
//!
//! ## Duplicates
//!
//! When the tag occurs more than once the first occurrence wins and the rest
//! are ignored. [`EnsureTag::reject_duplicates`] turns that into an
//! [`AmbiguousField`](crate::CheckErrorKind::AmbiguousField) error instead.

use crate::error::{CheckError, CheckErrorKind, Segment};
use crate::term::Term;
use crate::trans::Trans;
use log::trace;
use std::borrow::Cow;

/// What to do when a tag-located field occurs more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Use the first occurrence and ignore the others.
    #[default]
    FirstWins,
    /// Fail with `AmbiguousField`.
    Reject,
}

/// Locates a required field by tag. See [`ensure_tag`].
#[derive(Debug, Clone)]
pub struct EnsureTag<X> {
    tag: String,
    inner: X,
    policy: DuplicatePolicy,
}

/// Creates a translator for the field tagged `tag` of a node.
///
/// `check` takes the *containing* node and searches its children. `termify`
/// produces the field itself, `tag` wrapping the inner term, for the caller
/// to place among a parent's children.
///
/// ```rust
/// use termpose::{ensure_tag, float_trans, parse, Term, Trans};
///
/// let cost = ensure_tag("cost", float_trans());
/// let product = parse("hammer cost:5").unwrap();
/// assert_eq!(cost.check(&product).unwrap(), 5.0);
/// assert_eq!(cost.termify(&9.5), Term::tagged_value("cost", "9.5"));
/// ```
pub fn ensure_tag<X>(tag: impl Into<String>, inner: X) -> EnsureTag<X> {
    EnsureTag {
        tag: tag.into(),
        inner,
        policy: DuplicatePolicy::default(),
    }
}

impl<X> EnsureTag<X> {
    #[must_use]
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fails with `AmbiguousField` when the tag occurs more than once.
    #[must_use]
    pub fn reject_duplicates(self) -> Self {
        self.with_duplicate_policy(DuplicatePolicy::Reject)
    }
}

/// Finds the child tagged `tag`, applying the duplicate policy.
fn locate<'t>(
    parent: &'t Term,
    tag: &str,
    policy: DuplicatePolicy,
) -> Result<Option<&'t Term>, CheckError> {
    let mut matches = parent.children_tagged(tag);
    let first = matches.next();
    if first.is_some() && policy == DuplicatePolicy::Reject {
        let extra = matches.count();
        if extra > 0 {
            return Err(CheckError::new(
                CheckErrorKind::AmbiguousField {
                    field: tag.to_string(),
                    count: extra + 1,
                },
                parent,
            ));
        }
    }
    Ok(first)
}

/// The term a field's inner translator should see.
fn unwrap_field(field: &Term) -> Cow<'_, Term> {
    match (field.children(), field.value()) {
        ([only], _) => Cow::Borrowed(only),
        ([], Some(value)) => {
            let leaf = Term::leaf(value);
            Cow::Owned(match field.position() {
                Some(pos) => leaf.with_position(pos),
                None => leaf,
            })
        }
        _ => Cow::Borrowed(field),
    }
}

fn check_located<T, X: Trans<T>>(field: &Term, tag: &str, inner: &X) -> Result<T, CheckError> {
    trace!("checking field {:?}", tag);
    inner
        .check(&unwrap_field(field))
        .map_err(|e| e.within(Segment::Field(tag.to_string())))
}

impl<T, X: Trans<T>> Trans<T> for EnsureTag<X> {
    fn check(&self, parent: &Term) -> Result<T, CheckError> {
        match locate(parent, &self.tag, self.policy)? {
            Some(field) => check_located(field, &self.tag, &self.inner),
            None => Err(CheckError::new(
                CheckErrorKind::MissingField(Segment::Field(self.tag.clone())),
                parent,
            )),
        }
    }

    fn termify(&self, value: &T) -> Term {
        Term::tagged(self.tag.as_str(), vec![self.inner.termify(value)])
    }

    fn check_field(&self, parent: &Term, _slot: &mut usize) -> Result<T, CheckError> {
        self.check(parent)
    }
}

/// Locates an optional field by tag. See [`optional_tag`].
#[derive(Debug, Clone)]
pub struct OptionalTag<X> {
    tag: String,
    inner: X,
    policy: DuplicatePolicy,
}

/// Like [`ensure_tag`], but a missing field decodes as `None`.
///
/// In an aggregate, `None` contributes no child at all. On its own,
/// `termify(&None)` gives the empty node.
///
/// ```rust
/// use termpose::{optional_tag, parse, string_trans, Trans};
///
/// let note = optional_tag("note", string_trans());
/// assert_eq!(note.check(&parse("twine cost:0").unwrap()).unwrap(), None);
/// assert_eq!(
///     note.check(&parse("twine note:spare").unwrap()).unwrap(),
///     Some("spare".to_string())
/// );
/// ```
pub fn optional_tag<X>(tag: impl Into<String>, inner: X) -> OptionalTag<X> {
    OptionalTag {
        tag: tag.into(),
        inner,
        policy: DuplicatePolicy::default(),
    }
}

impl<X> OptionalTag<X> {
    #[must_use]
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn reject_duplicates(self) -> Self {
        self.with_duplicate_policy(DuplicatePolicy::Reject)
    }
}

impl<T, X: Trans<T>> Trans<Option<T>> for OptionalTag<X> {
    fn check(&self, parent: &Term) -> Result<Option<T>, CheckError> {
        locate(parent, &self.tag, self.policy)?
            .map(|field| check_located(field, &self.tag, &self.inner))
            .transpose()
    }

    fn termify(&self, value: &Option<T>) -> Term {
        match value {
            Some(v) => Term::tagged(self.tag.as_str(), vec![self.inner.termify(v)]),
            None => Term::empty(),
        }
    }

    fn check_field(&self, parent: &Term, _slot: &mut usize) -> Result<Option<T>, CheckError> {
        self.check(parent)
    }

    fn termify_field(&self, value: &Option<T>, fields: &mut Vec<Term>) {
        if value.is_some() {
            fields.push(self.termify(value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{float_trans, parse, string_trans};

    #[test]
    fn test_missing_field() {
        let t = ensure_tag("cost", float_trans());
        let err = t.check(&parse("hammer price:5").unwrap()).unwrap_err();
        assert_eq!(
            err.kind,
            CheckErrorKind::MissingField(Segment::Field("cost".to_string()))
        );
    }

    #[test]
    fn test_first_occurrence_wins() {
        let t = ensure_tag("cost", float_trans());
        let node = parse("hammer cost:5 cost:7").unwrap();
        assert_eq!(t.check(&node).unwrap(), 5.0);
    }

    #[test]
    fn test_reject_duplicates() {
        let t = ensure_tag("cost", float_trans()).reject_duplicates();
        let node = parse("hammer cost:5 cost:7 cost:8").unwrap();
        let err = t.check(&node).unwrap_err();
        assert_eq!(
            err.kind,
            CheckErrorKind::AmbiguousField {
                field: "cost".to_string(),
                count: 3
            }
        );
        assert!(t.check(&parse("hammer cost:5").unwrap()).is_ok());
    }

    #[test]
    fn test_inner_error_carries_field_path() {
        let t = ensure_tag("cost", float_trans());
        let err = t.check(&parse("hammer cost:cheap").unwrap()).unwrap_err();
        assert_eq!(err.path_string(), "$.cost");
        assert_eq!(err.position.map(|p| p.column), Some(13));
    }

    #[test]
    fn test_unwraps_string_block() {
        let t = ensure_tag("description", string_trans());
        let node = parse("hammer description\"\n\tpremium hammer").unwrap();
        assert_eq!(t.check(&node).unwrap(), "premium hammer");
    }

    #[test]
    fn test_value_carrying_tagged_leaf() {
        let node: Term =
            serde_json::from_str(r#"{"children":[{"tag":"cost","value":"3"}]}"#).unwrap();
        assert_eq!(ensure_tag("cost", float_trans()).check(&node).unwrap(), 3.0);
    }

    #[test]
    fn test_optional_skips_none_in_aggregates() {
        let t = optional_tag("note", string_trans());
        let mut fields = Vec::new();
        t.termify_field(&None, &mut fields);
        assert!(fields.is_empty());
        t.termify_field(&Some("x".to_string()), &mut fields);
        assert_eq!(fields, vec![Term::tagged_value("note", "x")]);
    }
}
