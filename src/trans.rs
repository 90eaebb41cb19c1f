//! Bidirectional translators between terms and typed values.
//!
//! A [`Trans<T>`] pairs two operations:
//!
//! - `check`: validate a [`Term`] and decode it into a `T`
//! - `termify`: encode a `T` back into a [`Term`]
//!
//! The two directions are kept consistent: for any value a schema accepts,
//! `check(&termify(&x))` gives back `x`.
//!
//! Translators are small immutable structs that compose by wrapping, e.g.
//! `tagged_sequence("products", combine_trans(...))`. They hold no state
//! between calls, so one schema can be shared freely, including across threads.
//!
//! ## Aggregates
//!
//! [`combine_trans`](crate::combine_trans) feeds each field translator the
//! aggregate node through [`Trans::check_field`]. The default reads the next
//! positional child; tag-located translators such as
//! [`ensure_tag`](crate::ensure_tag) override it to search the node instead.
//!
//! ```rust
//! use termpose::{float_trans, Term, Trans};
//!
//! let t = float_trans();
//! assert_eq!(t.check(&Term::leaf("9.50")).unwrap(), 9.5);
//! assert_eq!(t.termify(&5.0), Term::leaf("5"));
//! ```

use crate::error::{CheckError, CheckErrorKind, Segment};
use crate::term::Term;
use std::rc::Rc;
use std::sync::Arc;

/// A paired decode/encode capability for one type.
pub trait Trans<T> {
    /// Decodes `term`, failing on the first mismatch.
    fn check(&self, term: &Term) -> Result<T, CheckError>;

    /// Encodes `value`. Never fails for values this translator can produce.
    fn termify(&self, value: &T) -> Term;

    /// Decodes this field of the aggregate node `parent`.
    ///
    /// `slot` is the next unread positional child. Positional translators
    /// consume it; tag-located ones leave it alone.
    fn check_field(&self, parent: &Term, slot: &mut usize) -> Result<T, CheckError> {
        let index = *slot;
        *slot += 1;
        let child = parent.children().get(index).ok_or_else(|| {
            CheckError::new(CheckErrorKind::MissingField(Segment::Index(index)), parent)
        })?;
        self.check(child).map_err(|e| e.within(Segment::Index(index)))
    }

    /// Appends this field's representation to an aggregate's children.
    fn termify_field(&self, value: &T, fields: &mut Vec<Term>) {
        fields.push(self.termify(value));
    }
}

macro_rules! forward_trans {
    ($($ptr:ty),*) => {
        $(
            impl<T, X> Trans<T> for $ptr
            where
                X: Trans<T> + ?Sized,
            {
                fn check(&self, term: &Term) -> Result<T, CheckError> {
                    (**self).check(term)
                }

                fn termify(&self, value: &T) -> Term {
                    (**self).termify(value)
                }

                fn check_field(&self, parent: &Term, slot: &mut usize) -> Result<T, CheckError> {
                    (**self).check_field(parent, slot)
                }

                fn termify_field(&self, value: &T, fields: &mut Vec<Term>) {
                    (**self).termify_field(value, fields)
                }
            }
        )*
    };
}

forward_trans!(&X, Box<X>, Rc<X>, Arc<X>);

/// Checks that `term` is a scalar leaf and returns its text.
pub(crate) fn scalar<'t>(term: &'t Term, expected: &str) -> Result<&'t str, CheckError> {
    if !term.is_leaf() {
        return Err(CheckError::type_mismatch(
            term,
            expected,
            &format!("a node with {} children", term.children().len()),
        ));
    }
    term.value()
        .ok_or_else(|| CheckError::type_mismatch(term, expected, &describe(term)))
}

/// A short human description of a term's shape, for error messages.
pub(crate) fn describe(term: &Term) -> String {
    match (term.tag(), term.value(), term.children().len()) {
        (_, Some(v), _) => format!("the value {:?}", v),
        (Some(tag), None, 0) => format!("the empty tag \"{}\"", tag),
        (Some(tag), None, n) => format!("\"{}\" with {} children", tag, n),
        (None, None, 0) => "an empty node".to_string(),
        (None, None, n) => format!("a node with {} children", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{float_trans, string_trans};

    #[test]
    fn test_forwarding_through_pointers() {
        let boxed: Box<dyn Trans<String>> = Box::new(string_trans());
        assert_eq!(boxed.check(&Term::leaf("x")).unwrap(), "x");

        let shared = Arc::new(float_trans());
        let by_ref = &shared;
        assert_eq!(by_ref.termify(&1.5), Term::leaf("1.5"));
    }

    #[test]
    fn test_default_check_field_is_positional() {
        let node = Term::list(vec![Term::leaf("a"), Term::leaf("b")]);
        let mut slot = 0;
        let t = string_trans();
        assert_eq!(t.check_field(&node, &mut slot).unwrap(), "a");
        assert_eq!(t.check_field(&node, &mut slot).unwrap(), "b");
        let err = t.check_field(&node, &mut slot).unwrap_err();
        assert_eq!(err.kind, CheckErrorKind::MissingField(Segment::Index(2)));
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(&Term::leaf("x")), "the value \"x\"");
        assert_eq!(describe(&Term::empty()), "an empty node");
        assert_eq!(describe(&Term::tagged("a", vec![])), "the empty tag \"a\"");
    }
}
