//! Aggregates assembled from field translators.
//!
//! [`combine_trans`] builds a translator for a record type out of one
//! translator per field, plus a pair of plain functions converting between
//! the record and a tuple of its fields. The record type needs no trait
//! implementations and no accessors beyond what the two functions use.
//!
//! Fields are read through [`Trans::check_field`]. Bare translators consume
//! the aggregate's children left to right; [`ensure_tag`](crate::ensure_tag)
//! fields are found by tag wherever they sit. Declare positional fields
//! before tagged ones so `termify` writes them back in the same slots.
//!
//! ```rust
//! use termpose::{combine_trans, ensure_tag, float_trans, parse, string_trans, Trans};
//!
//! #[derive(Debug, PartialEq)]
//! struct Item {
//!     name: String,
//!     cost: f64,
//! }
//!
//! let item = combine_trans(
//!     |(name, cost)| Item { name, cost },
//!     |i: &Item| (i.name.clone(), i.cost),
//!     (string_trans(), ensure_tag("cost", float_trans())),
//! );
//!
//! let hammer = item.check(&parse("hammer cost:5").unwrap()).unwrap();
//! assert_eq!(hammer, Item { name: "hammer".to_string(), cost: 5.0 });
//! assert_eq!(item.termify(&hammer).to_string(), "hammer cost:5");
//! ```

use crate::error::{CheckError, CheckErrorKind, Segment};
use crate::term::Term;
use crate::trans::{describe, Trans};
use log::trace;
use std::borrow::Cow;
use std::marker::PhantomData;

/// A tuple of field translators decoding into a tuple of field values.
///
/// Implemented for tuples of 1 to 8 translators.
pub trait FieldSet<F> {
    /// Number of fields in the set.
    const LEN: usize;

    /// Reads every field from `parent`, stopping at the first failure.
    fn check_fields(&self, parent: &Term) -> Result<F, CheckError>;

    /// Writes every field of `value` into `out`, in declaration order.
    fn termify_fields(&self, value: &F, out: &mut Vec<Term>);
}

macro_rules! impl_field_set {
    ($len:expr; $(($F:ident, $X:ident, $idx:tt)),+) => {
        impl<$($F, $X: Trans<$F>),+> FieldSet<($($F,)+)> for ($($X,)+) {
            const LEN: usize = $len;

            fn check_fields(&self, parent: &Term) -> Result<($($F,)+), CheckError> {
                let mut slot = 0;
                Ok(($(self.$idx.check_field(parent, &mut slot)?,)+))
            }

            fn termify_fields(&self, value: &($($F,)+), out: &mut Vec<Term>) {
                $(self.$idx.termify_field(&value.$idx, out);)+
            }
        }
    };
}

impl_field_set!(1; (F0, X0, 0));
impl_field_set!(2; (F0, X0, 0), (F1, X1, 1));
impl_field_set!(3; (F0, X0, 0), (F1, X1, 1), (F2, X2, 2));
impl_field_set!(4; (F0, X0, 0), (F1, X1, 1), (F2, X2, 2), (F3, X3, 3));
impl_field_set!(5; (F0, X0, 0), (F1, X1, 1), (F2, X2, 2), (F3, X3, 3), (F4, X4, 4));
impl_field_set!(6; (F0, X0, 0), (F1, X1, 1), (F2, X2, 2), (F3, X3, 3), (F4, X4, 4), (F5, X5, 5));
impl_field_set!(
    7;
    (F0, X0, 0), (F1, X1, 1), (F2, X2, 2), (F3, X3, 3), (F4, X4, 4), (F5, X5, 5), (F6, X6, 6)
);
impl_field_set!(
    8;
    (F0, X0, 0), (F1, X1, 1), (F2, X2, 2), (F3, X3, 3), (F4, X4, 4), (F5, X5, 5), (F6, X6, 6),
    (F7, X7, 7)
);

/// A record translator. See [`combine_trans`].
pub struct CombineTrans<F, C, D, X> {
    construct: C,
    destruct: D,
    fields: X,
    _fields: PhantomData<fn() -> F>,
}

impl<F, C: Clone, D: Clone, X: Clone> Clone for CombineTrans<F, C, D, X> {
    fn clone(&self) -> Self {
        CombineTrans {
            construct: self.construct.clone(),
            destruct: self.destruct.clone(),
            fields: self.fields.clone(),
            _fields: PhantomData,
        }
    }
}

/// Creates a translator for a record with the given field translators.
///
/// - `construct` turns the decoded field tuple into the record
/// - `destruct` takes a record apart into the same tuple
/// - `fields` is a tuple of translators, one per field
///
/// A bare leaf such as `twine` is accepted as an aggregate of one child, so
/// records whose other fields are all optional can be written as a single
/// word.
pub fn combine_trans<T, F, C, D, X>(construct: C, destruct: D, fields: X) -> CombineTrans<F, C, D, X>
where
    C: Fn(F) -> T,
    D: Fn(&T) -> F,
    X: FieldSet<F>,
{
    CombineTrans {
        construct,
        destruct,
        fields,
        _fields: PhantomData,
    }
}

impl<T, F, C, D, X> Trans<T> for CombineTrans<F, C, D, X>
where
    C: Fn(F) -> T,
    D: Fn(&T) -> F,
    X: FieldSet<F>,
{
    fn check(&self, term: &Term) -> Result<T, CheckError> {
        let node = match (term.value(), term.tag()) {
            (None, _) => Cow::Borrowed(term),
            (Some(_), None) => {
                let single = Term::list(vec![term.clone()]);
                Cow::Owned(match term.position() {
                    Some(pos) => single.with_position(pos),
                    None => single,
                })
            }
            (Some(_), Some(_)) => {
                return Err(CheckError::type_mismatch(term, "an aggregate", &describe(term)))
            }
        };
        trace!("checking aggregate of {} fields", X::LEN);
        let fields = self.fields.check_fields(&node)?;
        Ok((self.construct)(fields))
    }

    fn termify(&self, value: &T) -> Term {
        let fields = (self.destruct)(value);
        let mut children = Vec::with_capacity(X::LEN);
        self.fields.termify_fields(&fields, &mut children);
        Term::list(children)
    }
}

/// A two-child node. See [`pair_trans`].
#[derive(Debug, Clone)]
pub struct PairTrans<A, B> {
    first: A,
    second: B,
}

/// Creates a translator for a node with exactly two children, such as
/// `(hammer 5)`.
///
/// ```rust
/// use termpose::{float_trans, pair_trans, parse, string_trans, Trans};
///
/// let price = pair_trans(string_trans(), float_trans());
/// let (name, cost) = price.check(&parse("hammer 5").unwrap()).unwrap();
/// assert_eq!((name.as_str(), cost), ("hammer", 5.0));
/// ```
pub fn pair_trans<A, B>(first: A, second: B) -> PairTrans<A, B> {
    PairTrans { first, second }
}

impl<K, V, A: Trans<K>, B: Trans<V>> Trans<(K, V)> for PairTrans<A, B> {
    fn check(&self, term: &Term) -> Result<(K, V), CheckError> {
        match term.children() {
            [a, b] if term.value().is_none() => {
                let k = self
                    .first
                    .check(a)
                    .map_err(|e| e.within(Segment::Index(0)))?;
                let v = self
                    .second
                    .check(b)
                    .map_err(|e| e.within(Segment::Index(1)))?;
                Ok((k, v))
            }
            [_] | [] if term.value().is_none() => Err(CheckError::new(
                CheckErrorKind::MissingField(Segment::Index(term.children().len())),
                term,
            )),
            _ => Err(CheckError::type_mismatch(term, "a pair", &describe(term))),
        }
    }

    fn termify(&self, (k, v): &(K, V)) -> Term {
        Term::list(vec![self.first.termify(k), self.second.termify(v)])
    }
}
