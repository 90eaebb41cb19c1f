//! Default translations for common types.
//!
//! [`ToTerm`] and [`FromTerm`] give a type a canonical tree form, so it can be
//! used without spelling out a schema. [`default_trans`] turns that pair back
//! into an ordinary [`Trans`] for use inside combinators.
//!
//! ```rust
//! use termpose::{FromTerm, ToTerm, Term};
//!
//! let v = vec![1i64, 2, 3];
//! let term = v.to_term();
//! assert_eq!(term.to_string(), "1 2 3");
//! assert_eq!(Vec::<i64>::from_term(&term).unwrap(), v);
//! ```

use crate::error::CheckError;
use crate::leaf::{bigint_trans, bool_trans, datetime_trans, number_trans, string_trans};
use crate::sequence::{map_trans, sequence};
use crate::term::Term;
use crate::trans::Trans;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use num_bigint::BigInt;
use std::marker::PhantomData;

/// Types with a canonical encoding as a [`Term`].
pub trait ToTerm {
    fn to_term(&self) -> Term;
}

/// Types with a canonical decoding from a [`Term`].
pub trait FromTerm: Sized {
    fn from_term(term: &Term) -> Result<Self, CheckError>;
}

impl ToTerm for Term {
    fn to_term(&self) -> Term {
        self.clone()
    }
}

impl FromTerm for Term {
    fn from_term(term: &Term) -> Result<Self, CheckError> {
        Ok(term.clone())
    }
}

/// Adapts a type's [`ToTerm`]/[`FromTerm`] impls into a translator.
pub struct DefaultTrans<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for DefaultTrans<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DefaultTrans<T> {}

impl<T> std::fmt::Debug for DefaultTrans<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DefaultTrans<{}>", std::any::type_name::<T>())
    }
}

/// The translator given by `T`'s own [`ToTerm`] and [`FromTerm`] impls.
///
/// ```rust
/// use termpose::{default_trans, ensure_tag, parse, Trans};
///
/// let sizes = ensure_tag("sizes", default_trans::<Vec<u32>>());
/// let term = parse("shirt sizes:(38 40 42)").unwrap();
/// assert_eq!(sizes.check(&term).unwrap(), vec![38, 40, 42]);
/// ```
#[must_use]
pub fn default_trans<T: ToTerm + FromTerm>() -> DefaultTrans<T> {
    DefaultTrans {
        _marker: PhantomData,
    }
}

impl<T: ToTerm + FromTerm> Trans<T> for DefaultTrans<T> {
    fn check(&self, term: &Term) -> Result<T, CheckError> {
        T::from_term(term)
    }

    fn termify(&self, value: &T) -> Term {
        value.to_term()
    }
}

macro_rules! via_trans {
    ($($ty:ty => $trans:expr),* $(,)?) => {
        $(
            impl ToTerm for $ty {
                fn to_term(&self) -> Term {
                    $trans.termify(self)
                }
            }

            impl FromTerm for $ty {
                fn from_term(term: &Term) -> Result<Self, CheckError> {
                    $trans.check(term)
                }
            }
        )*
    };
}

via_trans! {
    String => string_trans(),
    bool => bool_trans(),
    DateTime<Utc> => datetime_trans(),
    BigInt => bigint_trans(),
}

macro_rules! via_number {
    ($($ty:ty),*) => {
        via_trans! { $($ty => number_trans::<$ty>()),* }
    };
}

via_number!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl<T: ToTerm + FromTerm> ToTerm for Vec<T> {
    fn to_term(&self) -> Term {
        sequence(default_trans::<T>()).termify(self)
    }
}

impl<T: ToTerm + FromTerm> FromTerm for Vec<T> {
    fn from_term(term: &Term) -> Result<Self, CheckError> {
        sequence(default_trans::<T>()).check(term)
    }
}

impl<V: ToTerm + FromTerm> ToTerm for IndexMap<String, V> {
    fn to_term(&self) -> Term {
        map_trans(default_trans::<V>()).termify(self)
    }
}

impl<V: ToTerm + FromTerm> FromTerm for IndexMap<String, V> {
    fn from_term(term: &Term) -> Result<Self, CheckError> {
        map_trans(default_trans::<V>()).check(term)
    }
}
