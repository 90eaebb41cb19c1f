//! Translators for scalar leaves.
//!
//! Every leaf translator accepts only a childless node that carries a value,
//! and produces a bare leaf on the way back out:
//!
//! | Constructor | Type | Accepted text |
//! |-------------|------|---------------|
//! | [`string_trans`] | `String` | anything |
//! | [`number_trans`] | any `FromStr + Display` number | Rust numeric syntax |
//! | [`float_trans`] | `f64` | `5`, `9.50`, `-1e3`, `inf` |
//! | [`int_trans`] | `i64` | `42`, `-7` |
//! | [`bool_trans`] | `bool` | `true`/`yes`/`⊤`, `false`/`no`/`⟂` |
//! | [`datetime_trans`] | `DateTime<Utc>` | RFC 3339 |
//! | [`bigint_trans`] | `BigInt` | decimal digits of any length |
//!
//! ```rust
//! use termpose::{bool_trans, int_trans, Term, Trans};
//!
//! assert_eq!(int_trans().check(&Term::leaf("-7")).unwrap(), -7);
//! assert!(bool_trans().check(&Term::leaf("yes")).unwrap());
//! assert_eq!(bool_trans().termify(&false), Term::leaf("false"));
//! ```

use crate::error::CheckError;
use crate::term::Term;
use crate::trans::{scalar, Trans};
use chrono::{DateTime, SecondsFormat, Utc};
use num_bigint::BigInt;
use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;

/// Text leaves, taken verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringTrans;

/// Creates a translator for `String` leaves.
#[must_use]
pub fn string_trans() -> StringTrans {
    StringTrans
}

impl Trans<String> for StringTrans {
    fn check(&self, term: &Term) -> Result<String, CheckError> {
        scalar(term, "a string").map(str::to_string)
    }

    fn termify(&self, value: &String) -> Term {
        Term::leaf(value.as_str())
    }
}

/// Numeric leaves parsed with [`FromStr`] and printed with [`Display`].
///
/// Rust's `Display` for floats writes the shortest text that parses back to
/// the same value, so `termify` then `check` is exact.
pub struct NumberTrans<N> {
    _marker: PhantomData<fn() -> N>,
}

impl<N> Clone for NumberTrans<N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for NumberTrans<N> {}

impl<N> std::fmt::Debug for NumberTrans<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NumberTrans<{}>", std::any::type_name::<N>())
    }
}

/// Creates a translator for any primitive number type.
///
/// ```rust
/// use termpose::{number_trans, Term, Trans};
///
/// let t = number_trans::<u8>();
/// assert_eq!(t.check(&Term::leaf("255")).unwrap(), 255);
/// assert!(t.check(&Term::leaf("256")).is_err());
/// ```
#[must_use]
pub fn number_trans<N>() -> NumberTrans<N>
where
    N: FromStr + Display,
    N::Err: Display,
{
    NumberTrans {
        _marker: PhantomData,
    }
}

/// `f64` leaves.
#[must_use]
pub fn float_trans() -> NumberTrans<f64> {
    number_trans()
}

/// `i64` leaves.
#[must_use]
pub fn int_trans() -> NumberTrans<i64> {
    number_trans()
}

/// `usize` leaves.
#[must_use]
pub fn usize_trans() -> NumberTrans<usize> {
    number_trans()
}

/// `isize` leaves.
#[must_use]
pub fn isize_trans() -> NumberTrans<isize> {
    number_trans()
}

impl<N> Trans<N> for NumberTrans<N>
where
    N: FromStr + Display,
    N::Err: Display,
{
    fn check(&self, term: &Term) -> Result<N, CheckError> {
        let target = std::any::type_name::<N>();
        let text = scalar(term, target)?;
        text.trim()
            .parse::<N>()
            .map_err(|e| CheckError::conversion(term, target, text, e))
    }

    fn termify(&self, value: &N) -> Term {
        Term::leaf(value.to_string())
    }
}

/// Boolean leaves.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolTrans;

/// Creates a translator for `bool` leaves. Accepts `true`, `yes`, `⊤` and
/// `false`, `no`, `⟂`. Always writes `true` or `false`.
#[must_use]
pub fn bool_trans() -> BoolTrans {
    BoolTrans
}

impl Trans<bool> for BoolTrans {
    fn check(&self, term: &Term) -> Result<bool, CheckError> {
        let text = scalar(term, "bool")?;
        match text {
            "true" | "yes" | "⊤" => Ok(true),
            "false" | "no" | "⟂" => Ok(false),
            _ => Err(CheckError::conversion(
                term,
                "bool",
                text,
                "expected true, false, yes, no, ⊤ or ⟂",
            )),
        }
    }

    fn termify(&self, value: &bool) -> Term {
        Term::leaf(if *value { "true" } else { "false" })
    }
}

/// RFC 3339 timestamps, normalized to UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeTrans;

/// Creates a translator for `chrono::DateTime<Utc>` leaves.
///
/// ```rust
/// use termpose::{datetime_trans, Term, Trans};
///
/// let t = datetime_trans();
/// let when = t.check(&Term::leaf("2024-01-15T10:30:00+02:00")).unwrap();
/// assert_eq!(t.termify(&when), Term::leaf("2024-01-15T08:30:00Z"));
/// ```
#[must_use]
pub fn datetime_trans() -> DateTimeTrans {
    DateTimeTrans
}

impl Trans<DateTime<Utc>> for DateTimeTrans {
    fn check(&self, term: &Term) -> Result<DateTime<Utc>, CheckError> {
        let text = scalar(term, "datetime")?;
        DateTime::parse_from_rfc3339(text.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| CheckError::conversion(term, "datetime", text, e))
    }

    fn termify(&self, value: &DateTime<Utc>) -> Term {
        Term::leaf(value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

/// Arbitrary precision integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct BigIntTrans;

/// Creates a translator for `num_bigint::BigInt` leaves.
#[must_use]
pub fn bigint_trans() -> BigIntTrans {
    BigIntTrans
}

impl Trans<BigInt> for BigIntTrans {
    fn check(&self, term: &Term) -> Result<BigInt, CheckError> {
        let text = scalar(term, "bigint")?;
        text.trim()
            .parse::<BigInt>()
            .map_err(|e| CheckError::conversion(term, "bigint", text, e))
    }

    fn termify(&self, value: &BigInt) -> Term {
        Term::leaf(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckErrorKind;
    use chrono::TimeZone;

    #[test]
    fn test_string_rejects_interior_nodes() {
        let err = string_trans()
            .check(&Term::list(vec![Term::leaf("a")]))
            .unwrap_err();
        assert!(matches!(err.kind, CheckErrorKind::TypeMismatch { .. }));

        let err = string_trans().check(&Term::empty()).unwrap_err();
        assert!(matches!(err.kind, CheckErrorKind::TypeMismatch { .. }));
    }

    #[test]
    fn test_float_values() {
        let t = float_trans();
        assert_eq!(t.check(&Term::leaf("5")).unwrap(), 5.0);
        assert_eq!(t.check(&Term::leaf("9.50")).unwrap(), 9.5);
        assert_eq!(t.check(&Term::leaf("0")).unwrap(), 0.0);
        assert_eq!(t.check(&Term::leaf("-1e3")).unwrap(), -1000.0);
        assert_eq!(t.termify(&9.5), Term::leaf("9.5"));
        assert_eq!(t.termify(&0.1), Term::leaf("0.1"));
    }

    #[test]
    fn test_float_conversion_error() {
        let err = float_trans().check(&Term::leaf("five")).unwrap_err();
        match err.kind {
            CheckErrorKind::ConversionError { target, text, .. } => {
                assert_eq!(target, "f64");
                assert_eq!(text, "five");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_float_precision_survives() {
        let t = float_trans();
        for x in [1.0 / 3.0, std::f64::consts::PI, 1e-300, 123456789.123456789] {
            assert_eq!(t.check(&t.termify(&x)).unwrap(), x);
        }
    }

    #[test]
    fn test_integer_bounds() {
        assert!(number_trans::<u8>().check(&Term::leaf("-1")).is_err());
        assert_eq!(isize_trans().check(&Term::leaf("-3")).unwrap(), -3);
        assert_eq!(usize_trans().termify(&12), Term::leaf("12"));
        assert!(int_trans().check(&Term::leaf("1.5")).is_err());
    }

    #[test]
    fn test_bool_spellings() {
        let t = bool_trans();
        for yes in ["true", "yes", "⊤"] {
            assert!(t.check(&Term::leaf(yes)).unwrap());
        }
        for no in ["false", "no", "⟂"] {
            assert!(!t.check(&Term::leaf(no)).unwrap());
        }
        assert!(t.check(&Term::leaf("maybe")).is_err());
        assert_eq!(t.termify(&true), Term::leaf("true"));
    }

    #[test]
    fn test_datetime() {
        let t = datetime_trans();
        let when = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let term = t.termify(&when);
        assert_eq!(term, Term::leaf("2024-01-15T10:30:00Z"));
        assert_eq!(t.check(&term).unwrap(), when);
        assert!(t.check(&Term::leaf("yesterday")).is_err());
    }

    #[test]
    fn test_bigint() {
        let t = bigint_trans();
        let text = "123456789012345678901234567890";
        let n = t.check(&Term::leaf(text)).unwrap();
        assert_eq!(t.termify(&n), Term::leaf(text));
        assert!(t.check(&Term::leaf("12x")).is_err());
    }
}
