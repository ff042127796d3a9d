//! Turning client values into terms.
//!
//! Statically typed values go through the `From<T> for Term` impls below and
//! cannot fail. Values whose shape is only known at runtime go through
//! [`to_term`], which walks any `serde::Serialize` value and rejects the
//! shapes a term cannot hold.
//!
//! Rules, first match wins: an existing term is moved in untouched; null,
//! booleans, numbers and strings become `DATUM` leaves; sequences become
//! `MAKE_ARRAY`; mappings become `MAKE_OBJ`; functions become `FUNC` (see
//! [`crate::func`]).

mod serializer;

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, TimeZone};
use reql_error::Result;
use serde::Serialize;
use serde_json::Value;

use crate::config::CoercionConfig;
use crate::{Arguments, Datum, Number, OptArgs, Term, TermType};

pub use serializer::TermSerializer;

/// Coerces a runtime-shaped value using the default nesting limit.
pub fn to_term<T: Serialize + ?Sized>(value: &T) -> Result<Term> {
    to_term_with(value, &CoercionConfig::default())
}

/// Coerces a runtime-shaped value with an explicit configuration.
pub fn to_term_with<T: Serialize + ?Sized>(value: &T, config: &CoercionConfig) -> Result<Term> {
    value
        .serialize(TermSerializer::new(config.max_nesting_depth))
        .map_err(|e| {
            tracing::debug!(error = %e, "value coercion failed");
            e.into()
        })
}

pub(crate) fn make_array(items: Vec<Term>) -> Term {
    Term::fixed(TermType::MakeArray, Arguments::from(items), None)
}

pub(crate) fn make_obj(entries: OptArgs) -> Term {
    Term::fixed(TermType::MakeObj, Arguments::new(), Some(entries))
}

impl From<Datum> for Term {
    fn from(datum: Datum) -> Self {
        Term::literal(datum)
    }
}

impl From<bool> for Term {
    fn from(b: bool) -> Self {
        Term::literal(Datum::Bool(b))
    }
}

macro_rules! number_from {
    ($variant:ident as $wide:ty: $($ty:ty),+) => {
        $(
            impl From<$ty> for Term {
                fn from(n: $ty) -> Self {
                    Term::literal(Datum::Number(Number::$variant(n as $wide)))
                }
            }
        )+
    };
}

number_from!(Int as i64: i8, i16, i32, i64, isize);
number_from!(UInt as u64: u8, u16, u32, u64, usize);
number_from!(Float as f64: f32, f64);

impl From<&str> for Term {
    fn from(s: &str) -> Self {
        Term::literal(Datum::String(s.to_owned()))
    }
}

impl From<String> for Term {
    fn from(s: String) -> Self {
        Term::literal(Datum::String(s))
    }
}

impl From<&String> for Term {
    fn from(s: &String) -> Self {
        Term::from(s.as_str())
    }
}

impl From<char> for Term {
    fn from(c: char) -> Self {
        Term::literal(Datum::String(c.to_string()))
    }
}

impl<T: Into<Term>> From<Option<T>> for Term {
    fn from(value: Option<T>) -> Self {
        value.map_or(Term::literal(Datum::Null), Into::into)
    }
}

impl<T: Into<Term>> From<Vec<T>> for Term {
    fn from(items: Vec<T>) -> Self {
        make_array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Term>, const N: usize> From<[T; N]> for Term {
    fn from(items: [T; N]) -> Self {
        make_array(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Term>> From<BTreeMap<K, V>> for Term {
    fn from(map: BTreeMap<K, V>) -> Self {
        make_obj(map.into_iter().collect())
    }
}

impl<K: Into<String>, V: Into<Term>, S> From<HashMap<K, V, S>> for Term {
    fn from(map: HashMap<K, V, S>) -> Self {
        make_obj(map.into_iter().collect())
    }
}

impl From<OptArgs> for Term {
    fn from(entries: OptArgs) -> Self {
        make_obj(entries)
    }
}

impl From<Value> for Term {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Term::literal(Datum::Null),
            Value::Bool(b) => Term::from(b),
            Value::Number(n) => Term::literal(Datum::Number(Number::from_json(&n))),
            Value::String(s) => Term::from(s),
            Value::Array(items) => Term::from(items),
            Value::Object(map) => make_obj(map.into_iter().collect()),
        }
    }
}

/// Date-times become `ISO8601` terms carrying the RFC 3339 text, so the
/// server keeps both the instant and the offset.
impl<Tz> From<DateTime<Tz>> for Term
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    fn from(time: DateTime<Tz>) -> Self {
        Term::fixed(
            TermType::Iso8601,
            Arguments::from(Term::from(time.to_rfc3339())),
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use serde_json::json;

    #[test]
    fn scalars_become_datums() {
        assert_eq!(Term::from(true).datum(), Some(&Datum::Bool(true)));
        assert_eq!(
            Term::from(3u8).datum(),
            Some(&Datum::Number(Number::UInt(3)))
        );
        assert_eq!(
            Term::from(-3i16).datum(),
            Some(&Datum::Number(Number::Int(-3)))
        );
        assert_eq!(
            Term::from(0.5f32).datum(),
            Some(&Datum::Number(Number::Float(0.5)))
        );
        assert_eq!(Term::from('x').datum(), Some(&Datum::String("x".into())));
        assert_eq!(Term::from(None::<i32>).datum(), Some(&Datum::Null));
    }

    #[test]
    fn sequences_keep_order() {
        let t = Term::from(vec!["b", "a", "c"]);
        assert_eq!(t.tag(), TermType::MakeArray);
        let items: Vec<_> = t.args().iter().map(|a| a.datum().cloned()).collect();
        assert_eq!(
            items,
            ["b", "a", "c"]
                .map(|s| Some(Datum::String(s.into())))
                .to_vec()
        );
    }

    #[test]
    fn mappings_become_make_obj_options() {
        let mut map = HashMap::new();
        map.insert("x", 1);
        let t = Term::from(map);
        assert_eq!(t.tag(), TermType::MakeObj);
        assert!(t.args().is_empty());
        assert_eq!(t.optargs().unwrap().get("x"), Some(&Term::from(1)));
    }

    #[test]
    fn coercing_twice_gives_equal_independent_trees() {
        let value = json!({"a": [1, 2.5, "s", null, {"b": false}]});
        let first = Term::from(value.clone());
        let second = Term::from(value);
        assert_eq!(first, second);
    }

    #[test]
    fn json_numbers_keep_their_width() {
        let t = Term::from(json!(u64::MAX));
        assert_eq!(t.datum(), Some(&Datum::Number(Number::UInt(u64::MAX))));
        let t = Term::from(json!(-7));
        assert_eq!(t.datum(), Some(&Datum::Number(Number::Int(-7))));
    }

    #[test]
    fn datetimes_become_iso8601_terms() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let time = offset.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let t = Term::from(time);
        assert_eq!(t.tag(), TermType::Iso8601);
        assert_eq!(t.args()[0], Term::from("2024-03-01T12:30:00+02:00"));

        let utc = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(Term::from(utc).args()[0], Term::from("2024-03-01T00:00:00+00:00"));
    }
}
