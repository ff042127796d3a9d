use reql_error::CoercionError;
use serde::ser::{self, Impossible, Serialize};

use super::{make_array, make_obj};
use crate::{Datum, OptArgs, Term};

type Result<T> = std::result::Result<T, CoercionError>;

/// A `serde::Serializer` whose output is a [`Term`].
///
/// `remaining` counts how many more container levels may be opened; it is
/// decremented for the elements of every sequence, map, struct or variant
/// payload.
#[derive(Debug, Clone, Copy)]
pub struct TermSerializer {
    remaining: usize,
    limit: usize,
}

impl TermSerializer {
    pub fn new(max_nesting_depth: usize) -> Self {
        Self {
            remaining: max_nesting_depth,
            limit: max_nesting_depth,
        }
    }

    fn nested(self) -> Result<Self> {
        match self.remaining.checked_sub(1) {
            Some(remaining) => Ok(Self { remaining, ..self }),
            None => Err(CoercionError::DepthExceeded { limit: self.limit }),
        }
    }

    fn wrap_variant(self, variant: &'static str, payload: Term) -> Term {
        make_obj(OptArgs::of(variant, payload))
    }
}

impl ser::Serializer for TermSerializer {
    type Ok = Term;
    type Error = CoercionError;

    type SerializeSeq = SeqBuilder;
    type SerializeTuple = SeqBuilder;
    type SerializeTupleStruct = SeqBuilder;
    type SerializeTupleVariant = SeqBuilder;
    type SerializeMap = MapBuilder;
    type SerializeStruct = MapBuilder;
    type SerializeStructVariant = MapBuilder;

    fn serialize_bool(self, v: bool) -> Result<Term> {
        Ok(Term::from(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Term> {
        Ok(Term::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Term> {
        Ok(Term::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Term> {
        Ok(Term::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Term> {
        Ok(Term::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Term> {
        i64::try_from(v)
            .map(Term::from)
            .or_else(|_| u64::try_from(v).map(Term::from))
            .map_err(|_| CoercionError::IntegerOverflow {
                value: v.to_string(),
            })
    }

    fn serialize_u8(self, v: u8) -> Result<Term> {
        Ok(Term::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Term> {
        Ok(Term::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Term> {
        Ok(Term::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Term> {
        Ok(Term::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Term> {
        u64::try_from(v)
            .map(Term::from)
            .map_err(|_| CoercionError::IntegerOverflow {
                value: v.to_string(),
            })
    }

    fn serialize_f32(self, v: f32) -> Result<Term> {
        Ok(Term::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Term> {
        Ok(Term::from(v))
    }

    fn serialize_char(self, v: char) -> Result<Term> {
        Ok(Term::from(v))
    }

    fn serialize_str(self, v: &str) -> Result<Term> {
        Ok(Term::from(v))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Term> {
        Err(CoercionError::Unsupported {
            shape: "byte buffer".into(),
        })
    }

    fn serialize_none(self) -> Result<Term> {
        Ok(Term::literal(Datum::Null))
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Term> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Term> {
        Ok(Term::literal(Datum::Null))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Term> {
        Ok(Term::literal(Datum::Null))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> Result<Term> {
        Ok(Term::from(variant))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Term> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Term> {
        let payload = value.serialize(self.nested()?)?;
        Ok(self.wrap_variant(variant, payload))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqBuilder> {
        SeqBuilder::start(self, len, None)
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqBuilder> {
        SeqBuilder::start(self, Some(len), None)
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SeqBuilder> {
        SeqBuilder::start(self, Some(len), None)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SeqBuilder> {
        // the payload sits one level below the variant wrapper
        SeqBuilder::start(self.nested()?, Some(len), Some((self, variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<MapBuilder> {
        MapBuilder::start(self, None)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<MapBuilder> {
        MapBuilder::start(self, None)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<MapBuilder> {
        MapBuilder::start(self.nested()?, Some((self, variant)))
    }
}

/// Collects sequence elements into a `MAKE_ARRAY` term.
pub struct SeqBuilder {
    element: TermSerializer,
    items: Vec<Term>,
    variant: Option<(TermSerializer, &'static str)>,
}

impl SeqBuilder {
    fn start(
        outer: TermSerializer,
        len: Option<usize>,
        variant: Option<(TermSerializer, &'static str)>,
    ) -> Result<Self> {
        Ok(Self {
            element: outer.nested()?,
            items: Vec::with_capacity(len.unwrap_or(0)),
            variant,
        })
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.items.push(value.serialize(self.element)?);
        Ok(())
    }

    fn finish(self) -> Result<Term> {
        let array = make_array(self.items);
        Ok(match self.variant {
            Some((outer, name)) => outer.wrap_variant(name, array),
            None => array,
        })
    }
}

impl ser::SerializeSeq for SeqBuilder {
    type Ok = Term;
    type Error = CoercionError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Term> {
        self.finish()
    }
}

impl ser::SerializeTuple for SeqBuilder {
    type Ok = Term;
    type Error = CoercionError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Term> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for SeqBuilder {
    type Ok = Term;
    type Error = CoercionError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Term> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for SeqBuilder {
    type Ok = Term;
    type Error = CoercionError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Term> {
        self.finish()
    }
}

/// Collects map entries and struct fields into a `MAKE_OBJ` term.
pub struct MapBuilder {
    value: TermSerializer,
    entries: OptArgs,
    pending_key: Option<String>,
    variant: Option<(TermSerializer, &'static str)>,
}

impl MapBuilder {
    fn start(outer: TermSerializer, variant: Option<(TermSerializer, &'static str)>) -> Result<Self> {
        Ok(Self {
            value: outer.nested()?,
            entries: OptArgs::new(),
            pending_key: None,
            variant,
        })
    }

    fn insert<T: ?Sized + Serialize>(&mut self, key: String, value: &T) -> Result<()> {
        let value = value.serialize(self.value)?;
        self.entries = std::mem::take(&mut self.entries).with(key, value);
        Ok(())
    }

    fn finish(self) -> Result<Term> {
        let object = make_obj(self.entries);
        Ok(match self.variant {
            Some((outer, name)) => outer.wrap_variant(name, object),
            None => object,
        })
    }
}

impl ser::SerializeMap for MapBuilder {
    type Ok = Term;
    type Error = CoercionError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<()> {
        self.pending_key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| CoercionError::Custom("map value serialized before its key".into()))?;
        self.insert(key, value)
    }

    fn end(self) -> Result<Term> {
        self.finish()
    }
}

impl ser::SerializeStruct for MapBuilder {
    type Ok = Term;
    type Error = CoercionError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        self.insert(key.to_owned(), value)
    }

    fn end(self) -> Result<Term> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for MapBuilder {
    type Ok = Term;
    type Error = CoercionError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        self.insert(key.to_owned(), value)
    }

    fn end(self) -> Result<Term> {
        self.finish()
    }
}

/// Accepts only string-like map keys.
struct KeySerializer;

fn non_string_key(shape: &str) -> CoercionError {
    CoercionError::NonStringKey {
        shape: shape.to_owned(),
    }
}

impl ser::Serializer for KeySerializer {
    type Ok = String;
    type Error = CoercionError;

    type SerializeSeq = Impossible<String, CoercionError>;
    type SerializeTuple = Impossible<String, CoercionError>;
    type SerializeTupleStruct = Impossible<String, CoercionError>;
    type SerializeTupleVariant = Impossible<String, CoercionError>;
    type SerializeMap = Impossible<String, CoercionError>;
    type SerializeStruct = Impossible<String, CoercionError>;
    type SerializeStructVariant = Impossible<String, CoercionError>;

    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(v.to_owned())
    }

    fn serialize_char(self, v: char) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> Result<String> {
        Ok(variant.to_owned())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String> {
        value.serialize(self)
    }

    fn serialize_bool(self, _v: bool) -> Result<String> {
        Err(non_string_key("bool"))
    }

    fn serialize_i8(self, _v: i8) -> Result<String> {
        Err(non_string_key("integer"))
    }

    fn serialize_i16(self, _v: i16) -> Result<String> {
        Err(non_string_key("integer"))
    }

    fn serialize_i32(self, _v: i32) -> Result<String> {
        Err(non_string_key("integer"))
    }

    fn serialize_i64(self, _v: i64) -> Result<String> {
        Err(non_string_key("integer"))
    }

    fn serialize_u8(self, _v: u8) -> Result<String> {
        Err(non_string_key("integer"))
    }

    fn serialize_u16(self, _v: u16) -> Result<String> {
        Err(non_string_key("integer"))
    }

    fn serialize_u32(self, _v: u32) -> Result<String> {
        Err(non_string_key("integer"))
    }

    fn serialize_u64(self, _v: u64) -> Result<String> {
        Err(non_string_key("integer"))
    }

    fn serialize_f32(self, _v: f32) -> Result<String> {
        Err(non_string_key("float"))
    }

    fn serialize_f64(self, _v: f64) -> Result<String> {
        Err(non_string_key("float"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String> {
        Err(non_string_key("byte buffer"))
    }

    fn serialize_none(self) -> Result<String> {
        Err(non_string_key("null"))
    }

    fn serialize_some<T: ?Sized + Serialize>(self, _value: &T) -> Result<String> {
        Err(non_string_key("optional value"))
    }

    fn serialize_unit(self) -> Result<String> {
        Err(non_string_key("unit"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<String> {
        Err(non_string_key(name))
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        name: &'static str,
        _index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String> {
        Err(non_string_key(name))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(non_string_key("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(non_string_key("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(non_string_key(name))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(non_string_key(name))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(non_string_key("map"))
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(non_string_key(name))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(non_string_key(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::{to_term, to_term_with};
    use crate::config::CoercionConfig;
    use crate::TermType;
    use reql_error::Error;
    use serde::Serialize;
    use std::collections::HashMap;

    #[derive(Serialize)]
    struct User {
        name: &'static str,
        age: u32,
        tags: Vec<&'static str>,
        nickname: Option<String>,
    }

    #[derive(Serialize)]
    enum Shape {
        Point,
        Circle(f64),
        Rect { w: u8, h: u8 },
        Pair(i8, i8),
    }

    fn depth(limit: usize) -> CoercionConfig {
        CoercionConfig {
            max_nesting_depth: limit,
        }
    }

    #[test]
    fn structs_become_objects() {
        let user = User {
            name: "ada",
            age: 36,
            tags: vec!["admin"],
            nickname: None,
        };
        let t = to_term(&user).unwrap();
        assert_eq!(t.tag(), TermType::MakeObj);
        let opts = t.optargs().unwrap();
        assert_eq!(opts.get("name"), Some(&Term::from("ada")));
        assert_eq!(opts.get("age"), Some(&Term::from(36u32)));
        assert_eq!(opts.get("tags"), Some(&Term::from(vec!["admin"])));
        assert_eq!(opts.get("nickname"), Some(&Term::literal(Datum::Null)));
    }

    #[test]
    fn enum_variants_follow_externally_tagged_layout() {
        assert_eq!(to_term(&Shape::Point).unwrap(), Term::from("Point"));

        let circle = to_term(&Shape::Circle(1.5)).unwrap();
        assert_eq!(circle, Term::from(OptArgs::of("Circle", 1.5)));

        let rect = to_term(&Shape::Rect { w: 2, h: 3 }).unwrap();
        let inner = OptArgs::of("w", 2u8).with("h", 3u8);
        assert_eq!(rect, Term::from(OptArgs::of("Rect", Term::from(inner))));

        let pair = to_term(&Shape::Pair(1, -1)).unwrap();
        assert_eq!(pair, Term::from(OptArgs::of("Pair", Term::from(vec![1i8, -1]))));
    }

    #[test]
    fn byte_buffers_are_unsupported() {
        struct Raw;
        impl Serialize for Raw {
            fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
                s.serialize_bytes(&[1, 2, 3])
            }
        }
        let err = to_term(&Raw).unwrap_err();
        assert_eq!(
            err,
            Error::Coercion(CoercionError::Unsupported {
                shape: "byte buffer".into()
            })
        );
    }

    #[test]
    fn non_string_keys_are_rejected() {
        let mut map = HashMap::new();
        map.insert(1u32, "one");
        let err = to_term(&map).unwrap_err();
        assert_eq!(
            err,
            Error::Coercion(CoercionError::NonStringKey {
                shape: "integer".into()
            })
        );
    }

    #[test]
    fn wide_integers_must_fit_64_bits() {
        assert_eq!(to_term(&(i64::MAX as i128)).unwrap(), Term::from(i64::MAX));
        assert!(to_term(&(u128::MAX)).is_err());
    }

    #[test]
    fn positive_i128_above_i64_uses_the_unsigned_range() {
        let big = 1i128 << 63;
        assert_eq!(to_term(&big).unwrap(), Term::from(1u64 << 63));
        assert_eq!(to_term(&(u64::MAX as i128)).unwrap(), Term::from(u64::MAX));

        let err = to_term(&(u64::MAX as i128 + 1)).unwrap_err();
        assert_eq!(
            err,
            Error::Coercion(CoercionError::IntegerOverflow {
                value: "18446744073709551616".into()
            })
        );
        assert!(to_term(&i128::MIN).is_err());
    }

    #[test]
    fn nesting_limit_counts_container_levels() {
        let nested = vec![vec![vec![1]]];
        assert!(to_term_with(&nested, &depth(3)).is_ok());
        let err = to_term_with(&nested, &depth(2)).unwrap_err();
        assert_eq!(
            err,
            Error::Coercion(CoercionError::DepthExceeded { limit: 2 })
        );
        assert!(to_term_with(&5, &depth(0)).is_ok());
    }
}
