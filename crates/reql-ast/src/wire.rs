//! The JSON wire form of a term tree.
//!
//! - literal: the raw JSON scalar
//! - `MAKE_OBJ`: a plain JSON object of its serialized options
//! - any other node: `[code, [args...]]`, plus a third element `{opts}` when
//!   the node has at least one option
//!
//! `MAKE_ARRAY` keeps the tuple form `[2, [...]]`; a bare JSON array would be
//! read back as a term tuple.

use reql_error::{DecodeError, IterResultExt, Result, SerializationError};
use serde_json::{Map, Value};

use crate::config::WireConfig;
use crate::{Arguments, Datum, Number, OptArgs, Term, TermType};

/// Converts a term tree into its wire value. Never mutates the tree.
pub fn serialize(term: &Term) -> Result<Value> {
    let _span = tracing::trace_span!("serialize", root = term.tag().name()).entered();
    encode(term).map_err(|e| {
        tracing::debug!(error = %e, "term serialization failed");
        e.into()
    })
}

impl Term {
    /// Same as [`serialize`].
    pub fn to_wire(&self) -> Result<Value> {
        serialize(self)
    }
}

/// Compact JSON text of the wire value.
pub fn to_string(term: &Term) -> Result<String> {
    to_string_with(term, &WireConfig::default())
}

pub fn to_string_with(term: &Term, config: &WireConfig) -> Result<String> {
    let value = serialize(term)?;
    let text = if config.pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    };
    text.map_err(|e| SerializationError::Json(e.to_string()).into())
}

enum Step<'a> {
    Visit(&'a Term),
    Build {
        tag: TermType,
        args: usize,
        opts: Option<&'a OptArgs>,
    },
}

/// Post-order walk with an explicit stack: children are encoded onto `done`
/// in wire order, then their parent pops them back off.
fn encode(root: &Term) -> Result<Value, SerializationError> {
    let mut todo = vec![Step::Visit(root)];
    let mut done: Vec<Value> = Vec::new();

    while let Some(step) = todo.pop() {
        match step {
            Step::Visit(term) => {
                if let Some(datum) = term.datum() {
                    done.push(datum.to_wire()?);
                    continue;
                }
                let tag = term.tag();
                let (args, opts) = if tag == TermType::MakeObj {
                    (&[][..], term.optargs())
                } else {
                    (term.args(), term.optargs().filter(|opts| !opts.is_empty()))
                };
                todo.push(Step::Build {
                    tag,
                    args: args.len(),
                    opts,
                });
                let values = opts.into_iter().flat_map(|opts| opts.iter()).map(|(_, v)| v);
                let children: Vec<&Term> = args.iter().chain(values).collect();
                todo.extend(children.into_iter().rev().map(Step::Visit));
            }
            Step::Build { tag, args, opts } => {
                let arity = args + opts.map_or(0, OptArgs::len);
                let mut values = done.split_off(done.len() - arity).into_iter();
                let args: Vec<Value> = values.by_ref().take(args).collect();
                let opts = opts.map(|opts| {
                    opts.keys()
                        .map(str::to_owned)
                        .zip(values)
                        .collect::<Map<String, Value>>()
                });
                done.push(match (tag, opts) {
                    (TermType::MakeObj, opts) => Value::Object(opts.unwrap_or_default()),
                    (tag, None) => Value::Array(vec![Value::from(tag.code()), Value::Array(args)]),
                    (tag, Some(opts)) => Value::Array(vec![
                        Value::from(tag.code()),
                        Value::Array(args),
                        Value::Object(opts),
                    ]),
                });
            }
        }
    }

    Ok(done.pop().unwrap_or(Value::Null))
}

/// Parses a wire value back into a term tree.
///
/// Every compound node goes through [`Term::new`] again, so a payload that
/// violates the catalog is rejected with the same error a builder would get.
pub fn deserialize(value: &Value) -> Result<Term> {
    match value {
        Value::Null => Ok(Term::literal(Datum::Null)),
        Value::Bool(b) => Ok(Term::from(*b)),
        Value::Number(n) => Ok(Term::literal(Datum::Number(Number::from_json(n)))),
        Value::String(s) => Ok(Term::from(s.as_str())),
        Value::Object(map) => {
            let entries = map
                .iter()
                .map(|(k, v)| Ok::<_, reql_error::Error>((k.clone(), deserialize(v)?)))
                .collect_ok()?;
            Ok(Term::from(entries.into_iter().collect::<OptArgs>()))
        }
        Value::Array(items) => {
            let (tag, args, opts) = split_tuple(items)?;
            let args = args
                .iter()
                .map(deserialize)
                .collect_ok()
                .map(Arguments::from)?;
            let opts = opts
                .map(|map| {
                    map.iter()
                        .map(|(k, v)| Ok::<_, reql_error::Error>((k.clone(), deserialize(v)?)))
                        .collect_ok()
                        .map(|entries| entries.into_iter().collect::<OptArgs>())
                })
                .transpose()?;
            Term::new(tag, args, opts)
        }
    }
}

/// Collapses the literal wire forms of a decoded payload into plain JSON.
///
/// `[2, [...]]` becomes an array and objects are walked recursively. Any
/// other term tuple is not a literal and is rejected.
pub fn decode_literal(value: &Value) -> Result<Value> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| Ok::<_, reql_error::Error>((k.clone(), decode_literal(v)?)))
            .collect::<Result<Map<_, _>>>()
            .map(Value::Object),
        Value::Array(items) => {
            let (tag, args, opts) = split_tuple(items)?;
            match tag {
                TermType::MakeArray if opts.is_none() => args
                    .iter()
                    .map(decode_literal)
                    .collect::<Result<Vec<_>>>()
                    .map(Value::Array),
                TermType::MakeObj if args.is_empty() => {
                    decode_literal(&Value::Object(opts.cloned().unwrap_or_default()))
                }
                other => Err(DecodeError::NotLiteral {
                    term: other.name().to_owned(),
                }
                .into()),
            }
        }
        scalar => Ok(scalar.clone()),
    }
}

type Tuple<'a> = (TermType, &'a [Value], Option<&'a Map<String, Value>>);

fn split_tuple(items: &[Value]) -> Result<Tuple<'_>> {
    let malformed = |msg: &str| -> reql_error::Error { DecodeError::Malformed(msg.to_owned()).into() };

    let (code, rest) = items
        .split_first()
        .ok_or_else(|| malformed("empty term tuple"))?;
    let code = code
        .as_i64()
        .ok_or_else(|| malformed("term tuple must start with an integer code"))?;
    let tag = TermType::from_code(code).ok_or(DecodeError::UnknownTermType(code))?;

    match rest {
        [Value::Array(args)] => Ok((tag, args.as_slice(), None)),
        [Value::Array(args), Value::Object(opts)] => Ok((tag, args.as_slice(), Some(opts))),
        _ => Err(malformed(&format!(
            "{} tuple must be [code, [args]] or [code, [args], {{opts}}]",
            tag.name()
        ))),
    }
}
