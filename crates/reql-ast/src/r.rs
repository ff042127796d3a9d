//! Top-level query constructors, the entry points of the fluent DSL.
//!
//! ```rust,ignore
//! use reql_ast::r;
//!
//! let adults = r::db("app").table("users").filter(r::row().get_field("age").ge(18));
//! ```

use reql_error::Result;

use crate::func::Var;
use crate::{Arguments, Datum, OptArgs, Term, TermType};

fn leaf(tag: TermType) -> Term {
    Term::fixed(tag, Arguments::new(), None)
}

fn unary(tag: TermType, arg: impl Into<Term>) -> Term {
    Term::fixed(tag, Arguments::from(arg.into()), None)
}

/// Coerces any statically typed value into a term.
pub fn expr(value: impl Into<Term>) -> Term {
    value.into()
}

pub fn null() -> Term {
    Term::literal(Datum::Null)
}

/// `MAKE_ARRAY` from heterogeneous items.
pub fn array(items: impl Into<Arguments>) -> Term {
    Term::fixed(TermType::MakeArray, items.into(), None)
}

/// `MAKE_OBJ` from an option map.
pub fn object(entries: OptArgs) -> Term {
    Term::from(entries)
}

pub fn db(name: impl Into<Term>) -> Term {
    unary(TermType::Db, name)
}

/// A table in the connection's default database.
pub fn table(name: impl Into<Term>) -> Term {
    unary(TermType::Table, name)
}

pub fn db_create(name: impl Into<Term>) -> Term {
    unary(TermType::DbCreate, name)
}

pub fn db_drop(name: impl Into<Term>) -> Term {
    unary(TermType::DbDrop, name)
}

pub fn db_list() -> Term {
    leaf(TermType::DbList)
}

/// `r.row`, the implicit parameter of the innermost function.
pub fn row() -> Term {
    leaf(TermType::ImplicitVar)
}

pub fn var(var: Var) -> Term {
    var.term()
}

/// `BRANCH`: `test`, `then`, `otherwise`.
pub fn branch(test: impl Into<Term>, then: impl Into<Term>, otherwise: impl Into<Term>) -> Term {
    Term::fixed(
        TermType::Branch,
        Arguments::from([test.into(), then.into(), otherwise.into()]),
        None,
    )
}

/// `FUNCALL`: the function goes first on the wire, followed by its
/// arguments.
pub fn do_(args: impl Into<Arguments>, func: impl Into<Term>) -> Term {
    Term::fixed(TermType::Funcall, args.into().prepend(func.into()), None)
}

/// Server-side JavaScript, optionally with a `timeout` in seconds.
pub fn js(source: impl Into<String>, timeout: Option<f64>) -> Result<Term> {
    let code = unary(TermType::Javascript, source.into());
    match timeout {
        Some(secs) => code.with_opt("timeout", secs),
        None => Ok(code),
    }
}

pub fn error(message: impl Into<Term>) -> Term {
    unary(TermType::Error, message)
}

pub fn now() -> Term {
    leaf(TermType::Now)
}

pub fn uuid() -> Term {
    leaf(TermType::Uuid)
}

/// Deterministic UUID derived from `name` on the server.
pub fn uuid_from(name: impl Into<Term>) -> Term {
    unary(TermType::Uuid, name)
}

pub fn asc(key: impl Into<Term>) -> Term {
    unary(TermType::Asc, key)
}

pub fn desc(key: impl Into<Term>) -> Term {
    unary(TermType::Desc, key)
}

pub fn literal(value: impl Into<Term>) -> Term {
    unary(TermType::Literal, value)
}

pub fn json(text: impl Into<Term>) -> Term {
    unary(TermType::Json, text)
}

pub fn iso8601(text: impl Into<Term>) -> Term {
    unary(TermType::Iso8601, text)
}

pub fn epoch_time(seconds: impl Into<Term>) -> Term {
    unary(TermType::EpochTime, seconds)
}

/// `RANGE` with zero, one or two bounds.
pub fn range(bounds: impl Into<Arguments>) -> Result<Term> {
    Term::node(TermType::Range, bounds)
}

pub fn minval() -> Term {
    leaf(TermType::Minval)
}

pub fn maxval() -> Term {
    leaf(TermType::Maxval)
}

/// Splices an array term into the argument list of its parent on the server.
pub fn args(array: impl Into<Term>) -> Term {
    unary(TermType::Args, array)
}
