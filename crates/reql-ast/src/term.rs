//! The term node every query is built from.

use std::fmt;

use itertools::Itertools;
use reql_error::{ConstructionError, Result};

use crate::{Arguments, Datum, OptArgs, TermType};

/// One node of an immutable query expression tree.
///
/// A term is either a literal [`Datum`] or a compound node made of a tag,
/// ordered arguments and optional keyword options. Children are owned: a
/// term moved into a parent cannot be attached anywhere else, and `clone`
/// produces an independent deep copy rather than a shared reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Term(Repr);

#[derive(Debug, Clone, PartialEq)]
enum Repr {
    Datum(Datum),
    Node {
        tag: TermType,
        args: Arguments,
        optargs: Option<OptArgs>,
    },
}

impl Term {
    /// Builds a compound node, validating it against the catalog.
    ///
    /// Fails when the argument count is outside `tag.arity()`, when options
    /// are given to a kind that takes none, or when `tag` is `DATUM` (literals
    /// only come from coercion). Options passed as `Some(empty)` to a kind
    /// without options are treated as absent.
    pub fn new(
        tag: TermType,
        args: impl Into<Arguments>,
        optargs: Option<OptArgs>,
    ) -> Result<Self> {
        let args = args.into();
        if tag == TermType::Datum {
            return Err(ConstructionError::NotConstructible { term: tag.name() }.into());
        }

        let arity = tag.arity();
        if !arity.accepts(args.len()) {
            tracing::debug!(term = tag.name(), got = args.len(), "arity check failed");
            return Err(ConstructionError::Arity {
                term: tag.name(),
                min: arity.min,
                max: arity.max,
                got: args.len(),
            }
            .into());
        }

        let optargs = match optargs {
            Some(opts) if !tag.accepts_optargs() => {
                if !opts.is_empty() {
                    tracing::debug!(
                        term = tag.name(),
                        keys = %opts.keys().join(", "),
                        "options given to a kind without options"
                    );
                    return Err(ConstructionError::OptArgsNotAccepted {
                        term: tag.name(),
                        keys: opts.keys().map(str::to_owned).collect(),
                    }
                    .into());
                }
                None
            }
            other => other,
        };

        Ok(Self(Repr::Node { tag, args, optargs }))
    }

    /// Shorthand for [`Term::new`] without options.
    pub fn node(tag: TermType, args: impl Into<Arguments>) -> Result<Self> {
        Self::new(tag, args, None)
    }

    /// Wraps a literal.
    pub fn literal(datum: Datum) -> Self {
        Self(Repr::Datum(datum))
    }

    /// Builds a node whose shape is guaranteed by the caller's signature.
    ///
    /// Used by the fluent combinators, whose parameter lists already match
    /// the catalog arity.
    pub(crate) fn fixed(tag: TermType, args: Arguments, optargs: Option<OptArgs>) -> Self {
        debug_assert!(
            tag.arity().accepts(args.len()),
            "{tag} built with {} arguments",
            args.len()
        );
        debug_assert!(optargs.is_none() || tag.accepts_optargs());
        Self(Repr::Node { tag, args, optargs })
    }

    /// Makes a new node of kind `tag` whose first argument is `self`,
    /// followed by `extra`.
    ///
    /// `self` is moved into the result; the returned tree is the only owner.
    pub fn extend(self, tag: TermType, extra: impl Into<Arguments>) -> Result<Self> {
        Self::new(tag, extra.into().prepend(self), None)
    }

    /// Same node with one more option.
    pub fn with_opt(self, key: impl Into<String>, value: impl Into<Term>) -> Result<Self> {
        self.with_optargs(OptArgs::of(key, value))
    }

    /// Same node with `extra` merged over its current options.
    ///
    /// An empty `extra` returns the node unchanged, matching how
    /// [`Term::new`] treats empty options.
    pub fn with_optargs(mut self, extra: OptArgs) -> Result<Self> {
        if extra.is_empty() {
            return Ok(self);
        }
        let tag = self.tag();
        match &mut self.0 {
            Repr::Node { optargs, .. } if tag.accepts_optargs() => {
                let merged = optargs
                    .take()
                    .unwrap_or_default()
                    .into_iter()
                    .chain(extra)
                    .collect();
                *optargs = Some(merged);
                Ok(self)
            }
            _ => Err(ConstructionError::OptArgsNotAccepted {
                term: tag.name(),
                keys: extra.keys().map(str::to_owned).collect(),
            }
            .into()),
        }
    }

    pub fn tag(&self) -> TermType {
        match &self.0 {
            Repr::Datum(_) => TermType::Datum,
            Repr::Node { tag, .. } => *tag,
        }
    }

    /// Child terms; empty for literals.
    pub fn args(&self) -> &[Term] {
        match &self.0 {
            Repr::Datum(_) => &[],
            Repr::Node { args, .. } => args,
        }
    }

    pub fn optargs(&self) -> Option<&OptArgs> {
        match &self.0 {
            Repr::Datum(_) => None,
            Repr::Node { optargs, .. } => optargs.as_ref(),
        }
    }

    pub fn datum(&self) -> Option<&Datum> {
        match &self.0 {
            Repr::Datum(d) => Some(d),
            Repr::Node { .. } => None,
        }
    }

    pub fn is_datum(&self) -> bool {
        matches!(self.0, Repr::Datum(_))
    }

    /// Whether `r.row` appears anywhere in this tree.
    pub fn contains_implicit_var(&self) -> bool {
        let mut pending = vec![self];
        while let Some(term) = pending.pop() {
            if term.tag() == TermType::ImplicitVar {
                return true;
            }
            pending.extend(term.children());
        }
        false
    }

    /// Arguments followed by option values, in wire order.
    pub(crate) fn children(&self) -> impl Iterator<Item = &Term> {
        let opts = self.optargs().into_iter().flat_map(|opts| opts.iter());
        self.args().iter().chain(opts.map(|(_, v)| v))
    }

    /// Moves the children of `self` into `into`, leaving `self` childless.
    fn detach_children(&mut self, into: &mut Vec<Term>) {
        if let Repr::Node { args, optargs, .. } = &mut self.0 {
            into.extend(std::mem::take(args));
            if let Some(opts) = optargs.take() {
                into.extend(opts.into_iter().map(|(_, v)| v));
            }
        }
    }
}

// Chained trees can outgrow the call stack; release them level by level.
impl Drop for Term {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut term) = pending.pop() {
            term.detach_children(&mut pending);
        }
    }
}

enum Piece<'a> {
    Term(&'a Term),
    Text(String),
}

/// Compact, ReQL-like rendering used in logs and assertion messages,
/// e.g. `FILTER(TABLE("users"), true, default=false)`.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = vec![Piece::Term(self)];
        while let Some(piece) = pending.pop() {
            let term = match piece {
                Piece::Text(text) => {
                    f.write_str(&text)?;
                    continue;
                }
                Piece::Term(term) => term,
            };
            let (tag, args, optargs) = match &term.0 {
                Repr::Datum(d) => {
                    write!(f, "{d}")?;
                    continue;
                }
                Repr::Node { tag, args, optargs } => (*tag, args, optargs),
            };

            let opts = optargs.iter().flat_map(|opts| opts.iter());
            let (open, close, entries): (String, &str, Vec<(Option<String>, &Term)>) = match tag {
                TermType::MakeArray => ("[".into(), "]", args.iter().map(|a| (None, a)).collect()),
                TermType::MakeObj => (
                    "{".into(),
                    "}",
                    opts.map(|(k, v)| (Some(format!("{k:?}: ")), v)).collect(),
                ),
                _ => (
                    format!("{}(", tag.name()),
                    ")",
                    args.iter()
                        .map(|a| (None, a))
                        .chain(opts.map(|(k, v)| (Some(format!("{k}=")), v)))
                        .collect(),
                ),
            };

            let mut parts = vec![Piece::Text(open)];
            for (i, (label, child)) in entries.into_iter().enumerate() {
                if i > 0 {
                    parts.push(Piece::Text(", ".into()));
                }
                parts.extend(label.map(Piece::Text));
                parts.push(Piece::Term(child));
            }
            parts.push(Piece::Text(close.to_owned()));
            pending.extend(parts.into_iter().rev());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{args, optargs};
    use reql_error::Error;

    #[test]
    fn exact_arity_rejects_missing_argument() {
        let err = Term::node(TermType::Db, args![]).unwrap_err();
        assert_eq!(
            err,
            Error::Construction(ConstructionError::Arity {
                term: "DB",
                min: 1,
                max: Some(1),
                got: 0
            })
        );
        assert!(Term::node(TermType::Db, args!["test"]).is_ok());
    }

    #[test]
    fn range_arity_is_inclusive() {
        assert!(Term::node(TermType::Table, args!["a"]).is_ok());
        assert!(Term::node(TermType::Table, args!["a", "b"]).is_ok());
        assert!(Term::node(TermType::Table, args!["a", "b", "c"]).is_err());
    }

    #[test]
    fn datum_is_not_constructible_directly() {
        let err = Term::node(TermType::Datum, args![]).unwrap_err();
        assert!(err.is_construction());
    }

    #[test]
    fn options_are_refused_where_the_kind_takes_none() {
        let err = Term::new(TermType::Func, args![[0i64; 0], 1], Some(optargs! { "x" => 1 }))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Construction(ConstructionError::OptArgsNotAccepted { term: "FUNC", .. })
        ));

        let empty = Term::new(TermType::Not, args![true], Some(OptArgs::new())).unwrap();
        assert_eq!(empty.optargs(), None);
    }

    #[test]
    fn extend_places_receiver_first() {
        let table = Term::node(TermType::Table, args!["users"]).unwrap();
        let before = table.clone();
        let limited = table.clone().extend(TermType::Limit, args![10]).unwrap();

        assert_eq!(table, before);
        assert_eq!(limited.tag(), TermType::Limit);
        assert_eq!(limited.args()[0], table);
        assert_eq!(limited.args()[1], Term::from(10));
    }

    #[test]
    fn extend_validates_the_new_kind() {
        let table = Term::node(TermType::Table, args!["users"]).unwrap();
        assert!(table.extend(TermType::Limit, args![]).is_err());
    }

    #[test]
    fn with_opt_merges_options() {
        let t = Term::node(TermType::Table, args!["users"])
            .unwrap()
            .with_opt("read_mode", "outdated")
            .unwrap()
            .with_opt("identifier_format", "uuid")
            .unwrap();
        let opts = t.optargs().unwrap();
        assert_eq!(opts.len(), 2);
        assert!(Term::from(1).with_opt("k", 1).is_err());
    }

    #[test]
    fn implicit_var_is_found_in_nested_options() {
        let row = Term::node(TermType::ImplicitVar, args![]).unwrap();
        let filtered = Term::node(TermType::Table, args!["t"])
            .unwrap()
            .extend(TermType::Filter, args![true])
            .unwrap();
        assert!(!filtered.contains_implicit_var());
        let with_row = filtered.with_opt("default", row).unwrap();
        assert!(with_row.contains_implicit_var());
    }

    #[test]
    fn display_reads_like_a_query() {
        let t = Term::node(TermType::Table, args!["users"])
            .unwrap()
            .extend(TermType::Filter, args![[1, 2]])
            .unwrap()
            .with_opt("default", false)
            .unwrap();
        assert_eq!(t.to_string(), r#"FILTER(TABLE("users"), [1, 2], default=false)"#);
        assert_eq!(
            Term::from(optargs! { "a" => "x" }).to_string(),
            r#"{"a": "x"}"#
        );
    }

    #[test]
    fn empty_options_are_a_no_op_everywhere() {
        let not = Term::node(TermType::Not, args![true]).unwrap();
        let same = not.clone().with_optargs(OptArgs::new()).unwrap();
        assert_eq!(same, not);
        assert_eq!(same.optargs(), None);

        let table = Term::node(TermType::Table, args!["users"]).unwrap();
        assert_eq!(table.clone().with_optargs(OptArgs::new()).unwrap(), table);
        assert!(not.with_optargs(OptArgs::of("k", 1)).is_err());
    }

    #[test]
    fn children_lists_args_then_option_values() {
        let t = Term::node(TermType::Table, args!["users"])
            .unwrap()
            .with_opt("read_mode", "outdated")
            .unwrap();
        let kids: Vec<_> = t.children().cloned().collect();
        assert_eq!(kids, vec![Term::from("users"), Term::from("outdated")]);
    }
}
