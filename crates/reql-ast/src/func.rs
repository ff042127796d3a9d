//! Function literals (`FUNC`) and their parameter placeholders.
//!
//! A function literal serializes as `[69, [[2, [ids...]], body]]`. Parameter
//! ids come from a [`VarCounter`] owned by whoever is building the query and
//! passed down explicitly. Nested functions share the counter, so an id is
//! never handed out twice while an enclosing function is still being built.

use reql_error::Result;

use crate::coerce::make_array;
use crate::{Arguments, Term, TermType};

/// Monotonic allocator of parameter ids, starting at 1.
#[derive(Debug, Default)]
pub struct VarCounter {
    last: u64,
}

impl VarCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the next unused id.
    pub fn fresh(&mut self) -> Var {
        self.last += 1;
        Var(self.last)
    }

    /// Number of ids handed out so far.
    pub fn allocated(&self) -> u64 {
        self.last
    }
}

/// Placeholder for a function parameter.
///
/// `Var` is `Copy`: every conversion into a [`Term`] produces a fresh
/// `VAR` node, so a parameter can be used any number of times in a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var(u64);

impl Var {
    pub fn id(self) -> u64 {
        self.0
    }

    pub fn term(self) -> Term {
        Term::from(self)
    }
}

impl From<Var> for Term {
    fn from(var: Var) -> Self {
        Term::fixed(TermType::Var, Arguments::from(Term::from(var.0)), None)
    }
}

/// Builds a `FUNC` with `N` parameters.
///
/// `body` receives the counter (for nested functions) and the parameters,
/// and returns anything coercible into a term.
///
/// ```rust,ignore
/// let mut vars = VarCounter::new();
/// let is_adult = func(&mut vars, |_, [user]| Ok(user.term().get_field("age").ge(18)))?;
/// ```
pub fn func<const N: usize, F, B>(vars: &mut VarCounter, body: F) -> Result<Term>
where
    F: FnOnce(&mut VarCounter, [Var; N]) -> Result<B>,
    B: Into<Term>,
{
    let params: [Var; N] = std::array::from_fn(|_| vars.fresh());
    let body = body(vars, params)?.into();
    Ok(assemble(params.iter().copied(), body))
}

/// Like [`func`] but with a fresh counter, for a function that is the root
/// of its own id space.
pub fn closure<const N: usize, F, B>(body: F) -> Result<Term>
where
    F: FnOnce(&mut VarCounter, [Var; N]) -> Result<B>,
    B: Into<Term>,
{
    func(&mut VarCounter::new(), body)
}

/// Builds a `FUNC` from already allocated parameters and a finished body.
pub fn from_parts(params: &[Var], body: impl Into<Term>) -> Term {
    assemble(params.iter().copied(), body.into())
}

fn assemble(params: impl Iterator<Item = Var>, body: Term) -> Term {
    let ids = make_array(params.map(|v| Term::from(v.0)).collect());
    Term::fixed(TermType::Func, Arguments::from([ids, body]), None)
}

impl Term {
    /// Wraps a term that uses `r.row` into a one-parameter function, leaving
    /// any other term untouched.
    pub fn wrap_implicit(self, vars: &mut VarCounter) -> Term {
        if self.contains_implicit_var() {
            let row = vars.fresh();
            from_parts(&[row], self)
        } else {
            self
        }
    }
}
