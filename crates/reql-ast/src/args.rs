//! Ordered child terms of a node.

use std::ops::Deref;

use crate::Term;

/// Ordered, owned sequence of child terms.
///
/// Built right before it is handed to a node constructor; the node then owns
/// it and nothing mutates it afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(Vec<Term>);

impl Arguments {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Coerces every item into a term, keeping order.
    pub fn make<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        Self(items.into_iter().map(Into::into).collect())
    }

    /// Coerces `value` and appends it.
    pub fn with(mut self, value: impl Into<Term>) -> Self {
        self.0.push(value.into());
        self
    }

    pub(crate) fn prepend(mut self, head: Term) -> Self {
        self.0.insert(0, head);
        self
    }

    pub fn into_vec(self) -> Vec<Term> {
        self.0
    }
}

impl Deref for Arguments {
    type Target = [Term];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Term>> for Arguments {
    fn from(terms: Vec<Term>) -> Self {
        Self(terms)
    }
}

impl<const N: usize> From<[Term; N]> for Arguments {
    fn from(terms: [Term; N]) -> Self {
        Self(terms.into())
    }
}

impl From<Term> for Arguments {
    fn from(term: Term) -> Self {
        Self(vec![term])
    }
}

impl From<()> for Arguments {
    fn from(_: ()) -> Self {
        Self::new()
    }
}

impl FromIterator<Term> for Arguments {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Arguments {
    type Item = Term;
    type IntoIter = std::vec::IntoIter<Term>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Builds [`Arguments`] from heterogeneous values, coercing each one.
///
/// ```rust,ignore
/// let args = args![1, "a", true];
/// ```
#[macro_export]
macro_rules! args {
    () => { $crate::Arguments::new() };
    ($($value:expr),+ $(,)?) => {
        $crate::Arguments::from(vec![$($crate::Term::from($value)),+])
    };
}
