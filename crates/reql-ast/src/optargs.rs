//! Keyword options of a node.

use std::collections::BTreeMap;

use crate::Term;

/// Mapping from option name to a coerced term.
///
/// Keys are kept sorted so that the same options always serialize to the
/// same bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptArgs(BTreeMap<String, Term>);

impl OptArgs {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Single-entry options, `OptArgs::of("index", "name")`.
    pub fn of(key: impl Into<String>, value: impl Into<Term>) -> Self {
        Self::new().with(key, value)
    }

    /// Coerces `value` and stores it under `key`, replacing any previous entry.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Term>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Term> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for OptArgs
where
    K: Into<String>,
    V: Into<Term>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl IntoIterator for OptArgs {
    type Item = (String, Term);
    type IntoIter = std::collections::btree_map::IntoIter<String, Term>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Builds [`OptArgs`], coercing each value.
///
/// ```rust,ignore
/// let opts = optargs! { "index" => "by_name", "left_bound" => "open" };
/// ```
#[macro_export]
macro_rules! optargs {
    () => { $crate::OptArgs::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::OptArgs::new()$(.with($key, $value))+
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_iterate_sorted_regardless_of_insertion() {
        let opts = crate::optargs! { "z" => 1, "a" => 2, "m" => 3 };
        assert_eq!(opts.keys().collect::<Vec<_>>(), vec!["a", "m", "z"]);
    }

    #[test]
    fn later_entries_replace_earlier_ones() {
        let opts = OptArgs::of("k", 1).with("k", "two");
        assert_eq!(opts.len(), 1);
        assert_eq!(opts.get("k"), Some(&Term::from("two")));
    }
}
