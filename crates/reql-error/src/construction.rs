/// Shape violations caught while a term node is being built.
///
/// A construction error is final for that attempt: nothing is retried and no
/// partially built node is handed back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstructionError {
    #[error("{term} expects {} argument(s), got {got}", describe_arity(.min, .max))]
    Arity {
        term: &'static str,
        min: usize,
        max: Option<usize>,
        got: usize,
    },

    #[error("{term} does not accept options (got {keys:?})")]
    OptArgsNotAccepted {
        term: &'static str,
        keys: Vec<String>,
    },

    #[error("{term} terms are only produced by value coercion")]
    NotConstructible { term: &'static str },
}

fn describe_arity(min: &usize, max: &Option<usize>) -> String {
    match *max {
        Some(max) if max == *min => format!("exactly {min}"),
        Some(max) => format!("between {min} and {max}"),
        None => format!("at least {min}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_message_names_the_bounds() {
        let exact = ConstructionError::Arity {
            term: "DB",
            min: 1,
            max: Some(1),
            got: 0,
        };
        assert_eq!(exact.to_string(), "DB expects exactly 1 argument(s), got 0");

        let range = ConstructionError::Arity {
            term: "TABLE",
            min: 1,
            max: Some(2),
            got: 3,
        };
        assert_eq!(
            range.to_string(),
            "TABLE expects between 1 and 2 argument(s), got 3"
        );

        let open = ConstructionError::Arity {
            term: "EQ",
            min: 2,
            max: None,
            got: 1,
        };
        assert_eq!(open.to_string(), "EQ expects at least 2 argument(s), got 1");
    }
}
