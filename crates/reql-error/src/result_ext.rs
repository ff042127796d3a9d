use super::{Error, ErrorPolicy, Result, Severity};

/// Extension trait for `Result` enabling policy-driven emission without
/// side effects in the code that builds terms.
///
/// Example
/// ```rust,ignore
/// use reql_error::{Result, ResultExt, TracingPolicy};
///
/// let wire = reql_ast::wire::serialize(&term).emit_error(&TracingPolicy)?;
/// ```
pub trait ResultExt<T> {
    /// Emit the error using the provided policy and return the result unchanged
    fn emit_event(self, policy: &impl ErrorPolicy) -> Self;

    /// If the result is an error classified as a warning, emit it
    fn emit_warning(self, policy: &impl ErrorPolicy) -> Self;

    /// If the result is an error classified as an error, emit it
    fn emit_error(self, policy: &impl ErrorPolicy) -> Self;

    /// If the result is an error classified as fatal, emit it
    fn emit_fatal(self, policy: &impl ErrorPolicy) -> Self;
}

fn emit_if<T>(result: &Result<T>, policy: &impl ErrorPolicy, severity: Severity) {
    if let Err(e) = result {
        if policy.classify(e) == severity {
            policy.emit(e);
        }
    }
}

impl<T> ResultExt<T> for Result<T> {
    fn emit_event(self, policy: &impl ErrorPolicy) -> Self {
        if let Err(ref e) = self {
            policy.emit(e);
        }
        self
    }

    fn emit_warning(self, policy: &impl ErrorPolicy) -> Self {
        emit_if(&self, policy, Severity::Warning);
        self
    }

    fn emit_error(self, policy: &impl ErrorPolicy) -> Self {
        emit_if(&self, policy, Severity::Error);
        self
    }

    fn emit_fatal(self, policy: &impl ErrorPolicy) -> Self {
        emit_if(&self, policy, Severity::Fatal);
        self
    }
}

/// Iterator helpers over `Result`, used when coercing a batch of values.
pub trait IterResultExt<T>: Sized {
    fn collect_ok(self) -> Result<Vec<T>>;
    fn first_error(self) -> Option<Error>;
}

impl<I, T> IterResultExt<T> for I
where
    I: IntoIterator<Item = Result<T>>,
{
    fn collect_ok(self) -> Result<Vec<T>> {
        let mut out = Vec::new();
        for r in self {
            out.push(r?);
        }
        Ok(out)
    }

    fn first_error(self) -> Option<Error> {
        self.into_iter().find_map(|r| r.err())
    }
}
