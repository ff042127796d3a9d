use std::sync::Mutex;

use reql_ast::{args, r, to_term, wire, Term, TermType};
use reql_error::{Error, ErrorPolicy, IterResultExt, ResultExt, Severity, TracingPolicy};
use reql_test_utils::init_tracing_once;

#[derive(Default)]
struct Collect {
    seen: Mutex<Vec<Severity>>,
}

impl ErrorPolicy for Collect {
    fn classify(&self, error: &Error) -> Severity {
        error.severity()
    }

    fn emit(&self, error: &Error) {
        self.seen.lock().unwrap().push(self.classify(error));
    }
}

#[test]
fn rejected_terms_are_routed_through_the_policy() {
    let policy = Collect::default();

    let built = Term::node(TermType::Db, args![]).emit_error(&policy);
    assert!(built.is_err());

    let ok = Term::node(TermType::Db, args!["app"]).emit_error(&policy);
    assert!(ok.is_ok());

    let wire = wire::serialize(&r::expr(f64::NAN)).emit_warning(&policy);
    assert!(wire.is_err());

    assert_eq!(*policy.seen.lock().unwrap(), vec![Severity::Error]);
}

#[test]
fn tracing_policy_emits_without_panicking() {
    init_tracing_once();
    let result = to_term(&vec![1u8])
        .and_then(|t| t.extend(TermType::Limit, args![]))
        .emit_event(&TracingPolicy);
    assert!(result.unwrap_err().is_construction());
}

#[test]
fn batch_coercion_stops_at_the_first_bad_value() {
    let values = vec![
        serde_json::json!({"ok": 1}),
        serde_json::json!([1, 2]),
    ];
    let terms = values.iter().map(to_term).collect_ok().unwrap();
    assert_eq!(terms.len(), 2);

    let mut keyed = std::collections::BTreeMap::new();
    keyed.insert(false, 1);
    let bad = [to_term(&1), to_term(&keyed), to_term(&"x")];
    let err = bad.into_iter().first_error().unwrap();
    assert!(err.is_coercion());
}
