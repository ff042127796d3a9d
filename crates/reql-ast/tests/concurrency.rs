use std::sync::Arc;
use std::thread;

use reql_ast::{wire, Term};
use reql_test_utils::fixtures::{adult_names, user_documents};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn terms_are_shareable_across_threads() {
    assert_send_sync::<Term>();

    let query = Arc::new(adult_names().unwrap());
    let expected = wire::to_string(&query).unwrap();

    let outputs: Vec<String> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let query = Arc::clone(&query);
                s.spawn(move || wire::to_string(&query).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(outputs.iter().all(|out| *out == expected));
}

#[test]
fn independent_builders_do_not_interfere() {
    let docs = user_documents();
    let outputs: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| wire::serialize(&Term::from(docs.clone())).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(outputs.windows(2).all(|w| w[0] == w[1]));
}
