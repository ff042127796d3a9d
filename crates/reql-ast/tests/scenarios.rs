use reql_ast::{args, closure, optargs, r, wire, Error, OptArgs, Term, TermType};
use reql_error::ConstructionError;
use reql_test_utils::init_tracing_once;
use serde_json::json;

#[test]
fn zero_parameter_function_serializes_with_empty_id_list() {
    init_tracing_once();
    let f = closure(|_, []| Ok(5)).unwrap();
    assert_eq!(wire::to_string(&f).unwrap(), "[69,[[2,[]],5]]");
}

#[test]
fn heterogeneous_sequence_becomes_make_array() {
    let t = Term::from(json!([1, "a", true]));
    assert_eq!(t.tag(), TermType::MakeArray);
    assert_eq!(wire::serialize(&t).unwrap(), json!([2, [1, "a", true]]));

    let typed = r::array(args![1, "a", true]);
    assert_eq!(typed, t);
}

#[test]
fn mapping_becomes_make_obj_with_options() {
    let t = Term::from(optargs! { "x" => 1 });
    assert_eq!(t.tag(), TermType::MakeObj);
    assert!(t.args().is_empty());
    assert_eq!(t.optargs().unwrap().get("x"), Some(&Term::from(1)));
    assert_eq!(wire::serialize(&t).unwrap(), json!({"x": 1}));
}

#[test]
fn exact_arity_kind_with_no_arguments_fails() {
    init_tracing_once();
    let err = Term::node(TermType::Not, args![]).unwrap_err();
    assert_eq!(
        err,
        Error::Construction(ConstructionError::Arity {
            term: "NOT",
            min: 1,
            max: Some(1),
            got: 0,
        })
    );
}

#[test]
fn every_kind_rejects_counts_outside_its_arity() {
    for &tag in TermType::ALL.iter().filter(|t| **t != TermType::Datum) {
        let arity = tag.arity();
        let within = Term::node(tag, vec![Term::from(0); arity.min]);
        assert!(within.is_ok(), "{tag} with {} args", arity.min);

        if arity.min > 0 {
            let short = Term::node(tag, vec![Term::from(0); arity.min - 1]);
            assert!(short.unwrap_err().is_construction(), "{tag} below min");
        }
        if let Some(max) = arity.max {
            let long = Term::node(tag, vec![Term::from(0); max + 1]);
            assert!(long.unwrap_err().is_construction(), "{tag} above max");
        }
    }
}

#[test]
fn options_only_where_the_catalog_allows_them() {
    for &tag in TermType::ALL.iter().filter(|t| **t != TermType::Datum) {
        let args = vec![Term::from(0); tag.arity().min];
        let result = Term::new(tag, args, Some(OptArgs::of("k", 1)));
        assert_eq!(result.is_ok(), tag.accepts_optargs(), "{tag}");
    }
}

#[test]
fn extend_leaves_the_receiver_untouched() {
    let users = r::table("users");
    let snapshot = wire::serialize(&users).unwrap();

    let limited = users.clone().extend(TermType::Limit, args![10]).unwrap();
    let counted = users.clone().count();

    assert_eq!(wire::serialize(&users).unwrap(), snapshot);
    assert_eq!(
        wire::serialize(&limited).unwrap(),
        json!([71, [[15, ["users"]], 10]])
    );
    assert_eq!(wire::serialize(&counted).unwrap(), json!([43, [[15, ["users"]]]]));
}

#[test]
fn function_arity_is_fixed_at_two() {
    assert_eq!(TermType::Func.arity().min, 2);
    assert_eq!(TermType::Func.arity().max, Some(2));
    assert!(!TermType::Func.accepts_optargs());
    assert!(Term::node(TermType::Func, args![[0i64; 0]]).is_err());
}

#[test]
fn catalog_lookups_agree() {
    for &tag in TermType::ALL {
        assert_eq!(TermType::from_code(tag.code()), Some(tag));
        assert_eq!(TermType::from_name(tag.name()), Some(tag));
    }
    assert_eq!(TermType::from_name("NOT_A_TERM"), None);
}
