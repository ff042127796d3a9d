use reql_ast::{closure, r, Term};
use reql_error::Result;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub age: u8,
    pub tags: Vec<String>,
    pub manager: Option<Box<User>>,
}

pub fn alice() -> User {
    User {
        id: 1,
        name: "alice".into(),
        age: 34,
        tags: vec!["admin".into(), "ops".into()],
        manager: None,
    }
}

pub fn bob() -> User {
    User {
        id: 2,
        name: "bob".into(),
        age: 17,
        tags: vec![],
        manager: Some(Box::new(alice())),
    }
}

/// The same documents as [`alice`] and [`bob`], as untyped JSON.
pub fn user_documents() -> Value {
    json!([
        {"id": 1, "name": "alice", "age": 34, "tags": ["admin", "ops"], "manager": null},
        {"id": 2, "name": "bob", "age": 17, "tags": [], "manager": {
            "id": 1, "name": "alice", "age": 34, "tags": ["admin", "ops"], "manager": null
        }}
    ])
}

/// A JSON value nested `depth` arrays deep around a single `0`.
pub fn nested_arrays(depth: usize) -> Value {
    (0..depth).fold(json!(0), |inner, _| Value::Array(vec![inner]))
}

/// `r.db("app").table("users").filter(u => u("age") >= 18).pluck("name")`
pub fn adult_names() -> Result<Term> {
    let is_adult = closure(|_, [u]| Ok(u.term().get_field("age").ge(18)))?;
    Ok(r::db("app").table("users").filter(is_adult).pluck(["name"]))
}
