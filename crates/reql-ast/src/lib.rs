//! Immutable ReQL query expression trees.
//!
//! Queries are trees of [`Term`] nodes. Each node carries a [`TermType`] tag
//! from the fixed catalog, ordered [`Arguments`] and optional keyword
//! [`OptArgs`]. Nodes are validated against the catalog when built, client
//! values are coerced into literal or container nodes, and [`wire`] turns a
//! finished tree into the JSON form the server expects.

pub mod args;
pub mod coerce;
pub mod config;
mod datum;
pub mod func;
mod ops;
pub mod optargs;
pub mod query;
pub mod r;
mod term;
pub mod term_type;
pub mod wire;

pub use args::Arguments;
pub use coerce::{to_term, to_term_with};
pub use config::ReqlConfig;
pub use datum::{Datum, Number, MAX_SAFE_INTEGER};
pub use func::{closure, func, Var, VarCounter};
pub use optargs::OptArgs;
pub use query::{Query, QueryType};
pub use reql_error::{Error, Result};
pub use term::Term;
pub use term_type::{Arity, TermType};
