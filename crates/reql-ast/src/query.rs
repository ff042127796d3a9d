//! The outer envelope a client sends around a term tree.
//!
//! Only the JSON body is built here. Token framing and the connection itself
//! belong to the driver.

use reql_error::Result;
use serde_json::{Map, Value};

use crate::{wire, OptArgs, Term};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum QueryType {
    Start = 1,
    Continue = 2,
    Stop = 3,
    NoopReply = 4,
    ServerInfo = 5,
}

impl QueryType {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u64) -> Option<Self> {
        Some(match code {
            1 => QueryType::Start,
            2 => QueryType::Continue,
            3 => QueryType::Stop,
            4 => QueryType::NoopReply,
            5 => QueryType::ServerInfo,
            _ => return None,
        })
    }
}

/// One client message body.
///
/// A `START` query owns its term and global options (`db`, `read_mode`,
/// `profile`...). The other kinds refer to an already running query through
/// the token and carry nothing else.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    kind: QueryType,
    term: Option<Term>,
    global_optargs: OptArgs,
}

impl Query {
    pub fn start(term: impl Into<Term>) -> Self {
        Self {
            kind: QueryType::Start,
            term: Some(term.into()),
            global_optargs: OptArgs::new(),
        }
    }

    pub fn continue_() -> Self {
        Self::bare(QueryType::Continue)
    }

    pub fn stop() -> Self {
        Self::bare(QueryType::Stop)
    }

    pub fn noop_reply() -> Self {
        Self::bare(QueryType::NoopReply)
    }

    pub fn server_info() -> Self {
        Self::bare(QueryType::ServerInfo)
    }

    fn bare(kind: QueryType) -> Self {
        Self {
            kind,
            term: None,
            global_optargs: OptArgs::new(),
        }
    }

    /// Adds a global option. Ignored on the wire for anything but `START`.
    pub fn with_global_opt(mut self, key: impl Into<String>, value: impl Into<Term>) -> Self {
        self.global_optargs = self.global_optargs.with(key, value);
        self
    }

    pub fn kind(&self) -> QueryType {
        self.kind
    }

    pub fn term(&self) -> Option<&Term> {
        self.term.as_ref()
    }

    pub fn global_optargs(&self) -> &OptArgs {
        &self.global_optargs
    }

    /// `[1, term, {opts}]` for `START`, `[type]` for everything else.
    pub fn serialize(&self) -> Result<Value> {
        let mut body = vec![Value::from(self.kind.code())];
        if let (QueryType::Start, Some(term)) = (self.kind, &self.term) {
            body.push(wire::serialize(term)?);
            let opts = self
                .global_optargs
                .iter()
                .map(|(k, v)| Ok::<_, reql_error::Error>((k.to_owned(), wire::serialize(v)?)))
                .collect::<Result<Map<_, _>>>()?;
            body.push(Value::Object(opts));
        }
        Ok(Value::Array(body))
    }

    pub fn to_json_string(&self) -> Result<String> {
        let value = self.serialize()?;
        serde_json::to_string(&value)
            .map_err(|e| reql_error::SerializationError::Json(e.to_string()).into())
    }
}
