//! The closed catalog of term kinds.
//!
//! Every row fixes the wire code, the protocol name, the accepted argument
//! count and whether the kind takes keyword options. The table is compiled in
//! and never changes at runtime; [`TermType::from_name`] reads a map that is
//! built once on first use.

use std::collections::HashMap;
use std::fmt;

/// Accepted argument count of a term kind, `max == None` meaning unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    pub max: Option<usize>,
}

impl Arity {
    pub const fn exactly(n: usize) -> Self {
        Self {
            min: n,
            max: Some(n),
        }
    }

    pub const fn range(min: usize, max: usize) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    pub fn accepts(self, count: usize) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }
}

macro_rules! define_term_types {
    (
        $( $variant:ident = $code:literal, $name:literal, $arity:expr, $optargs:literal; )+
    ) => {
        /// Kind of a term node, carrying its wire code as discriminant.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(i64)]
        pub enum TermType {
            $( $variant = $code ),+
        }

        impl TermType {
            pub const ALL: &'static [TermType] = &[ $( TermType::$variant ),+ ];

            /// Looks a kind up by its wire code.
            pub fn from_code(code: i64) -> Option<Self> {
                match code {
                    $( $code => Some(TermType::$variant), )+
                    _ => None,
                }
            }

            /// Protocol name, e.g. `"FUNC"`.
            pub fn name(self) -> &'static str {
                match self {
                    $( TermType::$variant => $name ),+
                }
            }

            pub fn arity(self) -> Arity {
                match self {
                    $( TermType::$variant => $arity ),+
                }
            }

            /// Whether nodes of this kind may carry keyword options at all.
            pub fn accepts_optargs(self) -> bool {
                match self {
                    $( TermType::$variant => $optargs ),+
                }
            }
        }
    };
}

define_term_types! {
    Datum = 1, "DATUM", Arity::exactly(0), false;
    MakeArray = 2, "MAKE_ARRAY", Arity::at_least(0), false;
    MakeObj = 3, "MAKE_OBJ", Arity::exactly(0), true;
    Var = 10, "VAR", Arity::exactly(1), false;
    Javascript = 11, "JAVASCRIPT", Arity::exactly(1), true;
    Error = 12, "ERROR", Arity::range(0, 1), false;
    ImplicitVar = 13, "IMPLICIT_VAR", Arity::exactly(0), false;
    Db = 14, "DB", Arity::exactly(1), false;
    Table = 15, "TABLE", Arity::range(1, 2), true;
    Get = 16, "GET", Arity::exactly(2), false;
    Eq = 17, "EQ", Arity::at_least(1), false;
    Ne = 18, "NE", Arity::at_least(1), false;
    Lt = 19, "LT", Arity::at_least(1), false;
    Le = 20, "LE", Arity::at_least(1), false;
    Gt = 21, "GT", Arity::at_least(1), false;
    Ge = 22, "GE", Arity::at_least(1), false;
    Not = 23, "NOT", Arity::exactly(1), false;
    Add = 24, "ADD", Arity::at_least(1), false;
    Sub = 25, "SUB", Arity::at_least(1), false;
    Mul = 26, "MUL", Arity::at_least(1), false;
    Div = 27, "DIV", Arity::at_least(1), false;
    Mod = 28, "MOD", Arity::exactly(2), false;
    Append = 29, "APPEND", Arity::exactly(2), false;
    Slice = 30, "SLICE", Arity::range(1, 3), true;
    GetField = 31, "GET_FIELD", Arity::exactly(2), false;
    HasFields = 32, "HAS_FIELDS", Arity::at_least(1), false;
    Pluck = 33, "PLUCK", Arity::at_least(1), false;
    Without = 34, "WITHOUT", Arity::at_least(1), false;
    Merge = 35, "MERGE", Arity::at_least(1), false;
    Reduce = 37, "REDUCE", Arity::exactly(2), false;
    Map = 38, "MAP", Arity::at_least(2), false;
    Filter = 39, "FILTER", Arity::exactly(2), true;
    ConcatMap = 40, "CONCAT_MAP", Arity::exactly(2), false;
    OrderBy = 41, "ORDER_BY", Arity::at_least(1), true;
    Distinct = 42, "DISTINCT", Arity::exactly(1), true;
    Count = 43, "COUNT", Arity::range(1, 2), false;
    Union = 44, "UNION", Arity::at_least(0), true;
    Nth = 45, "NTH", Arity::exactly(2), false;
    InnerJoin = 48, "INNER_JOIN", Arity::exactly(3), false;
    OuterJoin = 49, "OUTER_JOIN", Arity::exactly(3), false;
    EqJoin = 50, "EQ_JOIN", Arity::exactly(3), true;
    CoerceTo = 51, "COERCE_TO", Arity::exactly(2), false;
    TypeOf = 52, "TYPE_OF", Arity::exactly(1), false;
    Update = 53, "UPDATE", Arity::exactly(2), true;
    Delete = 54, "DELETE", Arity::exactly(1), true;
    Replace = 55, "REPLACE", Arity::exactly(2), true;
    Insert = 56, "INSERT", Arity::exactly(2), true;
    DbCreate = 57, "DB_CREATE", Arity::exactly(1), false;
    DbDrop = 58, "DB_DROP", Arity::exactly(1), false;
    DbList = 59, "DB_LIST", Arity::exactly(0), false;
    TableCreate = 60, "TABLE_CREATE", Arity::range(1, 2), true;
    TableDrop = 61, "TABLE_DROP", Arity::range(1, 2), false;
    TableList = 62, "TABLE_LIST", Arity::range(0, 1), false;
    Funcall = 64, "FUNCALL", Arity::at_least(1), false;
    Branch = 65, "BRANCH", Arity::at_least(3), false;
    Or = 66, "OR", Arity::at_least(0), false;
    And = 67, "AND", Arity::at_least(0), false;
    ForEach = 68, "FOR_EACH", Arity::exactly(2), false;
    Func = 69, "FUNC", Arity::exactly(2), false;
    Skip = 70, "SKIP", Arity::exactly(2), false;
    Limit = 71, "LIMIT", Arity::exactly(2), false;
    Zip = 72, "ZIP", Arity::exactly(1), false;
    Asc = 73, "ASC", Arity::exactly(1), false;
    Desc = 74, "DESC", Arity::exactly(1), false;
    IndexCreate = 75, "INDEX_CREATE", Arity::range(2, 3), true;
    IndexDrop = 76, "INDEX_DROP", Arity::exactly(2), false;
    IndexList = 77, "INDEX_LIST", Arity::exactly(1), false;
    GetAll = 78, "GET_ALL", Arity::at_least(1), true;
    Info = 79, "INFO", Arity::exactly(1), false;
    Prepend = 80, "PREPEND", Arity::exactly(2), false;
    Sample = 81, "SAMPLE", Arity::exactly(2), false;
    InsertAt = 82, "INSERT_AT", Arity::exactly(3), false;
    DeleteAt = 83, "DELETE_AT", Arity::range(2, 3), false;
    ChangeAt = 84, "CHANGE_AT", Arity::exactly(3), false;
    SpliceAt = 85, "SPLICE_AT", Arity::exactly(3), false;
    IsEmpty = 86, "IS_EMPTY", Arity::exactly(1), false;
    OffsetsOf = 87, "OFFSETS_OF", Arity::exactly(2), false;
    SetInsert = 88, "SET_INSERT", Arity::exactly(2), false;
    SetIntersection = 89, "SET_INTERSECTION", Arity::exactly(2), false;
    SetUnion = 90, "SET_UNION", Arity::exactly(2), false;
    SetDifference = 91, "SET_DIFFERENCE", Arity::exactly(2), false;
    Default = 92, "DEFAULT", Arity::exactly(2), false;
    Contains = 93, "CONTAINS", Arity::at_least(1), false;
    Keys = 94, "KEYS", Arity::exactly(1), false;
    Difference = 95, "DIFFERENCE", Arity::exactly(2), false;
    WithFields = 96, "WITH_FIELDS", Arity::at_least(1), false;
    Match = 97, "MATCH", Arity::exactly(2), false;
    Json = 98, "JSON", Arity::exactly(1), false;
    Iso8601 = 99, "ISO8601", Arity::exactly(1), true;
    ToIso8601 = 100, "TO_ISO8601", Arity::exactly(1), false;
    EpochTime = 101, "EPOCH_TIME", Arity::exactly(1), false;
    ToEpochTime = 102, "TO_EPOCH_TIME", Arity::exactly(1), false;
    Now = 103, "NOW", Arity::exactly(0), false;
    InTimezone = 104, "IN_TIMEZONE", Arity::exactly(2), false;
    During = 105, "DURING", Arity::exactly(3), true;
    Date = 106, "DATE", Arity::exactly(1), false;
    Time = 136, "TIME", Arity::range(4, 7), false;
    Literal = 137, "LITERAL", Arity::range(0, 1), false;
    Sync = 138, "SYNC", Arity::exactly(1), false;
    IndexStatus = 139, "INDEX_STATUS", Arity::at_least(1), false;
    IndexWait = 140, "INDEX_WAIT", Arity::at_least(1), false;
    Upcase = 141, "UPCASE", Arity::exactly(1), false;
    Downcase = 142, "DOWNCASE", Arity::exactly(1), false;
    Object = 143, "OBJECT", Arity::at_least(0), false;
    Group = 144, "GROUP", Arity::at_least(1), true;
    Sum = 145, "SUM", Arity::range(1, 2), false;
    Avg = 146, "AVG", Arity::range(1, 2), false;
    Min = 147, "MIN", Arity::range(1, 2), true;
    Max = 148, "MAX", Arity::range(1, 2), true;
    Split = 149, "SPLIT", Arity::range(1, 3), false;
    Ungroup = 150, "UNGROUP", Arity::exactly(1), false;
    Random = 151, "RANDOM", Arity::range(0, 2), true;
    Changes = 152, "CHANGES", Arity::exactly(1), true;
    Http = 153, "HTTP", Arity::exactly(1), true;
    Args = 154, "ARGS", Arity::exactly(1), false;
    Binary = 155, "BINARY", Arity::exactly(1), false;
    IndexRename = 156, "INDEX_RENAME", Arity::exactly(3), true;
    Uuid = 169, "UUID", Arity::range(0, 1), false;
    Bracket = 170, "BRACKET", Arity::exactly(2), false;
    ToJsonString = 172, "TO_JSON_STRING", Arity::exactly(1), false;
    Range = 173, "RANGE", Arity::range(0, 2), false;
    Config = 174, "CONFIG", Arity::exactly(1), false;
    Status = 175, "STATUS", Arity::exactly(1), false;
    Reconfigure = 176, "RECONFIGURE", Arity::range(0, 1), true;
    Wait = 177, "WAIT", Arity::range(0, 1), true;
    Rebalance = 179, "REBALANCE", Arity::range(0, 1), false;
    Minval = 180, "MINVAL", Arity::exactly(0), false;
    Maxval = 181, "MAXVAL", Arity::exactly(0), false;
    Between = 182, "BETWEEN", Arity::exactly(3), true;
    Floor = 183, "FLOOR", Arity::exactly(1), false;
    Ceil = 184, "CEIL", Arity::exactly(1), false;
    Round = 185, "ROUND", Arity::exactly(1), false;
    Values = 186, "VALUES", Arity::exactly(1), false;
    Fold = 187, "FOLD", Arity::exactly(3), true;
    BitAnd = 191, "BIT_AND", Arity::at_least(1), false;
    BitOr = 192, "BIT_OR", Arity::at_least(1), false;
    BitXor = 193, "BIT_XOR", Arity::at_least(1), false;
    BitNot = 194, "BIT_NOT", Arity::exactly(1), false;
    BitSal = 195, "BIT_SAL", Arity::at_least(1), false;
    BitSar = 196, "BIT_SAR", Arity::at_least(1), false;
}

lazy_static::lazy_static! {
    static ref BY_NAME: HashMap<&'static str, TermType> =
        TermType::ALL.iter().map(|ty| (ty.name(), *ty)).collect();
}

impl TermType {
    pub fn code(self) -> i64 {
        self as i64
    }

    /// Looks a kind up by its protocol name, e.g. `"GET_FIELD"`.
    pub fn from_name(name: &str) -> Option<Self> {
        BY_NAME.get(name).copied()
    }
}

impl fmt::Display for TermType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
