//! Fluent combinators.
//!
//! Every method here is an `extend` with a fixed tag: the receiver becomes
//! the first argument of a new node. Parameter lists are chosen so that the
//! catalog arity always holds, which is why these return `Term` directly
//! instead of `Result`. Use [`Term::extend`] for shapes not listed here.

use crate::{Arguments, Term, TermType};

macro_rules! define_ops {
    (
        unary { $( $(#[$um:meta])* $uname:ident => $utag:ident ),* $(,)? }
        binary { $( $(#[$bm:meta])* $bname:ident($barg:ident) => $btag:ident ),* $(,)? }
        ternary { $( $(#[$tm:meta])* $tname:ident($ta:ident, $tb:ident) => $ttag:ident ),* $(,)? }
        variadic { $( $(#[$vm:meta])* $vname:ident($varg:ident) => $vtag:ident ),* $(,)? }
    ) => {
        impl Term {
            $(
                $(#[$um])*
                pub fn $uname(self) -> Term {
                    Term::fixed(TermType::$utag, Arguments::from(self), None)
                }
            )*
            $(
                $(#[$bm])*
                pub fn $bname(self, $barg: impl Into<Term>) -> Term {
                    Term::fixed(TermType::$btag, Arguments::from([self, $barg.into()]), None)
                }
            )*
            $(
                $(#[$tm])*
                pub fn $tname(self, $ta: impl Into<Term>, $tb: impl Into<Term>) -> Term {
                    Term::fixed(
                        TermType::$ttag,
                        Arguments::from([self, $ta.into(), $tb.into()]),
                        None,
                    )
                }
            )*
            $(
                $(#[$vm])*
                pub fn $vname<I, T>(self, $varg: I) -> Term
                where
                    I: IntoIterator<Item = T>,
                    T: Into<Term>,
                {
                    Term::fixed(TermType::$vtag, Arguments::make($varg).prepend(self), None)
                }
            )*
        }
    };
}

define_ops! {
    unary {
        count => Count,
        distinct => Distinct,
        keys => Keys,
        values => Values,
        not => Not,
        is_empty => IsEmpty,
        type_of => TypeOf,
        info => Info,
        zip => Zip,
        ungroup => Ungroup,
        upcase => Upcase,
        downcase => Downcase,
        to_json_string => ToJsonString,
        to_iso8601 => ToIso8601,
        to_epoch_time => ToEpochTime,
        date => Date,
        floor => Floor,
        ceil => Ceil,
        round => Round,
        sum => Sum,
        avg => Avg,
        min => Min,
        max => Max,
        /// Deletes every selected document.
        delete => Delete,
        changes => Changes,
        config => Config,
        status => Status,
        sync => Sync,
        index_list => IndexList,
        table_list => TableList,
        bit_not => BitNot,
        /// Splits a string on whitespace.
        split => Split,
    }
    binary {
        eq(other) => Eq,
        ne(other) => Ne,
        lt(other) => Lt,
        le(other) => Le,
        gt(other) => Gt,
        ge(other) => Ge,
        add(other) => Add,
        sub(other) => Sub,
        mul(other) => Mul,
        div(other) => Div,
        mod_(other) => Mod,
        and(other) => And,
        or(other) => Or,
        /// `GET_FIELD`, object field access only.
        get_field(field) => GetField,
        /// `BRACKET`, field access on objects or index access on sequences.
        bracket(key) => Bracket,
        nth(index) => Nth,
        limit(n) => Limit,
        skip(n) => Skip,
        filter(predicate) => Filter,
        map(func) => Map,
        concat_map(func) => ConcatMap,
        reduce(func) => Reduce,
        for_each(func) => ForEach,
        count_matching(predicate) => Count,
        contains(value) => Contains,
        append(value) => Append,
        prepend(value) => Prepend,
        difference(other) => Difference,
        set_insert(value) => SetInsert,
        set_union(other) => SetUnion,
        set_intersection(other) => SetIntersection,
        set_difference(other) => SetDifference,
        coerce_to(type_name) => CoerceTo,
        /// Value used when the receiver errors or is null.
        default(value) => Default,
        match_(regex) => Match,
        sample(n) => Sample,
        split_on(separator) => Split,
        update(changes) => Update,
        replace(document) => Replace,
        insert(documents) => Insert,
        table(name) => Table,
        get(key) => Get,
        index_create(name) => IndexCreate,
        index_drop(name) => IndexDrop,
        in_timezone(timezone) => InTimezone,
        offsets_of(predicate) => OffsetsOf,
        delete_at(index) => DeleteAt,
        table_create(name) => TableCreate,
        table_drop(name) => TableDrop,
        bit_and(other) => BitAnd,
        bit_or(other) => BitOr,
        bit_xor(other) => BitXor,
    }
    ternary {
        between(lower, upper) => Between,
        eq_join(field, table) => EqJoin,
        inner_join(other, predicate) => InnerJoin,
        outer_join(other, predicate) => OuterJoin,
        insert_at(index, value) => InsertAt,
        change_at(index, value) => ChangeAt,
        splice_at(index, values) => SpliceAt,
        during(start, end) => During,
        fold(base, func) => Fold,
        index_rename(old_name, new_name) => IndexRename,
    }
    variadic {
        pluck(fields) => Pluck,
        without(fields) => Without,
        merge(objects) => Merge,
        has_fields(fields) => HasFields,
        with_fields(fields) => WithFields,
        order_by(keys) => OrderBy,
        get_all(keys) => GetAll,
        union(sequences) => Union,
        group(keys) => Group,
    }
}
