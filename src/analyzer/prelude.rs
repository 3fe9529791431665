//! Everything a grammar module needs in one import.

pub use super::combinators::{
    as_unit, boxed, choice, delimited, end, equal, lazy, many, many1, map, optional, preceded,
    satisfy, separated_list1, tag, try_map, tuple2, tuple3, tuple4, with_context,
};
