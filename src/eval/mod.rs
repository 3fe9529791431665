//! # Evaluation
//!
//! Reduces [`Expression`](crate::ast::Expression) trees, in two modes:
//!
//! * **fold** (definition time): every subtree without free names is
//!   computed and turned back into a literal; everything else is kept as
//!   written. Never fails.
//! * **resolve** (print and call time): the whole tree becomes a [`Value`].
//!   Any name that is neither bound nor remembered is an error.
//!
//! Both modes read remembered names through the [`Environment`] trait and
//! never modify the tree they are given.

pub mod arithmetic;
pub mod context;
pub mod dependency;
pub mod error;
pub mod evaluator;
pub mod value;

pub use context::{Bindings, Environment};
pub use dependency::{dependencies, dependency_set, mentioned_names};
pub use error::{EvalError, EvalResult};
pub use evaluator::Evaluator;
pub use value::Value;
