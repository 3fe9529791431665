//! # Mnemon: a conversational memory
//!
//! Mnemon remembers named expressions stated in plain English, computes with
//! them on request and slowly forgets the ones nobody mentions.
//!
//! ```text
//! remember x as one.            I'll remember x as one.
//! remember y as x plus one.     I'll remember y.
//! tell me about y.              two.
//! ```
//!
//! ## Processing Pipeline
//!
//! ```text
//! Input → Preprocessor → Tokenizer → Analyzer → Session → Memory / Evaluator → Formatter
//! ```
//!
//! ### Stage 1: Normalization
//!
//! The [`preprocessor`] rewrites command and operator synonyms (`what's`,
//! `+`, `define ... to be`) into the one canonical phrasing.
//!
//! ### Stage 2: Tokenization
//!
//! The [`tokenizer`] splits canonical text into keywords, number words,
//! literals and names, keeping byte offsets for error reporting.
//!
//! ### Stage 3: Parsing
//!
//! The [`analyzer`] builds a [`ast::Command`] with parser combinators.
//!
//! ### Stage 4: Execution
//!
//! The [`session`] dispatches the command. Definitions go through the
//! [`memory`], which validates names, rejects circular definitions and
//! evicts faded entries; expressions are computed by the [`eval`] module.
//!
//! ### Stage 5: Rendering
//!
//! The [`formatter`] spells numbers out and echoes stored expressions.
//!
//! ## Forgetting
//!
//! Each entry carries a fade counter. Every command ages the entries it does
//! not mention; past the limit an entry is forgotten, after its value has
//! been copied into every entry that was defined in terms of it.

pub mod analyzer;
pub mod ast;
pub mod config;
pub mod error;
pub mod eval;
pub mod formatter;
pub mod memory;
pub mod preprocessor;
pub mod session;
pub mod tokenizer;

// Re-exports
pub use ast::{Command, Expression};
pub use config::SessionConfig;
pub use error::*;
pub use session::Session;
