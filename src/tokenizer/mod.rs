//! # Tokenizer Component
//!
//! Lexical analysis of normalized command text. The tokenizer turns one
//! command line into a stream of [`TokenSpan`](token::TokenSpan)s carrying byte
//! offsets, so that the analyzer can report the exact token it choked on.
//!
//! ## Component Structure
//!
//! * [`token`]: Core token types and the [`Tokenizer`](token::Tokenizer)
//! * [`keyword`]: Reserved command and operator words
//! * [`numeral`]: English number words and how they compose
//! * [`literal`]: Digit numbers, quoted strings and quoted characters
//! * [`symbol`]: Punctuation delimiters
//! * [`whitespace`]: Whitespace handling
//!
//! ## Usage Example
//!
//! ```rust
//! use mnemon::tokenizer::token::{Token, Tokenizer};
//!
//! let mut tokenizer = Tokenizer::new();
//! let tokens = tokenizer.tokenize("remember x as one.").unwrap();
//! assert!(matches!(tokens[0].token, Token::Keyword(_)));
//! ```

pub mod keyword;
pub mod literal;
pub mod numeral;
pub mod symbol;
pub mod token;
pub mod whitespace;
