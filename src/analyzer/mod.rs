//! # Analyzer
//!
//! Token-level parser combinators and the command grammar built on them.
//!
//! [`parse`] is the entry point used by the session: it tokenizes one
//! normalized line, drops whitespace, runs the command grammar and turns any
//! failure into [`MnemonError::Syntax`] pointing at the offending token.

pub mod combinators;
pub mod core;
pub mod parsers;
pub mod prelude;

pub use core::ParseError;
pub use core::ParseResult;
pub use core::Parser;

use crate::ast::Command;
use crate::error::{MnemonError, MnemonResult};
use crate::tokenizer::token::{Token, TokenSpan, Tokenizer, TokenizerError};

/// Parses one normalized command line.
#[tracing::instrument(level = "debug")]
pub fn parse(input: &str) -> MnemonResult<Command> {
    let spans: Vec<TokenSpan> = Tokenizer::new()
        .tokenize(input)
        .map_err(|e| match e {
            TokenizerError::ParseError { found, offset, .. } => MnemonError::Syntax {
                token: found,
                offset,
            },
        })?
        .into_iter()
        .filter(|span| !span.token.is_trivia())
        .collect();
    let tokens: Vec<Token> = spans.iter().map(|span| span.token.clone()).collect();

    match parsers::parse_command().parse(&tokens, 0) {
        Ok((_, command)) => {
            tracing::debug!(kind = command.kind(), "parsed command");
            Ok(command)
        }
        Err(e) => {
            tracing::debug!("syntax error: {}", e);
            Err(syntax_error(&spans, input, e.position()))
        }
    }
}

fn syntax_error(spans: &[TokenSpan], input: &str, position: usize) -> MnemonError {
    match spans.get(position) {
        Some(span) => MnemonError::Syntax {
            token: input[span.start..span.end].to_string(),
            offset: span.start,
        },
        None => MnemonError::Syntax {
            token: "end of input".to_string(),
            offset: input.len(),
        },
    }
}
