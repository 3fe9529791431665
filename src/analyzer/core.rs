//! # Core Parser Definitions
//!
//! The parser interface and error type underneath the combinator library.

use thiserror::Error;

/// Parser trait defines the core parsing interface.
///
/// A parser takes an input slice and a position, and returns either the new
/// position with the parsed value, or a parse error.
pub trait Parser<I, O> {
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O>;
}

pub type ParseResult<O> = Result<(usize, O), ParseError>;

/// A parser behind a pointer. Grammar rules return this so that the type of
/// one rule does not spell out every rule beneath it.
pub type BoxedParser<I, O> = Box<dyn Parser<I, O>>;

impl<I, O, P> Parser<I, O> for Box<P>
where
    P: Parser<I, O> + ?Sized,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O> {
        (**self).parse(input, pos)
    }
}

/// Every variant carries the input position it failed at, so that the caller
/// can point at the offending token.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected EOF at position {position}")]
    UnexpectedEOF { position: usize },
    #[error("Unexpected: expected {expected}, found {found} at position {position}")]
    Unexpected {
        expected: String,
        found: String,
        position: usize,
    },
    #[error("No alternative matched at position {position}")]
    NoAlternative { position: usize },
    #[error("Failure: {message} at position {position}")]
    Failure { message: String, position: usize },
    #[error("{context}: {inner}")]
    WithContext {
        context: String,
        inner: Box<ParseError>,
    },
}

impl ParseError {
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedEOF { position } => *position,
            ParseError::Unexpected { position, .. } => *position,
            ParseError::NoAlternative { position } => *position,
            ParseError::Failure { position, .. } => *position,
            ParseError::WithContext { inner, .. } => inner.position(),
        }
    }

    /// Of two failures, keeps the one that got further into the input.
    pub fn furthest(self, other: ParseError) -> ParseError {
        if other.position() > self.position() {
            other
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_through_context() {
        let error = ParseError::WithContext {
            context: "expression".to_string(),
            inner: Box::new(ParseError::NoAlternative { position: 4 }),
        };
        assert_eq!(error.position(), 4);
    }

    #[test]
    fn test_furthest() {
        let near = ParseError::UnexpectedEOF { position: 1 };
        let far = ParseError::NoAlternative { position: 3 };
        assert_eq!(near.clone().furthest(far.clone()), far);
        assert_eq!(far.clone().furthest(near), far);
    }
}
