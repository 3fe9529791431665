use nom::{bytes::complete::take_while1, combinator::map, error::context};

use super::token::{ParserResult, Token};

/// Parses a run of whitespace. Line breaks count as whitespace: a command is
/// a single sentence, however it was wrapped.
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_whitespace(input: &str) -> ParserResult<Token> {
    context(
        "whitespace expected",
        map(take_while1(|c: char| c.is_whitespace()), |ws: &str| {
            Token::Whitespace(ws.to_string())
        }),
    )(input)
}
