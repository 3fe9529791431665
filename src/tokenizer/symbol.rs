//! # Symbol Token Handling
//!
//! Punctuation that survives normalization. Operators are words in this
//! language (`plus`, `divided by`), so the only symbols left are delimiters.

use strum_macros::{AsRefStr, Display, EnumString};

use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator::{map, value},
    error::context,
};

use super::token::{ParserResult, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr)]
pub enum Delimiter {
    /// Separates list items and a for-loop's range from its body
    #[strum(serialize = ",")]
    Comma,
    /// Separates the branches of a conditional
    #[strum(serialize = ";")]
    Semicolon,
    #[strum(serialize = ".")]
    Period,
    #[strum(serialize = "?")]
    Question,
    #[strum(serialize = "!")]
    Exclamation,
    #[strum(serialize = "(")]
    OpenParen,
    #[strum(serialize = ")")]
    CloseParen,
}

impl Delimiter {
    /// Sentence-ending punctuation, accepted once at the end of a command.
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            Delimiter::Period | Delimiter::Question | Delimiter::Exclamation
        )
    }
}

#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_delimiter(input: &str) -> ParserResult<Token> {
    context(
        "delimiter",
        map(
            alt((
                value(Delimiter::Comma, tag(",")),
                value(Delimiter::Semicolon, tag(";")),
                value(Delimiter::Period, tag(".")),
                value(Delimiter::Question, tag("?")),
                value(Delimiter::Exclamation, tag("!")),
                value(Delimiter::OpenParen, tag("(")),
                value(Delimiter::CloseParen, tag(")")),
            )),
            Token::Delimiter,
        ),
    )(input)
}
