use std::fmt;

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    combinator::recognize,
    error::{context, VerboseError},
    sequence::pair,
    IResult,
};
use thiserror::Error;

use super::{
    keyword::Keyword,
    literal::{parse_literal, Literal},
    numeral::Numeral,
    symbol::{parse_delimiter, Delimiter},
    whitespace::parse_whitespace,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Keyword(Keyword),
    Numeral(Numeral),
    Identifier(String),
    Literal(Literal),
    Delimiter(Delimiter),
    Whitespace(String),
}

impl Token {
    /// The word a keyword, numeral or identifier was spelled with.
    ///
    /// Used where any word is accepted syntactically and reserved words are
    /// rejected later with a dedicated error.
    pub fn word(&self) -> Option<String> {
        match self {
            Token::Keyword(k) => Some(k.to_string()),
            Token::Numeral(n) => Some(n.to_string()),
            Token::Identifier(s) => Some(s.clone()),
            _ => None,
        }
    }

    pub fn is_trivia(&self) -> bool {
        matches!(self, Token::Whitespace(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Keyword(k) => write!(f, "{}", k),
            Token::Numeral(n) => write!(f, "{}", n),
            Token::Identifier(s) => write!(f, "{}", s),
            Token::Literal(Literal::String(s)) => write!(f, "\"{}\"", s),
            Token::Literal(Literal::Char(c)) => write!(f, "'{}'", c),
            Token::Literal(Literal::Integer(i)) => write!(f, "{}", i),
            Token::Literal(Literal::Float(x)) => write!(f, "{}", x),
            Token::Delimiter(d) => write!(f, "{}", d),
            Token::Whitespace(ws) => write!(f, "{}", ws),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    current_position: usize,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    #[tracing::instrument(level = "debug", skip(input))]
    pub fn tokenize(&mut self, input: &str) -> TokenizerResult<Vec<TokenSpan>> {
        let mut tokens = Vec::new();
        let mut remaining = input;

        while !remaining.is_empty() {
            let start_position = self.current_position;

            let result = alt((parse_whitespace, parse_literal, parse_delimiter, parse_word))(remaining);

            match result {
                Ok((new_remaining, token)) => {
                    self.current_position += remaining.len() - new_remaining.len();
                    tokens.push(TokenSpan {
                        token,
                        start: start_position,
                        end: self.current_position,
                    });
                    remaining = new_remaining;
                }
                Err(e) => {
                    let found = remaining
                        .split_whitespace()
                        .next()
                        .unwrap_or(remaining)
                        .to_string();
                    let message = match e {
                        nom::Err::Incomplete(needed) => format!("Incomplete input, {:?}", needed),
                        nom::Err::Error(e) | nom::Err::Failure(e) => {
                            nom::error::convert_error(remaining, e)
                        }
                    };
                    let error = TokenizerError::ParseError {
                        message,
                        found,
                        offset: self.current_position,
                    };
                    tracing::debug!("{}", error);
                    return Err(error);
                }
            }
        }

        Ok(tokens)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenSpan {
    pub token: Token,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

#[tracing::instrument(level = "debug", skip(input))]
fn parse_word(input: &str) -> ParserResult<Token> {
    let (input, word) = context(
        "word",
        recognize(pair(
            take_while1(|c: char| c.is_alphabetic() || c == '_'),
            take_while(|c: char| c.is_alphanumeric() || c == '_'),
        )),
    )(input)?;

    if let Some(kw) = Keyword::lookup(word) {
        return Ok((input, Token::Keyword(kw)));
    }
    if let Some(numeral) = Numeral::lookup(word) {
        return Ok((input, Token::Numeral(numeral)));
    }

    Ok((input, Token::Identifier(word.to_lowercase())))
}

pub type ParserResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

pub type TokenizerResult<T> = Result<T, TokenizerError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenizerError {
    #[error("Parse error: {message} at offset {offset}")]
    ParseError {
        message: String,
        found: String,
        offset: usize,
    },
}
