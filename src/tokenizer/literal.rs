use nom::{
    branch::alt,
    bytes::complete::take_while,
    character::complete::{anychar, char, digit1},
    combinator::{map, map_res, opt, recognize},
    error::context,
    sequence::{delimited, pair, tuple},
};

use super::token::{ParserResult, Token};

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Char(char),
    Integer(i64),
    Float(f64),
}

#[tracing::instrument(level = "debug", skip(input))]
fn parse_string_literal(input: &str) -> ParserResult<Literal> {
    context(
        "string literal",
        map(
            delimited(char('"'), take_while(|c| c != '"'), char('"')),
            |content: &str| Literal::String(content.to_string()),
        ),
    )(input)
}

#[tracing::instrument(level = "debug", skip(input))]
fn parse_char_literal(input: &str) -> ParserResult<Literal> {
    context(
        "char literal",
        map(delimited(char('\''), anychar, char('\'')), Literal::Char),
    )(input)
}

#[tracing::instrument(level = "debug", skip(input))]
fn parse_float_literal(input: &str) -> ParserResult<Literal> {
    context(
        "float literal",
        map_res(
            recognize(tuple((opt(char('-')), digit1, char('.'), digit1))),
            |s: &str| s.parse::<f64>().map(Literal::Float),
        ),
    )(input)
}

#[tracing::instrument(level = "debug", skip(input))]
fn parse_integer_literal(input: &str) -> ParserResult<Literal> {
    context(
        "integer literal",
        map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
            s.parse::<i64>().map(Literal::Integer)
        }),
    )(input)
}

#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_literal(input: &str) -> ParserResult<Token> {
    context(
        "literal",
        map(
            alt((
                parse_string_literal,
                parse_char_literal,
                parse_float_literal,
                parse_integer_literal,
            )),
            Token::Literal,
        ),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_keeps_case_and_spaces() {
        let (rest, result) = parse_string_literal("\"Hello World\" rest").unwrap();
        assert_eq!(rest, " rest");
        assert_eq!(result, Literal::String("Hello World".to_string()));
    }

    #[test]
    fn test_empty_string() {
        let (_, result) = parse_string_literal("\"\"").unwrap();
        assert_eq!(result, Literal::String(String::new()));
    }

    #[test]
    fn test_char_literal() {
        let (rest, result) = parse_char_literal("'a' plus").unwrap();
        assert_eq!(result, Literal::Char('a'));
        assert_eq!(rest, " plus");
        assert!(parse_char_literal("'ab'").is_err());
    }

    #[test]
    fn test_number_literals() {
        let (rest, result) = parse_integer_literal("123").unwrap();
        assert_eq!(result, Literal::Integer(123));
        assert_eq!(rest, "");

        let (_, result) = parse_integer_literal("-42").unwrap();
        assert_eq!(result, Literal::Integer(-42));

        let (rest, result) = parse_float_literal("2.5.").unwrap();
        assert_eq!(result, Literal::Float(2.5));
        assert_eq!(rest, ".");
    }

    #[test]
    fn test_integer_before_terminator_is_not_float() {
        let (rest, token) = parse_literal("5.").unwrap();
        assert_eq!(token, Token::Literal(Literal::Integer(5)));
        assert_eq!(rest, ".");
    }
}
