use super::super::{core::*, prelude::*};
use crate::tokenizer::{keyword::Keyword, numeral::Numeral, symbol::Delimiter, token::Token};

// basic parsers
pub fn parse_identifier() -> impl Parser<Token, String> {
    with_context(
        satisfy(|token: &Token| match token {
            Token::Identifier(s) => Some(s.clone()),
            _ => None,
        }),
        "identifier",
    )
}

/// Any word, reserved or not. Names defined with `remember` are parsed with
/// this so that a reserved word gets a dedicated error instead of a syntax
/// error.
pub fn parse_word() -> impl Parser<Token, String> {
    with_context(satisfy(|token: &Token| token.word()), "name")
}

pub fn parse_keyword(keyword: Keyword) -> impl Parser<Token, ()> {
    as_unit(equal(Token::Keyword(keyword)))
}

pub fn parse_phrase(keywords: &[Keyword]) -> impl Parser<Token, ()> {
    tag(keywords.iter().map(|k| Token::Keyword(*k)).collect())
}

pub fn parse_numeral_word() -> impl Parser<Token, Numeral> {
    satisfy(|token: &Token| match token {
        Token::Numeral(n) => Some(*n),
        _ => None,
    })
}

pub fn parse_digit_word() -> impl Parser<Token, u32> {
    satisfy(|token: &Token| match token {
        Token::Numeral(n) => n.digit(),
        _ => None,
    })
}

// delimiters
pub fn parse_comma() -> impl Parser<Token, ()> {
    with_context(as_unit(equal(Token::Delimiter(Delimiter::Comma))), "comma")
}

pub fn parse_semicolon() -> impl Parser<Token, ()> {
    with_context(
        as_unit(equal(Token::Delimiter(Delimiter::Semicolon))),
        "semicolon",
    )
}

pub fn parse_open_paren() -> impl Parser<Token, ()> {
    as_unit(equal(Token::Delimiter(Delimiter::OpenParen)))
}

pub fn parse_close_paren() -> impl Parser<Token, ()> {
    as_unit(equal(Token::Delimiter(Delimiter::CloseParen)))
}

pub fn parse_terminator() -> impl Parser<Token, ()> {
    as_unit(satisfy(|token: &Token| match token {
        Token::Delimiter(d) if d.is_terminator() => Some(*d),
        _ => None,
    }))
}

/// `,` or `and` between the items of a list
pub fn parse_item_separator() -> impl Parser<Token, ()> {
    choice(vec![
        Box::new(parse_comma()),
        Box::new(parse_keyword(Keyword::And)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase() {
        let tokens = vec![
            Token::Keyword(Keyword::Tell),
            Token::Keyword(Keyword::Me),
            Token::Keyword(Keyword::About),
        ];
        let parser = parse_phrase(&[Keyword::Tell, Keyword::Me, Keyword::About]);
        assert_eq!(parser.parse(&tokens, 0), Ok((3, ())));
        let parser = parse_phrase(&[Keyword::Tell, Keyword::About]);
        assert!(parser.parse(&tokens, 0).is_err());
    }

    #[test]
    fn test_word_accepts_reserved() {
        let tokens = vec![Token::Numeral(Numeral::One)];
        assert_eq!(parse_word().parse(&tokens, 0), Ok((1, "one".to_string())));
        assert!(parse_identifier().parse(&tokens, 0).is_err());
    }

    #[test]
    fn test_item_separator() {
        let tokens = vec![
            Token::Delimiter(Delimiter::Comma),
            Token::Keyword(Keyword::And),
            Token::Keyword(Keyword::Plus),
        ];
        assert_eq!(parse_item_separator().parse(&tokens, 0), Ok((1, ())));
        assert_eq!(parse_item_separator().parse(&tokens, 1), Ok((2, ())));
        assert!(parse_item_separator().parse(&tokens, 2).is_err());
    }
}
