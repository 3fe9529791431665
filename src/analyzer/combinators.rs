//! # Combinators
//!
//! Small parsers over token slices and the functions that combine them.
//!
//! Most combinators are closures over `(input, pos)` wrapped in
//! [`FnParser`]. [`Choice`] holds boxed alternatives, and [`Lazy`] is a plain
//! struct so that a grammar can refer back to itself without its parser type
//! containing itself.

use std::fmt;

use super::core::{BoxedParser, ParseError, ParseResult, Parser};

/// Turns a closure over `(input, pos)` into a [`Parser`].
#[derive(Clone)]
pub struct FnParser<F>(F);

impl<I, O, F> Parser<I, O> for FnParser<F>
where
    F: Fn(&[I], usize) -> ParseResult<O>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O> {
        (self.0)(input, pos)
    }
}

fn unexpected<I: fmt::Display>(expected: String, found: &I, position: usize) -> ParseError {
    ParseError::Unexpected {
        expected,
        found: found.to_string(),
        position,
    }
}

/// One item equal to `value`.
pub fn equal<I>(value: I) -> impl Parser<I, I>
where
    I: Clone + PartialEq + fmt::Display,
{
    FnParser(move |input: &[I], pos: usize| -> ParseResult<I> {
        match input.get(pos) {
            Some(found) if *found == value => Ok((pos + 1, found.clone())),
            Some(found) => Err(unexpected(value.to_string(), found, pos)),
            None => Err(ParseError::UnexpectedEOF { position: pos }),
        }
    })
}

/// A fixed run of items, such as a phrase of several keywords.
pub fn tag<I>(values: Vec<I>) -> impl Parser<I, ()>
where
    I: PartialEq + fmt::Display,
{
    FnParser(move |input: &[I], pos: usize| -> ParseResult<()> {
        for (offset, expected) in values.iter().enumerate() {
            let position = pos + offset;
            match input.get(position) {
                Some(found) if found == expected => {}
                Some(found) => return Err(unexpected(expected.to_string(), found, position)),
                None => return Err(ParseError::UnexpectedEOF { position }),
            }
        }
        Ok((pos + values.len(), ()))
    })
}

/// One item that `f` maps to a value.
pub fn satisfy<I, O, F>(f: F) -> impl Parser<I, O>
where
    I: fmt::Display,
    F: Fn(&I) -> Option<O>,
{
    FnParser(move |input: &[I], pos: usize| -> ParseResult<O> {
        let item = input
            .get(pos)
            .ok_or(ParseError::UnexpectedEOF { position: pos })?;
        f(item)
            .map(|value| (pos + 1, value))
            .ok_or_else(|| unexpected("matching token".to_string(), item, pos))
    })
}

/// Succeeds only once the whole input is consumed.
pub fn end<I: fmt::Display>() -> impl Parser<I, ()> {
    FnParser(|input: &[I], pos: usize| -> ParseResult<()> {
        match input.get(pos) {
            None => Ok((pos, ())),
            Some(found) => Err(unexpected("end of input".to_string(), found, pos)),
        }
    })
}

/// Tries each alternative in order.
///
/// When all of them fail, the failure that got furthest into the input is
/// reported, since it names the token the user most likely got wrong.
pub struct Choice<I, O> {
    parsers: Vec<Box<dyn Parser<I, O>>>,
}

impl<I, O> Parser<I, O> for Choice<I, O> {
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O> {
        let mut furthest = ParseError::NoAlternative { position: pos };
        for parser in &self.parsers {
            match parser.parse(input, pos) {
                Ok(result) => return Ok(result),
                Err(e) => furthest = furthest.furthest(e),
            }
        }
        Err(furthest)
    }
}

/// Erases the type of `parser`, ending the nesting at a rule boundary.
pub fn boxed<I, O, P>(parser: P) -> BoxedParser<I, O>
where
    P: Parser<I, O> + 'static,
{
    Box::new(parser)
}

pub fn choice<I, O>(parsers: Vec<Box<dyn Parser<I, O>>>) -> Choice<I, O> {
    Choice { parsers }
}

pub fn preceded<I, O, P1, P2>(first: P1, second: P2) -> impl Parser<I, O>
where
    P1: Parser<I, ()>,
    P2: Parser<I, O>,
{
    FnParser(move |input: &[I], pos: usize| -> ParseResult<O> {
        let (pos, _) = first.parse(input, pos)?;
        second.parse(input, pos)
    })
}

pub fn map<I, A, B, P, F>(parser: P, f: F) -> impl Parser<I, B>
where
    P: Parser<I, A>,
    F: Fn(A) -> B,
{
    FnParser(move |input: &[I], pos: usize| -> ParseResult<B> {
        let (pos, value) = parser.parse(input, pos)?;
        Ok((pos, f(value)))
    })
}

/// Like [`map`], but `f` may reject the value; the failure points at where
/// the rejected value started.
pub fn try_map<I, A, B, P, F>(parser: P, f: F, message: &str) -> impl Parser<I, B>
where
    P: Parser<I, A>,
    F: Fn(A) -> Option<B>,
{
    let message = message.to_string();
    FnParser(move |input: &[I], pos: usize| -> ParseResult<B> {
        let (next, value) = parser.parse(input, pos)?;
        f(value).map(|mapped| (next, mapped)).ok_or(ParseError::Failure {
            message: message.clone(),
            position: pos,
        })
    })
}

pub fn as_unit<I, O, P>(parser: P) -> impl Parser<I, ()>
where
    P: Parser<I, O>,
{
    FnParser(move |input: &[I], pos: usize| -> ParseResult<()> {
        parser.parse(input, pos).map(|(next, _)| (next, ()))
    })
}

/// Zero or more; stops at the first failure or at a match that consumed
/// nothing.
pub fn many<I, O, P>(parser: P) -> impl Parser<I, Vec<O>>
where
    P: Parser<I, O>,
{
    FnParser(move |input: &[I], pos: usize| -> ParseResult<Vec<O>> {
        let mut results = Vec::new();
        let mut current = pos;
        loop {
            match parser.parse(input, current) {
                Ok((next, value)) if next > current => {
                    results.push(value);
                    current = next;
                }
                Ok(_) => break,
                Err(e) => {
                    tracing::trace!(
                        target: "parser::many",
                        error = ?e,
                        position = current,
                        items_collected = results.len(),
                        "stopped collecting"
                    );
                    break;
                }
            }
        }
        Ok((current, results))
    })
}

pub fn many1<I, O, P>(parser: P) -> impl Parser<I, Vec<O>>
where
    P: Parser<I, O>,
{
    FnParser(move |input: &[I], pos: usize| -> ParseResult<Vec<O>> {
        let (mut current, first) = parser.parse(input, pos)?;
        let mut results = vec![first];
        while let Ok((next, value)) = parser.parse(input, current) {
            if next == current {
                break;
            }
            results.push(value);
            current = next;
        }
        Ok((current, results))
    })
}

/// One or more items with a separator between each pair. A trailing
/// separator is left unconsumed.
pub fn separated_list1<I, O, P, S>(item: P, separator: S) -> impl Parser<I, Vec<O>>
where
    P: Parser<I, O>,
    S: Parser<I, ()>,
{
    FnParser(move |input: &[I], pos: usize| -> ParseResult<Vec<O>> {
        let (mut current, first) = item.parse(input, pos)?;
        let mut results = vec![first];
        while let Ok((after_separator, _)) = separator.parse(input, current) {
            match item.parse(input, after_separator) {
                Ok((next, value)) => {
                    results.push(value);
                    current = next;
                }
                Err(_) => break,
            }
        }
        Ok((current, results))
    })
}

pub fn optional<I, O, P>(parser: P) -> impl Parser<I, Option<O>>
where
    P: Parser<I, O>,
{
    FnParser(move |input: &[I], pos: usize| -> ParseResult<Option<O>> {
        match parser.parse(input, pos) {
            Ok((next, value)) => Ok((next, Some(value))),
            Err(_) => Ok((pos, None)),
        }
    })
}

pub fn delimited<I, O, L, P, R>(left: L, parser: P, right: R) -> impl Parser<I, O>
where
    L: Parser<I, ()>,
    P: Parser<I, O>,
    R: Parser<I, ()>,
{
    FnParser(move |input: &[I], pos: usize| -> ParseResult<O> {
        let (pos, _) = left.parse(input, pos)?;
        let (pos, value) = parser.parse(input, pos)?;
        let (pos, _) = right.parse(input, pos)?;
        Ok((pos, value))
    })
}

pub fn tuple2<I, O1, O2, P1, P2>(first: P1, second: P2) -> impl Parser<I, (O1, O2)>
where
    P1: Parser<I, O1>,
    P2: Parser<I, O2>,
{
    FnParser(move |input: &[I], pos: usize| -> ParseResult<(O1, O2)> {
        let (pos, a) = first.parse(input, pos)?;
        let (pos, b) = second.parse(input, pos)?;
        Ok((pos, (a, b)))
    })
}

pub fn tuple3<I, O1, O2, O3, P1, P2, P3>(
    first: P1,
    second: P2,
    third: P3,
) -> impl Parser<I, (O1, O2, O3)>
where
    P1: Parser<I, O1>,
    P2: Parser<I, O2>,
    P3: Parser<I, O3>,
{
    FnParser(move |input: &[I], pos: usize| -> ParseResult<(O1, O2, O3)> {
        let (pos, a) = first.parse(input, pos)?;
        let (pos, b) = second.parse(input, pos)?;
        let (pos, c) = third.parse(input, pos)?;
        Ok((pos, (a, b, c)))
    })
}

pub fn tuple4<I, O1, O2, O3, O4, P1, P2, P3, P4>(
    first: P1,
    second: P2,
    third: P3,
    fourth: P4,
) -> impl Parser<I, (O1, O2, O3, O4)>
where
    P1: Parser<I, O1>,
    P2: Parser<I, O2>,
    P3: Parser<I, O3>,
    P4: Parser<I, O4>,
{
    FnParser(move |input: &[I], pos: usize| -> ParseResult<(O1, O2, O3, O4)> {
        let (pos, a) = first.parse(input, pos)?;
        let (pos, b) = second.parse(input, pos)?;
        let (pos, c) = third.parse(input, pos)?;
        let (pos, d) = fourth.parse(input, pos)?;
        Ok((pos, (a, b, c, d)))
    })
}

/// Wraps any failure with a description of what was being parsed.
pub fn with_context<I, O, P, C>(parser: P, context: C) -> impl Parser<I, O>
where
    P: Parser<I, O>,
    C: ToString,
{
    let context = context.to_string();
    FnParser(move |input: &[I], pos: usize| -> ParseResult<O> {
        parser
            .parse(input, pos)
            .map_err(|e| ParseError::WithContext {
                context: context.clone(),
                inner: Box::new(e),
            })
    })
}

/// Builds its parser on every use, which lets a rule mention itself.
#[derive(Clone)]
pub struct Lazy<F> {
    f: F,
}

impl<I, O, F, P> Parser<I, O> for Lazy<F>
where
    F: Fn() -> P,
    P: Parser<I, O>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O> {
        (self.f)().parse(input, pos)
    }
}

pub fn lazy<F>(f: F) -> Lazy<F> {
    Lazy { f }
}
