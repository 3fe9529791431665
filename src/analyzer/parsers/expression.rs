use super::{
    super::{core::*, prelude::*},
    *,
};
use crate::ast::{
    AdditiveOperator, ComparisonOperator, ElseIf, Expression, MultiplicativeOperator,
};
use crate::tokenizer::{
    keyword::Keyword,
    literal::Literal,
    numeral::{self, Numeral},
    symbol::Delimiter,
    token::Token,
};

pub fn parse_expression() -> BoxedParser<Token, Expression> {
    boxed(
        with_context(
            choice(vec![
                parse_for_loop(),
                parse_conditional(),
                parse_range(),
            ]),
            "expression",
        ),
    )
}

/// `for n in <range>, <body>[, <body>...]`
///
/// A body of more than one item becomes a list, and every item contributes
/// to each iteration.
fn parse_for_loop() -> BoxedParser<Token, Expression> {
    boxed(
        with_context(
            map(
                tuple3(
                    preceded(parse_keyword(Keyword::For), parse_identifier()),
                    preceded(parse_keyword(Keyword::In), parse_range()),
                    preceded(
                        parse_comma(),
                        separated_list1(parse_range(), parse_item_separator()),
                    ),
                ),
                |(iterator, range, mut body): (String, Expression, Vec<Expression>)| {
                    let body = if body.len() == 1 {
                        body.remove(0)
                    } else {
                        Expression::List(body)
                    };
                    Expression::for_loop(&iterator, range, body)
                },
            ),
            "for loop",
        ),
    )
}

fn parse_conditional() -> BoxedParser<Token, Expression> {
    boxed(
        with_context(
            map(
                tuple4(
                    preceded(parse_keyword(Keyword::If), parse_range()),
                    preceded(parse_keyword(Keyword::Then), parse_range()),
                    many(parse_else_if()),
                    optional(preceded(
                        tag(vec![
                            Token::Delimiter(Delimiter::Semicolon),
                            Token::Keyword(Keyword::Else),
                        ]),
                        parse_range(),
                    )),
                ),
                |(condition, then_branch, else_ifs, else_branch)| Expression::Conditional {
                    condition: Box::new(condition),
                    then_branch: Box::new(then_branch),
                    else_ifs,
                    else_branch: else_branch.map(Box::new),
                },
            ),
            "conditional",
        ),
    )
}

fn parse_else_if() -> BoxedParser<Token, ElseIf> {
    boxed(
        map(
            tuple2(
                preceded(
                    tag(vec![
                        Token::Delimiter(Delimiter::Semicolon),
                        Token::Keyword(Keyword::Else),
                        Token::Keyword(Keyword::If),
                    ]),
                    parse_range(),
                ),
                preceded(parse_keyword(Keyword::Then), parse_range()),
            ),
            |(condition, branch)| ElseIf { condition, branch },
        ),
    )
}

/// `<start> to <end> [step <step>]`, or just a comparison.
pub fn parse_range() -> BoxedParser<Token, Expression> {
    boxed(
        with_context(
            map(
                tuple2(
                    parse_comparison(),
                    optional(tuple2(
                        preceded(parse_keyword(Keyword::To), parse_comparison()),
                        optional(preceded(parse_keyword(Keyword::Step), parse_comparison())),
                    )),
                ),
                |(start, rest)| match rest {
                    Some((end, step)) => Expression::range(start, end, step),
                    None => start,
                },
            ),
            "range",
        ),
    )
}

fn parse_comparison() -> BoxedParser<Token, Expression> {
    boxed(
        with_context(
            map(
                tuple2(
                    parse_additive(),
                    optional(tuple2(parse_operator_comparison(), parse_additive())),
                ),
                |(left, rest)| match rest {
                    Some((op, right)) => Expression::comparison(op, left, right),
                    None => left,
                },
            ),
            "comparison",
        ),
    )
}

// longest phrases first, `is` alone would match the start of all of them
fn parse_operator_comparison() -> BoxedParser<Token, ComparisonOperator> {
    boxed(
        with_context(
            choice(vec![
                Box::new(parse_comparison_greater()),
                Box::new(parse_comparison_less()),
                Box::new(parse_comparison_at_least()),
                Box::new(parse_comparison_at_most()),
                Box::new(parse_comparison_not_equal()),
                Box::new(parse_comparison_equal()),
            ]),
            "comparison operator",
        ),
    )
}

fn parse_comparison_greater() -> impl Parser<Token, ComparisonOperator> {
    map(
        parse_phrase(&[Keyword::Is, Keyword::Greater, Keyword::Than]),
        |_| ComparisonOperator::GreaterThan,
    )
}

fn parse_comparison_less() -> impl Parser<Token, ComparisonOperator> {
    map(
        parse_phrase(&[Keyword::Is, Keyword::Less, Keyword::Than]),
        |_| ComparisonOperator::LessThan,
    )
}

fn parse_comparison_at_least() -> impl Parser<Token, ComparisonOperator> {
    map(
        parse_phrase(&[Keyword::Is, Keyword::At, Keyword::Least]),
        |_| ComparisonOperator::GreaterThanEqual,
    )
}

fn parse_comparison_at_most() -> impl Parser<Token, ComparisonOperator> {
    map(
        parse_phrase(&[Keyword::Is, Keyword::At, Keyword::Most]),
        |_| ComparisonOperator::LessThanEqual,
    )
}

fn parse_comparison_not_equal() -> impl Parser<Token, ComparisonOperator> {
    map(parse_phrase(&[Keyword::Is, Keyword::Not]), |_| {
        ComparisonOperator::NotEqual
    })
}

fn parse_comparison_equal() -> impl Parser<Token, ComparisonOperator> {
    map(parse_keyword(Keyword::Is), |_| ComparisonOperator::Equal)
}

fn parse_additive() -> BoxedParser<Token, Expression> {
    boxed(
        with_context(
            map(
                tuple2(
                    parse_multiplicative(),
                    many(tuple2(
                        choice(vec![
                            Box::new(parse_operator_add()),
                            Box::new(parse_operator_subtract()),
                        ]),
                        parse_multiplicative(),
                    )),
                ),
                |(first, rest)| {
                    rest.into_iter().fold(first, |left, (op, right)| {
                        Expression::additive(op, left, right)
                    })
                },
            ),
            "additive",
        ),
    )
}

fn parse_multiplicative() -> BoxedParser<Token, Expression> {
    boxed(
        with_context(
            map(
                tuple2(
                    parse_unary(),
                    many(tuple2(
                        choice(vec![
                            Box::new(parse_operator_multiply()),
                            Box::new(parse_operator_divide()),
                            Box::new(parse_operator_modulo()),
                        ]),
                        parse_unary(),
                    )),
                ),
                |(first, rest)| {
                    rest.into_iter().fold(first, |left, (op, right)| {
                        Expression::multiplicative(op, left, right)
                    })
                },
            ),
            "multiplicative",
        ),
    )
}

fn parse_operator_add() -> impl Parser<Token, AdditiveOperator> {
    map(parse_keyword(Keyword::Plus), |_| AdditiveOperator::Add)
}

fn parse_operator_subtract() -> impl Parser<Token, AdditiveOperator> {
    map(parse_keyword(Keyword::Minus), |_| AdditiveOperator::Subtract)
}

fn parse_operator_multiply() -> impl Parser<Token, MultiplicativeOperator> {
    map(parse_keyword(Keyword::Times), |_| MultiplicativeOperator::Multiply)
}

fn parse_operator_divide() -> impl Parser<Token, MultiplicativeOperator> {
    map(parse_phrase(&[Keyword::Divided, Keyword::By]), |_| {
        MultiplicativeOperator::Divide
    })
}

fn parse_operator_modulo() -> impl Parser<Token, MultiplicativeOperator> {
    map(parse_keyword(Keyword::Modulo), |_| MultiplicativeOperator::Modulo)
}

fn parse_unary() -> BoxedParser<Token, Expression> {
    boxed(
        with_context(
            choice(vec![
                parse_negation(),
                parse_call(),
            ]),
            "unary",
        ),
    )
}

fn parse_negation() -> BoxedParser<Token, Expression> {
    boxed(
        map(
            preceded(parse_keyword(Keyword::Negative), lazy(parse_unary)),
            negate,
        ),
    )
}

fn negate(expression: Expression) -> Expression {
    match expression {
        Expression::IntLiteral(value) => Expression::IntLiteral(value.wrapping_neg()),
        Expression::FloatLiteral(value) => Expression::FloatLiteral(-value),
        other => Expression::multiplicative(
            MultiplicativeOperator::Multiply,
            Expression::IntLiteral(-1),
            other,
        ),
    }
}

fn parse_call() -> BoxedParser<Token, Expression> {
    boxed(
        with_context(
            choice(vec![
                parse_function_call(),
                parse_primary(),
            ]),
            "call",
        ),
    )
}

/// `f of <argument>`
fn parse_function_call() -> BoxedParser<Token, Expression> {
    boxed(
        map(
            tuple2(
                parse_identifier(),
                preceded(parse_keyword(Keyword::Of), lazy(parse_unary)),
            ),
            |(function, param): (String, Expression)| Expression::call(&function, param),
        ),
    )
}

fn parse_primary() -> BoxedParser<Token, Expression> {
    boxed(
        with_context(
            choice(vec![
                parse_numeral(),
                Box::new(parse_literal()),
                Box::new(parse_boolean()),
                parse_list(),
                Box::new(parse_variable()),
                parse_parenthesized(),
            ]),
            "primary",
        ),
    )
}

fn parse_variable() -> impl Parser<Token, Expression> {
    map(parse_identifier(), Expression::VariableName)
}

fn parse_parenthesized() -> BoxedParser<Token, Expression> {
    boxed(
        delimited(
            parse_open_paren(),
            lazy(parse_expression),
            parse_close_paren(),
        ),
    )
}

/// Number words, with optional `point` and spelled digits:
/// `two hundred forty one`, `three point one four`.
fn parse_numeral() -> BoxedParser<Token, Expression> {
    boxed(
        with_context(
            try_map(
                tuple2(
                    many1(parse_numeral_word()),
                    optional(preceded(
                        parse_keyword(Keyword::Point),
                        many1(parse_digit_word()),
                    )),
                ),
                |(words, digits): (Vec<Numeral>, Option<Vec<u32>>)| {
                    let whole = numeral::compose(&words)?;
                    match digits {
                        None => Some(Expression::IntLiteral(whole)),
                        Some(digits) => {
                            let fraction: String = digits.iter().map(|d| d.to_string()).collect();
                            format!("{}.{}", whole, fraction)
                                .parse::<f64>()
                                .ok()
                                .map(Expression::FloatLiteral)
                        }
                    }
                },
                "not a number",
            ),
            "numeral",
        ),
    )
}

fn parse_literal() -> impl Parser<Token, Expression> {
    with_context(
        satisfy(|token: &Token| match token {
            Token::Literal(Literal::Integer(i)) => Some(Expression::IntLiteral(*i)),
            Token::Literal(Literal::Float(f)) => Some(Expression::FloatLiteral(*f)),
            Token::Literal(Literal::String(s)) => Some(Expression::StringLiteral(s.clone())),
            Token::Literal(Literal::Char(c)) => Some(Expression::CharLiteral(*c)),
            _ => None,
        }),
        "literal",
    )
}

fn parse_boolean() -> impl Parser<Token, Expression> {
    satisfy(|token: &Token| match token {
        Token::Keyword(Keyword::True) => Some(Expression::BoolLiteral(true)),
        Token::Keyword(Keyword::False) => Some(Expression::BoolLiteral(false)),
        _ => None,
    })
}

/// `list of a, b and c`
fn parse_list() -> BoxedParser<Token, Expression> {
    boxed(
        with_context(
            map(
                preceded(
                    parse_phrase(&[Keyword::List, Keyword::Of]),
                    separated_list1(lazy(parse_range), parse_item_separator()),
                ),
                Expression::List,
            ),
            "list",
        ),
    )
}
