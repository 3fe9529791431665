use super::{
    super::{core::*, prelude::*},
    *,
};
use crate::ast::{Command, Expression};
use crate::tokenizer::{keyword::Keyword, token::Token};

/// One whole command, an optional terminator, and nothing after it.
pub fn parse_command() -> BoxedParser<Token, Command> {
    boxed(
        with_context(
            map(
                tuple3(
                    choice(vec![
                        parse_let(),
                        parse_print(),
                        parse_clear(),
                        parse_reset(),
                        parse_more(),
                    ]),
                    optional(parse_terminator()),
                    end(),
                ),
                |(command, _, _)| command,
            ),
            "command",
        ),
    )
}

/// `remember <name> [of <param> (and|,) ...] as <expression>`
fn parse_let() -> BoxedParser<Token, Command> {
    boxed(
        with_context(
            map(
                preceded(
                    parse_keyword(Keyword::Remember),
                    tuple3(
                        parse_word(),
                        optional(preceded(
                            parse_keyword(Keyword::Of),
                            separated_list1(parse_identifier(), parse_item_separator()),
                        )),
                        preceded(parse_keyword(Keyword::As), parse_expression()),
                    ),
                ),
                |(name, params, expression): (String, Option<Vec<String>>, Expression)| {
                    Command::Let {
                        name,
                        params: params.unwrap_or_default(),
                        expression,
                    }
                },
            ),
            "remember",
        ),
    )
}

fn parse_print() -> BoxedParser<Token, Command> {
    boxed(
        with_context(
            map(
                preceded(
                    parse_phrase(&[Keyword::Tell, Keyword::Me, Keyword::About]),
                    parse_expression(),
                ),
                |expression| Command::Print { expression },
            ),
            "tell me about",
        ),
    )
}

fn parse_clear() -> BoxedParser<Token, Command> {
    boxed(
        with_context(
            map(preceded(parse_keyword(Keyword::Clear), parse_word()), |name| {
                Command::Clear { name }
            }),
            "clear",
        ),
    )
}

fn parse_reset() -> BoxedParser<Token, Command> {
    boxed(
        with_context(
            map(
                preceded(
                    parse_phrase(&[Keyword::Remind, Keyword::Me, Keyword::About]),
                    parse_word(),
                ),
                |name| Command::Reset { name },
            ),
            "remind me about",
        ),
    )
}

fn parse_more() -> BoxedParser<Token, Command> {
    boxed(map(parse_keyword(Keyword::More), |_| Command::More))
}
