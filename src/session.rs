//! # Session
//!
//! One conversation with the memory. A [`Session`] takes a line of user
//! text through normalization and parsing, runs the command against its
//! [`Memory`], ages every entry the command did not mention and renders the
//! answer.
//!
//! Long printed answers are cut at the output budget; the rest is kept until
//! the user says `more`.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::analyzer;
use crate::ast::{Command, Expression};
use crate::config::SessionConfig;
use crate::error::{MnemonError, MnemonResult};
use crate::eval::{dependency_set, Bindings, EvalError, Evaluator, Value};
use crate::formatter::{sentence, Formatter};
use crate::memory::Memory;
use crate::preprocessor::Preprocessor;
use crate::tokenizer::{keyword::Keyword, numeral::Numeral};

const MORE_SUFFIX: &str = "... say more to hear the rest.";
const NOTHING_MORE: &str = "There is nothing more to tell.";

pub struct Session {
    memory: Memory,
    preprocessor: Preprocessor,
    formatter: Formatter,
    config: SessionConfig,
    overflow: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            memory: Memory::from_config(&config),
            preprocessor: Preprocessor::new(),
            formatter: Formatter::new(config.formatter.clone()),
            config,
            overflow: None,
        }
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The answer to one line of input, failures included.
    pub fn respond(&mut self, input: &str) -> String {
        match self.execute(input) {
            Ok(answer) => answer,
            Err(e) => e.to_string(),
        }
    }

    /// Runs one line of input.
    ///
    /// Every command except `more` ages the entries it did not reference,
    /// whether it succeeded or not. A line that does not parse references
    /// nothing.
    #[tracing::instrument(level = "info", skip(self))]
    pub fn execute(&mut self, input: &str) -> MnemonResult<String> {
        let normalized = self.preprocessor.process(input);
        let command = match analyzer::parse(&normalized) {
            Ok(command) => command,
            Err(e) => {
                self.memory.tick(&BTreeSet::new());
                return Err(e);
            }
        };

        let ages = command != Command::More;
        let referenced = references(&command);
        let result = self.dispatch(command);
        if ages {
            let forgotten = self.memory.tick(&referenced);
            if !forgotten.is_empty() {
                info!(forgotten = ?forgotten, "memory faded");
            }
        }
        result
    }

    #[tracing::instrument(level = "debug", skip(self), fields(kind = command.kind()))]
    fn dispatch(&mut self, command: Command) -> MnemonResult<String> {
        match command {
            Command::Let {
                name,
                params,
                expression,
            } => self.remember(&name, &params, expression),
            Command::Print { expression } => self.tell(&expression),
            Command::Clear { name } => self.clear(&name),
            Command::Reset { name } => self.remind(&name),
            Command::More => Ok(self.more()),
        }
    }

    fn remember(
        &mut self,
        name: &str,
        params: &[String],
        expression: Expression,
    ) -> MnemonResult<String> {
        if let Some(reserved) = std::iter::once(name)
            .chain(params.iter().map(String::as_str))
            .find(|word| is_reserved(word))
        {
            return Err(MnemonError::ReservedName(reserved.to_string()));
        }

        let entry = self.memory.assign(name, params, expression)?;
        let answer = match Value::from_literal(&entry.body) {
            Some(value) if entry.has_value => format!(
                "I'll remember {} as {}",
                entry.name,
                self.formatter.value(&value)
            ),
            _ => format!("I'll remember {}", entry.name),
        };
        Ok(sentence(&answer))
    }

    fn tell(&mut self, expression: &Expression) -> MnemonResult<String> {
        self.overflow = None;
        let value = Evaluator::new(&self.memory).resolve(expression, &Bindings::new())?;
        let text = self.formatter.value(&value);
        debug!(length = text.len(), "rendered answer");
        Ok(self.paginate(&text))
    }

    fn clear(&mut self, name: &str) -> MnemonResult<String> {
        let name = name.to_lowercase();
        match self.memory.forget(&name) {
            Some(_) => Ok(format!("I've forgotten {}.", name)),
            None => Err(EvalError::UnknownName(name).into()),
        }
    }

    fn remind(&self, name: &str) -> MnemonResult<String> {
        let name = name.to_lowercase();
        let entry = self
            .memory
            .get(&name)
            .ok_or_else(|| EvalError::UnknownName(name.clone()))?;
        let echo = self.formatter.expression(&entry.body)?;
        let answer = if entry.params.is_empty() {
            format!("{} is {}", entry.name, echo)
        } else {
            format!("{} of {} is {}", entry.name, entry.params.join(" and "), echo)
        };
        Ok(sentence(&answer))
    }

    fn more(&mut self) -> String {
        match self.overflow.take() {
            Some(rest) => self.paginate(&rest),
            None => NOTHING_MORE.to_string(),
        }
    }

    /// Cuts `text` at the last word boundary within the output budget and
    /// keeps the remainder for `more`.
    fn paginate(&mut self, text: &str) -> String {
        let budget = self.config.output_budget;
        let Some((limit, _)) = text.char_indices().nth(budget) else {
            return sentence(text);
        };

        let cut = if text[limit..].starts_with(char::is_whitespace) {
            limit
        } else {
            text[..limit]
                .rfind(char::is_whitespace)
                .filter(|&i| i > 0)
                .unwrap_or(limit)
        };
        let (head, rest) = text.split_at(cut);
        self.overflow = Some(rest.trim_start().to_string());
        format!("{}{}", head.trim_end(), MORE_SUFFIX)
    }
}

/// The names a command mentions; these do not fade on this command.
fn references(command: &Command) -> BTreeSet<String> {
    match command {
        Command::Let {
            name,
            params,
            expression,
        } => {
            let mut names = dependency_set(expression);
            for param in params {
                names.remove(&param.to_lowercase());
            }
            names.insert(name.to_lowercase());
            names
        }
        Command::Print { expression } => dependency_set(expression),
        Command::Clear { name } | Command::Reset { name } => {
            BTreeSet::from([name.to_lowercase()])
        }
        Command::More => BTreeSet::new(),
    }
}

fn is_reserved(word: &str) -> bool {
    Keyword::lookup(word).is_some() || Numeral::lookup(word).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::formatter::config::FormatterConfig;
    use pretty_assertions::assert_eq;

    fn say(session: &mut Session, lines: &[&str]) -> Vec<String> {
        lines.iter().map(|line| session.respond(line)).collect()
    }

    #[test]
    fn test_redefinition_flows_through_dependents() {
        let mut session = Session::default();
        let answers = say(
            &mut session,
            &[
                "remember x as one.",
                "remember y as x plus one.",
                "tell me about y.",
                "remember x as two.",
                "tell me about y.",
            ],
        );
        assert_eq!(
            answers,
            vec![
                "I'll remember x as one.",
                "I'll remember y.",
                "two.",
                "I'll remember x as two.",
                "three.",
            ]
        );
    }

    #[test]
    fn test_clear_inlines_into_dependents() {
        let mut session = Session::default();
        let answers = say(
            &mut session,
            &[
                "remember a as five.",
                "remember b as a plus ten.",
                "clear a.",
                "tell me about b.",
            ],
        );
        assert_eq!(answers[2], "I've forgotten a.");
        assert_eq!(answers[3], "fifteen.");
        assert_eq!(
            session.memory().get("b").unwrap().body,
            Expression::IntLiteral(15)
        );
    }

    #[test]
    fn test_unknown_name_is_not_created() {
        let mut session = Session::default();
        assert_eq!(session.respond("remember x as y."), "I don't remember y.");
        assert!(!session.memory().contains("x"));
    }

    #[test]
    fn test_stepped_loop() {
        let mut session = Session::default();
        session.respond("remember evens as for n in zero to ten step two, n.");
        let answer = session.respond("tell me about evens.");
        for word in ["zero", "two", "four", "six", "eight", "ten"] {
            assert!(answer.contains(word), "{} missing from {}", word, answer);
        }
        for word in ["one", "three", "five", "seven", "nine"] {
            assert!(!answer.contains(word), "{} found in {}", word, answer);
        }
    }

    #[test]
    fn test_mutual_definition_is_circular() {
        let mut session = Session::default();
        session.respond("remember a as one.");
        session.respond("remember b as a.");
        let before = session.memory().get("a").cloned();
        assert_eq!(
            session.respond("remember a as b."),
            "I can't define a in terms of itself."
        );
        assert_eq!(session.memory().get("a").cloned().map(|e| e.body), before.map(|e| e.body));
    }

    #[test]
    fn test_reset_echoes_stored_expression() {
        let mut session = Session::default();
        session.respond("remember x as one.");
        session.respond("remember y as x plus one.");
        assert_eq!(session.respond("remind me about y."), "y is x plus one.");
        session.respond("remember double of n as n times two.");
        assert_eq!(
            session.respond("remind me about double."),
            "double of n is n times two."
        );
        assert_eq!(session.respond("remind me about z."), "I don't remember z.");
    }

    #[test]
    fn test_reserved_names() {
        let mut session = Session::default();
        assert_eq!(
            session.respond("remember one as two."),
            "I can't use \"one\" as a name."
        );
        assert_eq!(
            session.respond("remember list as two."),
            "I can't use \"list\" as a name."
        );
        assert!(session.memory().is_empty());
    }

    #[test]
    fn test_syntax_error_still_ages_memory() {
        let mut session = Session::default();
        session.respond("remember x as one.");
        let error = session.execute("tell me about plus").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Syntax);
        assert_eq!(session.memory().get("x").unwrap().fade, 2);
    }

    #[test]
    fn test_function_call() {
        let mut session = Session::default();
        session.respond("remember double of n as n times two.");
        assert_eq!(session.respond("tell me about double of four."), "eight.");
        session.respond("remember x as three.");
        assert_eq!(
            session.respond("tell me about x of two."),
            "x doesn't take anything, so I can't use it with of."
        );
    }

    #[test]
    fn test_long_answers_wait_for_more() {
        let mut session = Session::new(SessionConfig {
            output_budget: 20,
            ..SessionConfig::default()
        });
        assert_eq!(session.respond("more"), NOTHING_MORE);

        session.respond("remember xs as one to six.");
        let first = session.respond("tell me about xs.");
        assert_eq!(first, "[one, two, three,... say more to hear the rest.");
        let second = session.respond("more");
        assert_eq!(second, "four, five, six].");
        assert_eq!(session.respond("more"), NOTHING_MORE);
    }

    #[test]
    fn test_more_does_not_age_memory() {
        let mut session = Session::default();
        session.respond("remember x as one.");
        assert_eq!(session.execute("more"), Ok(NOTHING_MORE.to_string()));
        session.respond("more");
        assert_eq!(session.memory().get("x").unwrap().fade, 1);
    }

    #[test]
    fn test_numbers_joined_to_text_follow_config() {
        let line = "tell me about \"left: \" plus one divided by four.";
        assert_eq!(Session::default().respond(line), "left: one quarter.");

        let mut session = Session::new(SessionConfig {
            formatter: FormatterConfig {
                max_denominator: 2,
                ..FormatterConfig::default()
            },
            ..SessionConfig::default()
        });
        assert_eq!(session.respond(line), "left: zero point two five.");
    }
}
