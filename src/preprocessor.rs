//! Phrase normalizer.
//!
//! Users may say `what's x + 1?` or `define y to be twenty-three`; the
//! grammar only knows `tell me about x plus 1?` and `remember y as twenty
//! three`. [`Preprocessor::process`] rewrites the former into the latter.
//! Quoted literals are left untouched.

use regex::{Captures, Regex};

const SHIELD_OPEN: char = '\u{E000}';
const SHIELD_CLOSE: char = '\u{E001}';

pub struct Preprocessor {
    re_literal: Regex,
    re_shielded: Regex,
    re_whitespace: Regex,
    re_please: Regex,
    re_remember_as: Regex,
    re_else_comma: Regex,
    re_hyphen: Regex,
    commands: Vec<(Regex, &'static str)>,
    operators: Vec<(Regex, &'static str)>,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

fn rule(pattern: &str, replacement: &'static str) -> (Regex, &'static str) {
    (Regex::new(pattern).unwrap(), replacement)
}

impl Preprocessor {
    pub fn new() -> Self {
        Self {
            re_literal: Regex::new(r#""[^"]*"|'[^']'"#).unwrap(),
            re_shielded: Regex::new("\u{E000}(\\d+)\u{E001}").unwrap(),
            re_whitespace: Regex::new(r"\s+").unwrap(),
            re_please: Regex::new(r"^please\s+").unwrap(),
            re_remember_as: Regex::new(
                r"^remember\s+(\w+(?:\s+of\s+\w+(?:(?:\s*,\s*|\s+and\s+)\w+)*)?)(?:\s+(?:to\s+be|be|equal\s+to|equals|is)\s+|\s*=\s*)",
            )
            .unwrap(),
            re_else_comma: Regex::new(r"\s*,\s*else\b").unwrap(),
            re_hyphen: Regex::new(r"(\p{L})-(\p{L})").unwrap(),
            // "more" phrasing first, "tell me more" would otherwise become a print
            commands: vec![
                rule(r"^(?:tell\s+me\s+more|go\s+on|continue|keep\s+going)\b", "more"),
                rule(r"^(?:define|make|create|let|set|store|save)\b", "remember"),
                rule(
                    r"^(?:what\s+is|what's|print|show(?:\s+me)?|say|evaluate|calculate|compute|tell\s+me(?:\s+about)?)\b",
                    "tell me about",
                ),
                rule(r"^(?:forget(?:\s+about)?|delete|remove|erase)\b", "clear"),
                rule(r"^(?:remind\s+me(?:\s+(?:about|of))?|recall)\b", "remind me about"),
            ],
            // two character symbols before their one character prefixes, and
            // "or equal to" phrases before the plain ones
            operators: vec![
                rule(r"\s*>=\s*", " is at least "),
                rule(r"\s*<=\s*", " is at most "),
                rule(r"\s*!=\s*", " is not "),
                rule(r"\s*==\s*", " is "),
                rule(r"\s*>\s*", " is greater than "),
                rule(r"\s*<\s*", " is less than "),
                rule(r"\s*\+\s*", " plus "),
                rule(r"\s*\*\s*", " times "),
                rule(r"\s*/\s*", " divided by "),
                rule(r"\s+-\s+", " minus "),
                rule(r"\b(?:added\s+to|add)\b", "plus"),
                rule(r"\btake\s+away\b", "minus"),
                rule(r"\bmultiplied\s+by\b", "times"),
                rule(r"\bover\b", "divided by"),
                rule(r"\b(?:modulus|mod|remainder)\b", "modulo"),
                rule(r"\bis\s+greater\s+than\s+or\s+equal\s+to\b", "is at least"),
                rule(r"\bis\s+less\s+than\s+or\s+equal\s+to\b", "is at most"),
                rule(r"\bis\s+(?:bigger|more)\s+than\b", "is greater than"),
                rule(r"\bis\s+(?:smaller|fewer)\s+than\b", "is less than"),
                rule(r"\bis\s+not\s+equal\s+to\b|\bisn't\b", "is not"),
                rule(r"\bis\s+equal\s+to\b|\bequals\b", "is"),
                rule(r"\botherwise\b", "else"),
                rule(r"\bthe\s+list\s+of\b", "list of"),
            ],
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn process(&self, input: &str) -> String {
        let (shielded, literals) = self.shield_literals(input);

        let mut output = self.collapse_whitespace(&shielded.to_lowercase());
        output = self.re_please.replace(&output, "").to_string();
        output = self.rewrite_commands(&output);
        output = self.rewrite_operators(&output);
        output = self.re_else_comma.replace_all(&output, "; else").to_string();
        output = self.split_hyphenated(&output);
        output = self.collapse_whitespace(&output);

        let output = self.restore_literals(&output, &literals);
        tracing::debug!(normalized = %output);
        output
    }

    /// Replaces every quoted literal with a numbered placeholder so that
    /// later rules neither lowercase nor rewrite it.
    fn shield_literals(&self, input: &str) -> (String, Vec<String>) {
        let mut literals = Vec::new();
        let shielded = self.re_literal.replace_all(input, |caps: &Captures| {
            literals.push(caps[0].to_string());
            format!("{}{}{}", SHIELD_OPEN, literals.len() - 1, SHIELD_CLOSE)
        });
        (shielded.to_string(), literals)
    }

    fn restore_literals(&self, input: &str, literals: &[String]) -> String {
        self.re_shielded
            .replace_all(input, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| literals.get(index))
                    .cloned()
                    .unwrap_or_default()
            })
            .to_string()
    }

    fn rewrite_commands(&self, input: &str) -> String {
        let mut output = input.to_string();
        for (pattern, replacement) in &self.commands {
            if pattern.is_match(&output) {
                output = pattern.replace(&output, *replacement).to_string();
                break;
            }
        }
        self.re_remember_as
            .replace(&output, "remember ${1} as ")
            .to_string()
    }

    fn rewrite_operators(&self, input: &str) -> String {
        self.operators
            .iter()
            .fold(input.to_string(), |acc, (pattern, replacement)| {
                pattern.replace_all(&acc, *replacement).to_string()
            })
    }

    // adjacent matches share a letter (`a-b-c`), so repeat until stable
    fn split_hyphenated(&self, input: &str) -> String {
        let mut output = input.to_string();
        while self.re_hyphen.is_match(&output) {
            output = self.re_hyphen.replace_all(&output, "$1 $2").to_string();
        }
        output
    }

    fn collapse_whitespace(&self, input: &str) -> String {
        self.re_whitespace.replace_all(input.trim(), " ").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn process(input: &str) -> String {
        Preprocessor::new().process(input)
    }

    #[test]
    fn test_command_synonyms() {
        assert_eq!(process("Define x to be 5."), "remember x as 5.");
        assert_eq!(process("what's x plus 2?"), "tell me about x plus 2?");
        assert_eq!(process("Show me y"), "tell me about y");
        assert_eq!(process("forget about x"), "clear x");
        assert_eq!(process("Remind me of x."), "remind me about x.");
        assert_eq!(process("tell me more"), "more");
        assert_eq!(process("please tell me about x"), "tell me about x");
    }

    #[test]
    fn test_remember_forms() {
        assert_eq!(process("let y = x + 1"), "remember y as x plus 1");
        assert_eq!(
            process("make double of n equal to n * 2"),
            "remember double of n as n times 2"
        );
        assert_eq!(
            process("remember f of a and b is a"),
            "remember f of a and b as a"
        );
        assert_eq!(process("remember x as y is z"), "remember x as y is z");
    }

    #[test]
    fn test_operator_synonyms() {
        assert_eq!(process("tell me about 7 mod 3"), "tell me about 7 modulo 3");
        assert_eq!(
            process("tell me about x >= 2"),
            "tell me about x is at least 2"
        );
        assert_eq!(
            process("tell me about x isn't y"),
            "tell me about x is not y"
        );
        assert_eq!(
            process("tell me about x is bigger than y"),
            "tell me about x is greater than y"
        );
        assert_eq!(
            process("tell me about ten take away two over 2"),
            "tell me about ten minus two divided by 2"
        );
    }

    #[test]
    fn test_else_comma_becomes_semicolon() {
        assert_eq!(
            process("remember s as if x > 2 then \"big\", otherwise \"small\""),
            "remember s as if x is greater than 2 then \"big\"; else \"small\""
        );
    }

    #[test]
    fn test_literals_are_shielded() {
        assert_eq!(
            process("Say \"Hello World, otherwise\" plus 'X'"),
            "tell me about \"Hello World, otherwise\" plus 'X'"
        );
    }

    #[test]
    fn test_hyphens_and_whitespace() {
        assert_eq!(
            process("  remember   x as twenty-three  "),
            "remember x as twenty three"
        );
        assert_eq!(process("tell me about a-b-c"), "tell me about a b c");
        assert_eq!(process("tell me about 5 - 3"), "tell me about 5 minus 3");
        assert_eq!(process("tell me about -3"), "tell me about -3");
    }
}
