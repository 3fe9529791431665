//! # Answer Formatting
//!
//! Turns values and expressions into the English that ends up in answers:
//! numbers are spelled out, lists of text are run together, and stored
//! expressions are echoed in the same phrasing the parser accepts.

pub mod config;
pub mod error;
pub mod numerals;
pub mod visitor;

use crate::ast::Expression;
use crate::eval::Value;

use config::FormatterConfig;
use error::FormatterResult;
use numerals::{float_to_words, integer_to_words};
use visitor::FormatterVisitor;

#[derive(Debug, Clone, Default)]
pub struct Formatter {
    config: FormatterConfig,
}

impl Formatter {
    pub fn new(config: FormatterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Renders a value as it is printed.
    ///
    /// A list holding any text is run together into one string; other lists
    /// are enumerated in brackets. Empty text and empty lists are `nothing`.
    pub fn value(&self, value: &Value) -> String {
        match value {
            Value::Integer(i) => integer_to_words(*i),
            Value::Float(f) => float_to_words(*f, &self.config),
            Value::Boolean(b) => b.to_string(),
            Value::String(s) if s.is_empty() => "nothing".to_string(),
            Value::String(s) => s.clone(),
            Value::Char(c) => c.to_string(),
            Value::List(items) if items.is_empty() => "nothing".to_string(),
            Value::List(items) if items.iter().any(Value::is_text) => {
                items.iter().map(|item| self.text(item)).collect()
            }
            Value::List(items) => {
                let items: Vec<String> = items.iter().map(|item| self.value(item)).collect();
                format!("[{}]", items.join(", "))
            }
        }
    }

    fn text(&self, value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => self.value(other),
        }
    }

    /// Collapses text-like values into the single string they print as.
    /// Numbers, booleans and lists without text are kept.
    pub fn flatten(&self, value: Value) -> Value {
        match value {
            Value::Char(c) => Value::String(c.to_string()),
            Value::List(items) if items.iter().any(Value::is_text) => {
                Value::String(items.iter().map(|item| self.text(item)).collect())
            }
            other => other,
        }
    }

    /// Echoes an expression in canonical phrasing.
    pub fn expression(&self, expression: &Expression) -> FormatterResult<String> {
        FormatterVisitor::new(self.config.clone()).format_expression(expression)
    }
}

/// Makes sure an answer ends with `.`, `?` or `!`.
pub fn sentence(text: &str) -> String {
    let text = text.trim_end();
    if text.ends_with(['.', '?', '!']) {
        text.to_string()
    } else {
        format!("{}.", text)
    }
}
