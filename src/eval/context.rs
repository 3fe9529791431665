use std::collections::HashMap;

use crate::ast::Expression;
use crate::formatter::config::FormatterConfig;

use super::value::Value;

/// Transient names: loop iterators and call parameters. They shadow
/// remembered names and are never stored.
pub type Bindings = HashMap<String, Value>;

/// Read access to remembered definitions.
pub trait Environment {
    /// Declared parameters and body of a remembered name.
    fn definition(&self, name: &str) -> Option<(&[String], &Expression)>;

    /// How a number is spelled when it is joined to text.
    fn formatter_config(&self) -> FormatterConfig {
        FormatterConfig::default()
    }
}

/// An environment that remembers nothing, for evaluating closed expressions.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyEnvironment;

impl Environment for EmptyEnvironment {
    fn definition(&self, _name: &str) -> Option<(&[String], &Expression)> {
        None
    }
}

impl Environment for HashMap<String, (Vec<String>, Expression)> {
    fn definition(&self, name: &str) -> Option<(&[String], &Expression)> {
        self.get(name)
            .map(|(params, body)| (params.as_slice(), body))
    }
}
