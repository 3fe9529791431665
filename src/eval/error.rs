use thiserror::Error;

use crate::formatter::numerals::integer_to_words;

/// Runtime failures of evaluation and assignment.
///
/// The `Display` text of each variant is the answer given to the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("I don't remember {0}.")]
    UnknownName(String),
    #[error("I can't define {0} in terms of itself.")]
    CircularDependency(String),
    #[error(
        "I can't count from {} to {} in steps of {}.",
        words(.start),
        words(.end),
        words(.step)
    )]
    RangeDirection { start: i64, end: i64, step: i64 },
    #[error("{0} doesn't take anything, so I can't use it with of.")]
    NotAFunction(String),
    #[error("I can't {operation} {left} and {right}.")]
    TypeMismatch {
        operation: &'static str,
        left: &'static str,
        right: &'static str,
    },
    #[error("I can't divide by zero.")]
    DivisionByZero,
}

fn words(n: &i64) -> String {
    integer_to_words(*n)
}

impl EvalError {
    /// The name the error is about, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            EvalError::UnknownName(name)
            | EvalError::CircularDependency(name)
            | EvalError::NotAFunction(name) => Some(name),
            _ => None,
        }
    }
}

pub type EvalResult<T> = Result<T, EvalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            EvalError::UnknownName("y".to_string()).to_string(),
            "I don't remember y."
        );
        assert_eq!(
            EvalError::RangeDirection {
                start: 1,
                end: 5,
                step: -1
            }
            .to_string(),
            "I can't count from one to five in steps of negative one."
        );
    }

    #[test]
    fn test_name() {
        assert_eq!(
            EvalError::CircularDependency("x".to_string()).name(),
            Some("x")
        );
        assert_eq!(EvalError::DivisionByZero.name(), None);
    }
}
