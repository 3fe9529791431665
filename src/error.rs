use thiserror::Error;

use crate::eval::EvalError;
use crate::formatter::error::FormatterError;

/// Everything a command can fail with. The `Display` text is the answer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MnemonError {
    #[error("I didn't understand \"{token}\".")]
    Syntax { token: String, offset: usize },
    #[error(transparent)]
    Runtime(#[from] EvalError),
    #[error("I can't use \"{0}\" as a name.")]
    ReservedName(String),
    #[error("I couldn't put that into words: {0}")]
    Format(#[from] FormatterError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Runtime,
}

impl MnemonError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MnemonError::Syntax { .. } => ErrorKind::Syntax,
            _ => ErrorKind::Runtime,
        }
    }

    /// The offending name, for runtime errors that are about one.
    pub fn name(&self) -> Option<&str> {
        match self {
            MnemonError::Runtime(e) => e.name(),
            MnemonError::ReservedName(name) => Some(name),
            _ => None,
        }
    }
}

pub type MnemonResult<T> = Result<T, MnemonError>;
