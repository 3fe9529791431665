//! # Command and Expression AST
//!
//! The parser produces one [`Command`] per input line. Commands carry
//! [`Expression`] trees, which are also what the memory stores for every
//! remembered name.
//!
//! Expressions are immutable values: evaluation, folding and eviction all
//! build new trees instead of rewriting a stored one in place.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

/// A top level command, after normalization and parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// `remember <name> [of <params>] as <expression>`
    Let {
        name: String,
        params: Vec<String>,
        expression: Expression,
    },
    /// `tell me about <expression>`
    Print { expression: Expression },
    /// `clear <name>`
    Clear { name: String },
    /// `remind me about <name>`
    Reset { name: String },
    /// `more`
    More,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    IntLiteral(i64),
    FloatLiteral(f64),
    StringLiteral(String),
    CharLiteral(char),
    BoolLiteral(bool),
    VariableName(String),
    VariableWithParam {
        function: String,
        param: Box<Expression>,
    },
    Additive {
        op: AdditiveOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Multiplicative {
        op: MultiplicativeOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Comparison {
        op: ComparisonOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Conditional {
        condition: Box<Expression>,
        then_branch: Box<Expression>,
        else_ifs: Vec<ElseIf>,
        else_branch: Option<Box<Expression>>,
    },
    List(Vec<Expression>),
    Range {
        start: Box<Expression>,
        end: Box<Expression>,
        step: Option<Box<Expression>>,
    },
    ForLoop {
        iterator: String,
        range: Box<Expression>,
        body: Box<Expression>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElseIf {
    pub condition: Expression,
    pub branch: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
pub enum AdditiveOperator {
    #[strum(serialize = "plus")]
    Add,
    #[strum(serialize = "minus")]
    Subtract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
pub enum MultiplicativeOperator {
    #[strum(serialize = "times")]
    Multiply,
    #[strum(serialize = "divided by")]
    Divide,
    #[strum(serialize = "modulo")]
    Modulo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
pub enum ComparisonOperator {
    #[strum(serialize = "is")]
    Equal,
    #[strum(serialize = "is not")]
    NotEqual,
    #[strum(serialize = "is greater than")]
    GreaterThan,
    #[strum(serialize = "is less than")]
    LessThan,
    #[strum(serialize = "is at least")]
    GreaterThanEqual,
    #[strum(serialize = "is at most")]
    LessThanEqual,
}

/// Arithmetic operator shared by the additive and multiplicative nodes, used
/// where both are handled by the same broadcasting code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl From<AdditiveOperator> for ArithmeticOperator {
    fn from(op: AdditiveOperator) -> Self {
        match op {
            AdditiveOperator::Add => ArithmeticOperator::Add,
            AdditiveOperator::Subtract => ArithmeticOperator::Subtract,
        }
    }
}

impl From<MultiplicativeOperator> for ArithmeticOperator {
    fn from(op: MultiplicativeOperator) -> Self {
        match op {
            MultiplicativeOperator::Multiply => ArithmeticOperator::Multiply,
            MultiplicativeOperator::Divide => ArithmeticOperator::Divide,
            MultiplicativeOperator::Modulo => ArithmeticOperator::Modulo,
        }
    }
}

impl Expression {
    pub fn variable(name: &str) -> Self {
        Expression::VariableName(name.to_string())
    }

    pub fn additive(op: AdditiveOperator, left: Expression, right: Expression) -> Self {
        Expression::Additive {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn multiplicative(op: MultiplicativeOperator, left: Expression, right: Expression) -> Self {
        Expression::Multiplicative {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn comparison(op: ComparisonOperator, left: Expression, right: Expression) -> Self {
        Expression::Comparison {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(function: &str, param: Expression) -> Self {
        Expression::VariableWithParam {
            function: function.to_string(),
            param: Box::new(param),
        }
    }

    pub fn range(start: Expression, end: Expression, step: Option<Expression>) -> Self {
        Expression::Range {
            start: Box::new(start),
            end: Box::new(end),
            step: step.map(Box::new),
        }
    }

    pub fn for_loop(iterator: &str, range: Expression, body: Expression) -> Self {
        Expression::ForLoop {
            iterator: iterator.to_string(),
            range: Box::new(range),
            body: Box::new(body),
        }
    }

    /// True for the scalar literal variants, which need no further evaluation.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Expression::IntLiteral(_)
                | Expression::FloatLiteral(_)
                | Expression::StringLiteral(_)
                | Expression::CharLiteral(_)
                | Expression::BoolLiteral(_)
        )
    }

    /// True when the whole tree is made of literals, lists included.
    pub fn is_concrete(&self) -> bool {
        match self {
            Expression::List(items) => items.iter().all(Expression::is_concrete),
            other => other.is_literal(),
        }
    }

    /// Rebuilds this node with `f` applied to each direct child.
    ///
    /// The function name of a call and the iterator name of a loop are not
    /// children; the argument of a call and both the range and the body of a
    /// loop are.
    pub fn map_children<F>(&self, mut f: F) -> Expression
    where
        F: FnMut(&Expression) -> Expression,
    {
        match self {
            Expression::IntLiteral(_)
            | Expression::FloatLiteral(_)
            | Expression::StringLiteral(_)
            | Expression::CharLiteral(_)
            | Expression::BoolLiteral(_)
            | Expression::VariableName(_) => self.clone(),
            Expression::VariableWithParam { function, param } => Expression::call(function, f(param)),
            Expression::Additive { op, left, right } => Expression::additive(*op, f(left), f(right)),
            Expression::Multiplicative { op, left, right } => {
                Expression::multiplicative(*op, f(left), f(right))
            }
            Expression::Comparison { op, left, right } => {
                Expression::comparison(*op, f(left), f(right))
            }
            Expression::Conditional {
                condition,
                then_branch,
                else_ifs,
                else_branch,
            } => Expression::Conditional {
                condition: Box::new(f(condition)),
                then_branch: Box::new(f(then_branch)),
                else_ifs: else_ifs
                    .iter()
                    .map(|else_if| ElseIf {
                        condition: f(&else_if.condition),
                        branch: f(&else_if.branch),
                    })
                    .collect(),
                else_branch: else_branch.as_ref().map(|branch| Box::new(f(branch))),
            },
            Expression::List(items) => Expression::List(items.iter().map(&mut f).collect()),
            Expression::Range { start, end, step } => Expression::Range {
                start: Box::new(f(start)),
                end: Box::new(f(end)),
                step: step.as_ref().map(|step| Box::new(f(step))),
            },
            Expression::ForLoop {
                iterator,
                range,
                body,
            } => Expression::for_loop(iterator, f(range), f(body)),
        }
    }
}

impl Command {
    /// Name of the command kind, used in tracing output.
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Let { .. } => "let",
            Command::Print { .. } => "print",
            Command::Clear { .. } => "clear",
            Command::Reset { .. } => "reset",
            Command::More => "more",
        }
    }
}
