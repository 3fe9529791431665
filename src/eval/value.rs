use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ast::Expression;

/// A fully resolved value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Integer(i64),
    Float(f64),
    String(String),
    Char(char),
    Boolean(bool),
    List(Vec<Value>),
}

impl Value {
    /// `false`, zero and the empty string are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Integer(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Char(_) | Value::List(_) => true,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Value::String(_) | Value::Char(_))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Integral numbers only; `2.0` counts, `2.5` does not.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(*f as i64),
            _ => None,
        }
    }

    /// How the value is described in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) | Value::Float(_) => "a number",
            Value::String(_) => "some text",
            Value::Char(_) => "a letter",
            Value::Boolean(_) => "true or false",
            Value::List(_) => "a list",
        }
    }

    /// The literal value of a literal node, lists of literals included.
    pub fn from_literal(expression: &Expression) -> Option<Value> {
        match expression {
            Expression::IntLiteral(i) => Some(Value::Integer(*i)),
            Expression::FloatLiteral(f) => Some(Value::Float(*f)),
            Expression::StringLiteral(s) => Some(Value::String(s.clone())),
            Expression::CharLiteral(c) => Some(Value::Char(*c)),
            Expression::BoolLiteral(b) => Some(Value::Boolean(*b)),
            Expression::List(items) => items
                .iter()
                .map(Value::from_literal)
                .collect::<Option<Vec<_>>>()
                .map(Value::List),
            _ => None,
        }
    }

    pub fn into_expression(self) -> Expression {
        match self {
            Value::Integer(i) => Expression::IntLiteral(i),
            Value::Float(f) => Expression::FloatLiteral(f),
            Value::String(s) => Expression::StringLiteral(s),
            Value::Char(c) => Expression::CharLiteral(c),
            Value::Boolean(b) => Expression::BoolLiteral(b),
            Value::List(items) => {
                Expression::List(items.into_iter().map(Value::into_expression).collect())
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => write!(f, "{}", s),
            Value::Char(c) => write!(f, "{}", c),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Boolean(false).is_truthy());
        assert!(!Value::Integer(0).is_truthy());
        assert!(!Value::Float(0.0).is_truthy());
        assert!(!Value::String(String::new()).is_truthy());
        assert!(Value::String("0".to_string()).is_truthy());
        assert!(Value::List(vec![]).is_truthy());
        assert!(Value::Char(' ').is_truthy());
    }

    #[test]
    fn test_literal_conversion() {
        let list = Expression::List(vec![
            Expression::IntLiteral(1),
            Expression::CharLiteral('a'),
        ]);
        let value = Value::from_literal(&list).unwrap();
        assert_eq!(
            value,
            Value::List(vec![Value::Integer(1), Value::Char('a')])
        );
        assert_eq!(value.into_expression(), list);
        assert_eq!(Value::from_literal(&Expression::variable("x")), None);
    }

    #[test]
    fn test_as_integer() {
        assert_eq!(Value::Float(4.0).as_integer(), Some(4));
        assert_eq!(Value::Float(4.5).as_integer(), None);
        assert_eq!(Value::String("4".to_string()).as_integer(), None);
    }

    #[test]
    fn test_display() {
        let list = Value::List(vec![Value::Integer(1), Value::String("a".to_string())]);
        assert_eq!(list.to_string(), "[1, a]");
    }
}
