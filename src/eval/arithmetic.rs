//! Operators over resolved values.
//!
//! Arithmetic broadcasts over lists: two lists are zipped, the shorter one
//! padded with zeros, and a list against a scalar applies the operator to
//! every element.

use std::cmp::Ordering;

use crate::ast::{ArithmeticOperator, ComparisonOperator};
use crate::formatter::{config::FormatterConfig, numerals};

use super::error::{EvalError, EvalResult};
use super::value::Value;

/// Applies `op`; `config` spells numbers that are joined to text.
pub fn apply(
    op: ArithmeticOperator,
    left: Value,
    right: Value,
    config: &FormatterConfig,
) -> EvalResult<Value> {
    match (left, right) {
        (Value::List(l), Value::List(r)) => {
            let len = l.len().max(r.len());
            let mut l = l.into_iter();
            let mut r = r.into_iter();
            (0..len)
                .map(|_| {
                    apply(
                        op,
                        l.next().unwrap_or(Value::Integer(0)),
                        r.next().unwrap_or(Value::Integer(0)),
                        config,
                    )
                })
                .collect::<EvalResult<Vec<_>>>()
                .map(Value::List)
        }
        (Value::List(items), scalar) => items
            .into_iter()
            .map(|item| apply(op, item, scalar.clone(), config))
            .collect::<EvalResult<Vec<_>>>()
            .map(Value::List),
        (scalar, Value::List(items)) => items
            .into_iter()
            .map(|item| apply(op, scalar.clone(), item, config))
            .collect::<EvalResult<Vec<_>>>()
            .map(Value::List),
        (left, right) => match op {
            ArithmeticOperator::Add => eval_add(&left, &right, config),
            ArithmeticOperator::Subtract => eval_subtract(&left, &right),
            ArithmeticOperator::Multiply => eval_multiply(&left, &right),
            ArithmeticOperator::Divide => eval_divide(&left, &right),
            ArithmeticOperator::Modulo => eval_modulo(&left, &right),
        },
    }
}

fn mismatch(operation: &'static str, left: &Value, right: &Value) -> EvalError {
    EvalError::TypeMismatch {
        operation,
        left: left.type_name(),
        right: right.type_name(),
    }
}

/// Text form of a value when it is joined to a string.
fn as_text(value: &Value, config: &FormatterConfig) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Char(c) => Some(c.to_string()),
        Value::Integer(i) => Some(numerals::integer_to_words(*i)),
        Value::Float(f) => Some(numerals::float_to_words(*f, config)),
        Value::Boolean(b) => Some(b.to_string()),
        Value::List(_) => None,
    }
}

fn eval_add(left: &Value, right: &Value, config: &FormatterConfig) -> EvalResult<Value> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => Ok(l
            .checked_add(*r)
            .map(Value::Integer)
            .unwrap_or(Value::Float(*l as f64 + *r as f64))),
        (Value::Float(l), Value::Float(r)) => Ok(Value::Float(l + r)),
        (Value::Integer(l), Value::Float(r)) => Ok(Value::Float(*l as f64 + r)),
        (Value::Float(l), Value::Integer(r)) => Ok(Value::Float(l + *r as f64)),
        _ if left.is_text() || right.is_text() => {
            match (as_text(left, config), as_text(right, config)) {
                (Some(l), Some(r)) => Ok(Value::String(l + &r)),
                _ => Err(mismatch("add", left, right)),
            }
        }
        _ => Err(mismatch("add", left, right)),
    }
}

fn eval_subtract(left: &Value, right: &Value) -> EvalResult<Value> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => Ok(l
            .checked_sub(*r)
            .map(Value::Integer)
            .unwrap_or(Value::Float(*l as f64 - *r as f64))),
        (Value::Float(l), Value::Float(r)) => Ok(Value::Float(l - r)),
        (Value::Integer(l), Value::Float(r)) => Ok(Value::Float(*l as f64 - r)),
        (Value::Float(l), Value::Integer(r)) => Ok(Value::Float(l - *r as f64)),
        _ => Err(mismatch("subtract", left, right)),
    }
}

fn eval_multiply(left: &Value, right: &Value) -> EvalResult<Value> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => Ok(l
            .checked_mul(*r)
            .map(Value::Integer)
            .unwrap_or(Value::Float(*l as f64 * *r as f64))),
        (Value::Float(l), Value::Float(r)) => Ok(Value::Float(l * r)),
        (Value::Integer(l), Value::Float(r)) => Ok(Value::Float(*l as f64 * r)),
        (Value::Float(l), Value::Integer(r)) => Ok(Value::Float(l * *r as f64)),
        _ => Err(mismatch("multiply", left, right)),
    }
}

/// Integer division stays an integer only when it is exact.
fn eval_divide(left: &Value, right: &Value) -> EvalResult<Value> {
    match (left, right) {
        (Value::Integer(_), Value::Integer(0)) => Err(EvalError::DivisionByZero),
        (Value::Integer(l), Value::Integer(r)) => match l.checked_rem(*r) {
            Some(0) => Ok(Value::Integer(l / r)),
            _ => Ok(Value::Float(*l as f64 / *r as f64)),
        },
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(_), Some(r)) if r == 0.0 => Err(EvalError::DivisionByZero),
            (Some(l), Some(r)) => Ok(Value::Float(l / r)),
            _ => Err(mismatch("divide", left, right)),
        },
    }
}

/// The remainder is never negative for a positive divisor.
fn eval_modulo(left: &Value, right: &Value) -> EvalResult<Value> {
    match (left, right) {
        (Value::Integer(_), Value::Integer(0)) => Err(EvalError::DivisionByZero),
        (Value::Integer(l), Value::Integer(r)) => Ok(l
            .checked_rem_euclid(*r)
            .map(Value::Integer)
            .unwrap_or(Value::Integer(0))),
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(_), Some(r)) if r == 0.0 => Err(EvalError::DivisionByZero),
            (Some(l), Some(r)) => Ok(Value::Float(l.rem_euclid(r))),
            _ => Err(mismatch("take the modulo of", left, right)),
        },
    }
}

pub fn compare(op: ComparisonOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    match op {
        ComparisonOperator::Equal => Ok(Value::Boolean(loose_equal(left, right))),
        ComparisonOperator::NotEqual => Ok(Value::Boolean(!loose_equal(left, right))),
        ComparisonOperator::GreaterThan => compare_values(left, right, |o| o == Ordering::Greater),
        ComparisonOperator::LessThan => compare_values(left, right, |o| o == Ordering::Less),
        ComparisonOperator::GreaterThanEqual => {
            compare_values(left, right, |o| o != Ordering::Less)
        }
        ComparisonOperator::LessThanEqual => {
            compare_values(left, right, |o| o != Ordering::Greater)
        }
    }
}

/// Text that spells a number compares as that number.
fn text_as_number(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Char(c) => c.to_digit(10).map(f64::from),
        other => other.as_f64(),
    }
}

pub fn loose_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => l == r,
        (Value::Boolean(l), Value::Boolean(r)) => l == r,
        (Value::Boolean(b), n @ (Value::Integer(_) | Value::Float(_)))
        | (n @ (Value::Integer(_) | Value::Float(_)), Value::Boolean(b)) => {
            n.as_f64() == Some(if *b { 1.0 } else { 0.0 })
        }
        (Value::List(l), Value::List(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(a, b)| loose_equal(a, b))
        }
        (l, r) if l.is_text() && r.is_text() => as_text(l, &FormatterConfig::default()) == as_text(r, &FormatterConfig::default()),
        (l, r) if l.is_text() || r.is_text() => {
            match (text_as_number(l), text_as_number(r)) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            }
        }
        (l, r) => match (l.as_f64(), r.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}

fn compare_values<F>(left: &Value, right: &Value, compare: F) -> EvalResult<Value>
where
    F: Fn(Ordering) -> bool,
{
    let ordering = match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => Some(l.cmp(r)),
        (l, r) if l.is_text() && r.is_text() => as_text(l, &FormatterConfig::default()).cmp(&as_text(r, &FormatterConfig::default())).into(),
        (l, r) => match (text_as_number(l), text_as_number(r)) {
            (Some(a), Some(b)) if !matches!(l, Value::Boolean(_) | Value::List(_))
                && !matches!(r, Value::Boolean(_) | Value::List(_)) =>
            {
                a.partial_cmp(&b)
            }
            _ => None,
        },
    };
    ordering
        .map(|o| Value::Boolean(compare(o)))
        .ok_or_else(|| mismatch("compare", left, right))
}
