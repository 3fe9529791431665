use crate::ast::Expression;
use crate::formatter::config::FormatterConfig;

use super::arithmetic;
use super::context::{Bindings, Environment};
use super::dependency::dependencies;
use super::error::{EvalError, EvalResult};
use super::value::Value;

pub struct Evaluator<'a, E: Environment + ?Sized> {
    env: &'a E,
    numbers: FormatterConfig,
}

impl<'a, E: Environment + ?Sized> Evaluator<'a, E> {
    pub fn new(env: &'a E) -> Self {
        Self {
            env,
            numbers: env.formatter_config(),
        }
    }

    /// Definition-time evaluation.
    ///
    /// Subtrees that mention no name at all are computed and replaced by
    /// their literal value; the rest is rebuilt around them unchanged. A
    /// closed subtree that fails to compute (`one divided by zero`) is kept
    /// as written, so the failure surfaces when it is printed.
    pub fn fold(&self, expression: &Expression) -> Expression {
        if expression.is_literal() {
            return expression.clone();
        }
        if dependencies(expression).is_empty() {
            match self.resolve(expression, &Bindings::new()) {
                Ok(value) => return value.into_expression(),
                Err(e) => tracing::debug!("left unfolded: {}", e),
            }
        }
        expression.map_children(|child| self.fold(child))
    }

    /// Full evaluation to a value.
    pub fn resolve(&self, expression: &Expression, bindings: &Bindings) -> EvalResult<Value> {
        match expression {
            Expression::IntLiteral(i) => Ok(Value::Integer(*i)),
            Expression::FloatLiteral(f) => Ok(Value::Float(*f)),
            Expression::StringLiteral(s) => Ok(Value::String(s.clone())),
            Expression::CharLiteral(c) => Ok(Value::Char(*c)),
            Expression::BoolLiteral(b) => Ok(Value::Boolean(*b)),
            Expression::VariableName(name) => self.resolve_variable(name, bindings),
            Expression::VariableWithParam { function, param } => {
                self.resolve_call(function, param, bindings)
            }
            Expression::Additive { op, left, right } => {
                let left = self.resolve(left, bindings)?;
                let right = self.resolve(right, bindings)?;
                arithmetic::apply((*op).into(), left, right, &self.numbers)
            }
            Expression::Multiplicative { op, left, right } => {
                let left = self.resolve(left, bindings)?;
                let right = self.resolve(right, bindings)?;
                arithmetic::apply((*op).into(), left, right, &self.numbers)
            }
            Expression::Comparison { op, left, right } => {
                let left = self.resolve(left, bindings)?;
                let right = self.resolve(right, bindings)?;
                arithmetic::compare(*op, &left, &right)
            }
            Expression::Conditional {
                condition,
                then_branch,
                else_ifs,
                else_branch,
            } => {
                if self.resolve(condition, bindings)?.is_truthy() {
                    return self.resolve(then_branch, bindings);
                }
                for else_if in else_ifs {
                    if self.resolve(&else_if.condition, bindings)?.is_truthy() {
                        return self.resolve(&else_if.branch, bindings);
                    }
                }
                match else_branch {
                    Some(branch) => self.resolve(branch, bindings),
                    None => Ok(Value::String(String::new())),
                }
            }
            Expression::List(items) => items
                .iter()
                .map(|item| self.resolve(item, bindings))
                .collect::<EvalResult<Vec<_>>>()
                .map(Value::List),
            Expression::Range { start, end, step } => {
                let start = self.resolve_integer(start, bindings)?;
                let end = self.resolve_integer(end, bindings)?;
                let step = match step {
                    Some(step) => Some(self.resolve_integer(step, bindings)?),
                    None => None,
                };
                expand_range(start, end, step)
            }
            Expression::ForLoop {
                iterator,
                range,
                body,
            } => self.resolve_for_loop(iterator, range, body, bindings),
        }
    }

    fn resolve_variable(&self, name: &str, bindings: &Bindings) -> EvalResult<Value> {
        if let Some(value) = bindings.get(name) {
            return Ok(value.clone());
        }
        match self.env.definition(name) {
            Some((_, body)) => self.resolve(body, &Bindings::new()),
            None => Err(EvalError::UnknownName(name.to_string())),
        }
    }

    /// `f of x`: the argument is bound to the first declared parameter and
    /// the body is evaluated with that binding only.
    fn resolve_call(
        &self,
        function: &str,
        param: &Expression,
        bindings: &Bindings,
    ) -> EvalResult<Value> {
        let (params, body) = self
            .env
            .definition(function)
            .ok_or_else(|| EvalError::UnknownName(function.to_string()))?;
        let parameter = params
            .first()
            .ok_or_else(|| EvalError::NotAFunction(function.to_string()))?;
        let argument = self.resolve(param, bindings)?;

        let mut scope = Bindings::new();
        scope.insert(parameter.clone(), argument);
        self.resolve(body, &scope)
    }

    fn resolve_integer(&self, expression: &Expression, bindings: &Bindings) -> EvalResult<i64> {
        let value = self.resolve(expression, bindings)?;
        value.as_integer().ok_or(EvalError::TypeMismatch {
            operation: "count with",
            left: value.type_name(),
            right: "a whole number",
        })
    }

    fn resolve_for_loop(
        &self,
        iterator: &str,
        range: &Expression,
        body: &Expression,
        bindings: &Bindings,
    ) -> EvalResult<Value> {
        let items = match self.resolve(range, bindings)? {
            Value::List(items) => items,
            Value::String(s) => s.chars().map(Value::Char).collect(),
            scalar => vec![scalar],
        };

        let mut results = Vec::new();
        for item in items {
            let mut scope = bindings.clone();
            scope.insert(iterator.to_string(), item);
            match body {
                Expression::List(parts) => {
                    for part in parts {
                        results.push(self.resolve(part, &scope)?);
                    }
                }
                single => results.push(self.resolve(single, &scope)?),
            }
        }
        Ok(Value::List(results))
    }
}

/// Inclusive integer range. The step defaults to one in the direction of
/// `end`; a step that is zero or points away from `end` is rejected.
pub fn expand_range(start: i64, end: i64, step: Option<i64>) -> EvalResult<Value> {
    let step = step.unwrap_or(if start <= end { 1 } else { -1 });
    if step == 0 || (end > start && step < 0) || (end < start && step > 0) {
        return Err(EvalError::RangeDirection { start, end, step });
    }

    let mut values = Vec::new();
    let mut current = start;
    while (step > 0 && current <= end) || (step < 0 && current >= end) {
        values.push(Value::Integer(current));
        match current.checked_add(step) {
            Some(next) => current = next,
            None => break,
        }
    }
    Ok(Value::List(values))
}
