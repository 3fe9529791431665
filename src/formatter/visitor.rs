use std::fmt::Write;

use crate::ast::{ElseIf, Expression};
use crate::formatter::config::FormatterConfig;
use crate::formatter::error::FormatterResult;
use crate::formatter::numerals::{float_to_words, integer_to_words};

const LOOSEST: u8 = 0;
const RANGE: u8 = 1;
const COMPARISON: u8 = 2;
const ADDITIVE: u8 = 3;
const MULTIPLICATIVE: u8 = 4;
const CALL: u8 = 5;
const ATOM: u8 = 6;

fn precedence(expression: &Expression) -> u8 {
    match expression {
        Expression::ForLoop { .. } | Expression::Conditional { .. } => LOOSEST,
        Expression::Range { .. } => RANGE,
        Expression::Comparison { .. } => COMPARISON,
        Expression::Additive { .. } => ADDITIVE,
        Expression::Multiplicative { .. } => MULTIPLICATIVE,
        Expression::VariableWithParam { .. } => CALL,
        _ => ATOM,
    }
}

/// Writes an expression back out in the phrasing the parser reads.
///
/// Children that bind looser than their position allows are put in
/// parentheses. Number literals are spelled out.
pub struct FormatterVisitor {
    config: FormatterConfig,
    output: String,
}

impl FormatterVisitor {
    pub fn new(config: FormatterConfig) -> Self {
        Self {
            config,
            output: String::new(),
        }
    }

    pub fn format_expression(&mut self, expression: &Expression) -> FormatterResult<String> {
        self.output.clear();
        self.visit(expression, LOOSEST)?;
        Ok(self.output.clone())
    }

    fn visit(&mut self, expression: &Expression, min_precedence: u8) -> FormatterResult<()> {
        if precedence(expression) < min_precedence {
            self.write("(")?;
            self.visit_node(expression)?;
            self.write(")")
        } else {
            self.visit_node(expression)
        }
    }

    fn visit_node(&mut self, expression: &Expression) -> FormatterResult<()> {
        match expression {
            Expression::IntLiteral(i) => self.write(&integer_to_words(*i)),
            Expression::FloatLiteral(f) => {
                let words = float_to_words(*f, &self.config);
                self.write(&words)
            }
            Expression::StringLiteral(s) => Ok(write!(self.output, "\"{}\"", s)?),
            Expression::CharLiteral(c) => Ok(write!(self.output, "'{}'", c)?),
            Expression::BoolLiteral(b) => Ok(write!(self.output, "{}", b)?),
            Expression::VariableName(name) => self.write(name),
            Expression::VariableWithParam { function, param } => {
                write!(self.output, "{} of ", function)?;
                self.visit(param, CALL)
            }
            Expression::Additive { op, left, right } => {
                self.visit(left, ADDITIVE)?;
                write!(self.output, " {} ", op)?;
                self.visit(right, ADDITIVE + 1)
            }
            Expression::Multiplicative { op, left, right } => {
                self.visit(left, MULTIPLICATIVE)?;
                write!(self.output, " {} ", op)?;
                self.visit(right, MULTIPLICATIVE + 1)
            }
            Expression::Comparison { op, left, right } => {
                self.visit(left, COMPARISON + 1)?;
                write!(self.output, " {} ", op)?;
                self.visit(right, COMPARISON + 1)
            }
            Expression::Conditional {
                condition,
                then_branch,
                else_ifs,
                else_branch,
            } => {
                self.write("if ")?;
                self.visit(condition, RANGE)?;
                self.write(" then ")?;
                self.visit(then_branch, RANGE)?;
                for ElseIf { condition, branch } in else_ifs {
                    self.write("; else if ")?;
                    self.visit(condition, RANGE)?;
                    self.write(" then ")?;
                    self.visit(branch, RANGE)?;
                }
                if let Some(branch) = else_branch {
                    self.write("; else ")?;
                    self.visit(branch, RANGE)?;
                }
                Ok(())
            }
            Expression::List(items) if items.is_empty() => self.write("an empty list"),
            Expression::List(items) => {
                self.write("list of ")?;
                self.visit_items(items)
            }
            Expression::Range { start, end, step } => {
                self.visit(start, COMPARISON)?;
                self.write(" to ")?;
                self.visit(end, COMPARISON)?;
                if let Some(step) = step {
                    self.write(" step ")?;
                    self.visit(step, COMPARISON)?;
                }
                Ok(())
            }
            Expression::ForLoop {
                iterator,
                range,
                body,
            } => {
                write!(self.output, "for {} in ", iterator)?;
                self.visit(range, RANGE)?;
                self.write(", ")?;
                match body.as_ref() {
                    Expression::List(items) if !items.is_empty() => self.visit_items(items),
                    other => self.visit_items(std::slice::from_ref(other)),
                }
            }
        }
    }

    /// Comma separated items; a nested list would swallow the separators
    /// that follow it, so it is always parenthesized.
    fn visit_items(&mut self, items: &[Expression]) -> FormatterResult<()> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.write(", ")?;
            }
            match item {
                Expression::List(inner) if !inner.is_empty() => {
                    self.write("(")?;
                    self.visit(item, LOOSEST)?;
                    self.write(")")?;
                }
                _ => self.visit(item, RANGE)?,
            }
        }
        Ok(())
    }

    fn write(&mut self, text: &str) -> FormatterResult<()> {
        self.output.push_str(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AdditiveOperator, ComparisonOperator, MultiplicativeOperator};
    use pretty_assertions::assert_eq;

    fn echo(expression: &Expression) -> String {
        FormatterVisitor::new(FormatterConfig::default())
            .format_expression(expression)
            .unwrap()
    }

    fn var(name: &str) -> Expression {
        Expression::variable(name)
    }

    #[test]
    fn test_arithmetic_echo() {
        let sum = Expression::additive(AdditiveOperator::Add, var("y"), Expression::IntLiteral(1));
        assert_eq!(echo(&sum), "y plus one");

        let product =
            Expression::multiplicative(MultiplicativeOperator::Multiply, sum.clone(), var("z"));
        assert_eq!(echo(&product), "(y plus one) times z");

        let nested = Expression::additive(
            AdditiveOperator::Subtract,
            var("a"),
            Expression::additive(AdditiveOperator::Subtract, var("b"), var("c")),
        );
        assert_eq!(echo(&nested), "a minus (b minus c)");

        let left = Expression::additive(
            AdditiveOperator::Subtract,
            Expression::additive(AdditiveOperator::Subtract, var("a"), var("b")),
            var("c"),
        );
        assert_eq!(echo(&left), "a minus b minus c");
    }

    #[test]
    fn test_literal_echo() {
        assert_eq!(echo(&Expression::IntLiteral(-241)), "negative two hundred forty one");
        assert_eq!(echo(&Expression::FloatLiteral(2.5)), "two and a half");
        assert_eq!(echo(&Expression::StringLiteral("Hi".to_string())), "\"Hi\"");
        assert_eq!(echo(&Expression::CharLiteral('a')), "'a'");
        assert_eq!(echo(&Expression::BoolLiteral(true)), "true");
    }

    #[test]
    fn test_call_echo() {
        let call = Expression::call(
            "double",
            Expression::additive(AdditiveOperator::Add, var("n"), Expression::IntLiteral(1)),
        );
        assert_eq!(echo(&call), "double of (n plus one)");
        assert_eq!(
            echo(&Expression::call("f", Expression::call("g", var("x")))),
            "f of g of x"
        );
    }

    #[test]
    fn test_conditional_echo() {
        let conditional = Expression::Conditional {
            condition: Box::new(Expression::comparison(
                ComparisonOperator::GreaterThan,
                var("x"),
                Expression::IntLiteral(3),
            )),
            then_branch: Box::new(Expression::StringLiteral("big".to_string())),
            else_ifs: vec![ElseIf {
                condition: Expression::comparison(
                    ComparisonOperator::Equal,
                    var("x"),
                    Expression::IntLiteral(3),
                ),
                branch: Expression::StringLiteral("three".to_string()),
            }],
            else_branch: Some(Box::new(Expression::StringLiteral("small".to_string()))),
        };
        assert_eq!(
            echo(&conditional),
            "if x is greater than three then \"big\"; else if x is three then \"three\"; else \"small\""
        );
    }

    #[test]
    fn test_loop_and_list_echo() {
        let evens = Expression::for_loop(
            "n",
            Expression::range(
                Expression::IntLiteral(0),
                Expression::IntLiteral(10),
                Some(Expression::IntLiteral(2)),
            ),
            Expression::List(vec![var("n"), Expression::StringLiteral(" ".to_string())]),
        );
        assert_eq!(echo(&evens), "for n in zero to ten step two, n, \" \"");

        let nested = Expression::List(vec![
            Expression::IntLiteral(1),
            Expression::List(vec![Expression::IntLiteral(2), Expression::IntLiteral(3)]),
        ]);
        assert_eq!(echo(&nested), "list of one, (list of two, three)");
        assert_eq!(echo(&Expression::List(vec![])), "an empty list");
    }
}
