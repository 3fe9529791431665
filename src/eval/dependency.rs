//! Free names of an expression.

use std::collections::BTreeSet;

use crate::ast::Expression;

/// Every remembered name `expression` refers to, in order of appearance.
///
/// Duplicates are kept. Loop iterators are excluded inside their own loop;
/// call parameters are not known here and are removed by the caller.
pub fn dependencies(expression: &Expression) -> Vec<String> {
    match expression {
        Expression::IntLiteral(_)
        | Expression::FloatLiteral(_)
        | Expression::StringLiteral(_)
        | Expression::CharLiteral(_)
        | Expression::BoolLiteral(_) => vec![],
        Expression::VariableName(name) => vec![name.clone()],
        // any argument, not only a bare name
        Expression::VariableWithParam { function, param } => {
            let mut deps = vec![function.clone()];
            deps.extend(dependencies(param));
            deps
        }
        Expression::Additive { left, right, .. }
        | Expression::Multiplicative { left, right, .. }
        | Expression::Comparison { left, right, .. } => {
            let mut deps = dependencies(left);
            deps.extend(dependencies(right));
            deps
        }
        Expression::Conditional {
            condition,
            then_branch,
            else_ifs,
            else_branch,
        } => {
            let mut deps = dependencies(condition);
            deps.extend(dependencies(then_branch));
            for else_if in else_ifs {
                deps.extend(dependencies(&else_if.condition));
                deps.extend(dependencies(&else_if.branch));
            }
            if let Some(branch) = else_branch {
                deps.extend(dependencies(branch));
            }
            deps
        }
        Expression::List(items) => items.iter().flat_map(dependencies).collect(),
        Expression::Range { start, end, step } => {
            let mut deps = dependencies(start);
            deps.extend(dependencies(end));
            if let Some(step) = step {
                deps.extend(dependencies(step));
            }
            deps
        }
        Expression::ForLoop {
            iterator,
            range,
            body,
        } => {
            let mut deps = dependencies(range);
            deps.extend(
                dependencies(body)
                    .into_iter()
                    .filter(|name| name != iterator),
            );
            deps
        }
    }
}

/// [`dependencies`] without duplicates, in name order.
pub fn dependency_set(expression: &Expression) -> BTreeSet<String> {
    dependencies(expression).into_iter().collect()
}

/// Every name spelled in `expression`, bound or free, iterators included.
pub fn mentioned_names(expression: &Expression) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    collect_names(expression, &mut names);
    names
}

fn collect_names(expression: &Expression, names: &mut BTreeSet<String>) {
    match expression {
        Expression::IntLiteral(_)
        | Expression::FloatLiteral(_)
        | Expression::StringLiteral(_)
        | Expression::CharLiteral(_)
        | Expression::BoolLiteral(_) => {}
        Expression::VariableName(name) => {
            names.insert(name.clone());
        }
        Expression::VariableWithParam { function, param } => {
            names.insert(function.clone());
            collect_names(param, names);
        }
        Expression::Additive { left, right, .. }
        | Expression::Multiplicative { left, right, .. }
        | Expression::Comparison { left, right, .. } => {
            collect_names(left, names);
            collect_names(right, names);
        }
        Expression::Conditional {
            condition,
            then_branch,
            else_ifs,
            else_branch,
        } => {
            collect_names(condition, names);
            collect_names(then_branch, names);
            for else_if in else_ifs {
                collect_names(&else_if.condition, names);
                collect_names(&else_if.branch, names);
            }
            if let Some(branch) = else_branch {
                collect_names(branch, names);
            }
        }
        Expression::List(items) => {
            for item in items {
                collect_names(item, names);
            }
        }
        Expression::Range { start, end, step } => {
            collect_names(start, names);
            collect_names(end, names);
            if let Some(step) = step {
                collect_names(step, names);
            }
        }
        Expression::ForLoop {
            iterator,
            range,
            body,
        } => {
            names.insert(iterator.clone());
            collect_names(range, names);
            collect_names(body, names);
        }
    }
}
