use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::ast::Expression;
use crate::eval::{dependencies, dependency_set, mentioned_names, Bindings, Evaluator};
use crate::formatter::Formatter;

use super::{Entry, Memory};

impl Memory {
    /// Ages every entry not in `referenced` by one and forgets the entries
    /// whose fade went past the limit, in name order.
    ///
    /// Returns the forgotten names.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn tick(&mut self, referenced: &BTreeSet<String>) -> Vec<String> {
        for (name, entry) in self.entries.iter_mut() {
            if !referenced.contains(name) {
                entry.fade += 1;
            }
        }

        let mut expired: Vec<String> = self
            .entries
            .values()
            .filter(|entry| entry.fade > self.fade_limit)
            .map(|entry| entry.name.clone())
            .collect();
        expired.sort();

        for name in &expired {
            info!(name = %name, "faded from memory");
            self.forget(name);
        }
        expired
    }

    /// Removes `name`, first rewriting every entry that depends on it
    /// directly so that it no longer needs it.
    ///
    /// Dependents get the forgotten body in place of the name and inherit its
    /// dependencies. One whose dependencies run out is computed to a value on
    /// the spot. Fades are kept; a parameter is only renamed when it would
    /// capture a name of the inlined body.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn forget(&mut self, name: &str) -> Option<Entry> {
        let name = name.to_lowercase();
        let forgotten = self.entries.get(&name)?.clone();

        let mut dependents: Vec<String> = self
            .entries
            .values()
            .filter(|entry| entry.name != name && entry.deps.contains(&name))
            .map(|entry| entry.name.clone())
            .collect();
        dependents.sort();

        for dependent in dependents {
            let Some(entry) = self.entries.get(&dependent) else {
                continue;
            };

            let (params, body) = self.release_params(entry, &forgotten);
            let body = substitute(&body, &name, &forgotten);
            let mut deps = entry.deps.clone();
            deps.remove(&name);
            deps.extend(forgotten.deps.iter().cloned());

            let (body, has_value) = if deps.is_empty() {
                self.settle(&dependent, body, &params)
            } else {
                (body, false)
            };
            debug!(dependent = %dependent, has_value, "inlined {}", name);

            if let Some(entry) = self.entries.get_mut(&dependent) {
                entry.params = params;
                entry.body = body;
                entry.deps = deps;
                entry.has_value = has_value;
            }
        }

        self.entries.remove(&name)
    }

    /// Renames the parameters of `entry` that share a name with something
    /// the `forgotten` body refers to, so that inlining it cannot bind that
    /// name to the parameter.
    fn release_params(&self, entry: &Entry, forgotten: &Entry) -> (Vec<String>, Expression) {
        let introduced = free_names(forgotten);
        let mut params = entry.params.clone();
        let mut body = entry.body.clone();
        for index in 0..params.len() {
            if !introduced.contains(&params[index]) {
                continue;
            }
            let mut taken = mentioned_names(&body);
            taken.extend(introduced.iter().cloned());
            taken.extend(params.iter().cloned());
            taken.extend(self.entries.keys().cloned());
            let fresh = fresh_name(&params[index], &taken);
            debug!(name = %entry.name, param = %params[index], fresh = %fresh, "renamed parameter");
            body = replace_variable(&body, &params[index], &Expression::variable(&fresh));
            params[index] = fresh;
        }
        (params, body)
    }

    /// Computes a body that no longer refers to any remembered name.
    ///
    /// Functions are only folded, since their parameter is unbound. Text
    /// results are stored as the one string they print as.
    fn settle(&self, name: &str, body: Expression, params: &[String]) -> (Expression, bool) {
        let evaluator = Evaluator::new(self);
        if !params.is_empty() {
            return (evaluator.fold(&body), false);
        }
        match evaluator.resolve(&body, &Bindings::new()) {
            Ok(value) => {
                let value = Formatter::new(self.formatter.clone()).flatten(value);
                (value.into_expression(), true)
            }
            Err(e) => {
                warn!(name = %name, "could not compute after inlining: {}", e);
                (body, false)
            }
        }
    }
}

/// Replaces every reference to `name` in `expression` with the body of the
/// `forgotten` entry.
///
/// A call `name of x` is inlined with `x` in place of the forgotten entry's
/// first parameter. A loop whose iterator is also called `name` hides it
/// from its body. A loop whose iterator would capture a name the forgotten
/// body refers to is given a fresh iterator first.
pub fn substitute(expression: &Expression, name: &str, forgotten: &Entry) -> Expression {
    let introduced = free_names(forgotten);
    substitute_in(expression, name, forgotten, &introduced)
}

fn substitute_in(
    expression: &Expression,
    name: &str,
    forgotten: &Entry,
    introduced: &BTreeSet<String>,
) -> Expression {
    match expression {
        Expression::VariableName(n) if n == name => forgotten.body.clone(),
        Expression::VariableWithParam { function, param } => {
            let argument = substitute_in(param, name, forgotten, introduced);
            match forgotten.params.first() {
                Some(parameter) if function == name => {
                    replace_variable(&forgotten.body, parameter, &argument)
                }
                _ => Expression::call(function, argument),
            }
        }
        Expression::ForLoop {
            iterator,
            range,
            body,
        } => {
            let range = substitute_in(range, name, forgotten, introduced);
            if iterator == name {
                Expression::for_loop(iterator, range, body.as_ref().clone())
            } else if introduced.contains(iterator) && is_free_in(name, body) {
                let (fresh, body) = rename_iterator(iterator, body, name, introduced);
                let body = substitute_in(&body, name, forgotten, introduced);
                Expression::for_loop(&fresh, range, body)
            } else {
                let body = substitute_in(body, name, forgotten, introduced);
                Expression::for_loop(iterator, range, body)
            }
        }
        other => other.map_children(|child| substitute_in(child, name, forgotten, introduced)),
    }
}

/// Replaces the free occurrences of `name` with `replacement`, renaming any
/// loop in between that would capture a name of `replacement`.
fn replace_variable(expression: &Expression, name: &str, replacement: &Expression) -> Expression {
    let free = dependency_set(replacement);
    replace_in(expression, name, replacement, &free)
}

fn replace_in(
    expression: &Expression,
    name: &str,
    replacement: &Expression,
    free: &BTreeSet<String>,
) -> Expression {
    match expression {
        Expression::VariableName(n) if n == name => replacement.clone(),
        Expression::ForLoop {
            iterator,
            range,
            body,
        } => {
            let range = replace_in(range, name, replacement, free);
            if iterator == name {
                Expression::for_loop(iterator, range, body.as_ref().clone())
            } else if free.contains(iterator) && is_free_in(name, body) {
                let (fresh, body) = rename_iterator(iterator, body, name, free);
                Expression::for_loop(&fresh, range, replace_in(&body, name, replacement, free))
            } else {
                Expression::for_loop(iterator, range, replace_in(body, name, replacement, free))
            }
        }
        other => other.map_children(|child| replace_in(child, name, replacement, free)),
    }
}

/// Names the forgotten body still needs from memory once inlined.
fn free_names(forgotten: &Entry) -> BTreeSet<String> {
    dependency_set(&forgotten.body)
        .into_iter()
        .filter(|dep| !forgotten.params.contains(dep))
        .collect()
}

fn is_free_in(name: &str, expression: &Expression) -> bool {
    dependencies(expression).iter().any(|dep| dep == name)
}

fn rename_iterator(
    iterator: &str,
    body: &Expression,
    name: &str,
    avoid: &BTreeSet<String>,
) -> (String, Expression) {
    let mut taken = mentioned_names(body);
    taken.extend(avoid.iter().cloned());
    taken.insert(name.to_string());
    let fresh = fresh_name(iterator, &taken);
    debug!(iterator, fresh = %fresh, "renamed loop iterator");
    let body = replace_variable(body, iterator, &Expression::variable(&fresh));
    (fresh, body)
}

/// `base` followed by the first number from two up that gives a name not in
/// `taken`. Digits never spell a reserved word.
fn fresh_name(base: &str, taken: &BTreeSet<String>) -> String {
    let mut suffix = 2;
    loop {
        let candidate = format!("{}{}", base, suffix);
        if !taken.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AdditiveOperator, MultiplicativeOperator};
    use pretty_assertions::assert_eq;

    fn int(i: i64) -> Expression {
        Expression::IntLiteral(i)
    }

    fn plus(left: Expression, right: Expression) -> Expression {
        Expression::additive(AdditiveOperator::Add, left, right)
    }

    fn names(memory: &Memory) -> Vec<String> {
        memory.names()
    }

    #[test]
    fn test_tick_ages_unreferenced_entries() {
        let mut memory = Memory::default();
        memory.assign("a", &[], int(1)).unwrap();
        memory.assign("b", &[], int(2)).unwrap();

        let referenced: BTreeSet<String> = ["a".to_string()].into_iter().collect();
        memory.tick(&referenced);
        assert_eq!(memory.get("a").unwrap().fade, 1);
        assert_eq!(memory.get("b").unwrap().fade, 2);
    }

    #[test]
    fn test_entry_expires_past_limit() {
        let mut memory = Memory::default();
        memory.assign("a", &[], int(1)).unwrap();
        for _ in 0..10 {
            assert!(memory.tick(&BTreeSet::new()).is_empty());
        }
        assert_eq!(memory.get("a").unwrap().fade, 11);
        assert_eq!(memory.tick(&BTreeSet::new()), vec!["a".to_string()]);
        assert!(memory.is_empty());
    }

    #[test]
    fn test_forget_inlines_into_dependent() {
        let mut memory = Memory::default();
        memory.assign("a", &[], int(5)).unwrap();
        memory
            .assign("b", &[], plus(Expression::variable("a"), int(10)))
            .unwrap();
        memory.tick(&BTreeSet::new());

        memory.forget("a").unwrap();
        let b = memory.get("b").unwrap();
        assert_eq!(b.body, int(15));
        assert!(b.deps.is_empty());
        assert!(b.has_value);
        assert_eq!(b.fade, 2);
        assert_eq!(names(&memory), vec!["b"]);
    }

    #[test]
    fn test_forget_resolves_one_link_at_a_time() {
        let mut memory = Memory::default();
        memory.assign("a", &[], int(1)).unwrap();
        memory
            .assign("b", &[], plus(Expression::variable("a"), int(1)))
            .unwrap();
        memory
            .assign("c", &[], plus(Expression::variable("b"), int(1)))
            .unwrap();

        memory.forget("b").unwrap();
        let c = memory.get("c").unwrap();
        assert_eq!(
            c.body,
            plus(plus(Expression::variable("a"), int(1)), int(1))
        );
        assert_eq!(c.deps.iter().collect::<Vec<_>>(), vec!["a"]);
        assert!(!c.has_value);

        memory.forget("a").unwrap();
        assert_eq!(memory.get("c").unwrap().body, int(3));
    }

    #[test]
    fn test_forget_inlines_function_calls() {
        let mut memory = Memory::default();
        memory
            .assign(
                "double",
                &["n".to_string()],
                Expression::multiplicative(
                    MultiplicativeOperator::Multiply,
                    Expression::variable("n"),
                    int(2),
                ),
            )
            .unwrap();
        memory
            .assign("six", &[], Expression::call("double", int(3)))
            .unwrap();

        memory.forget("double").unwrap();
        assert_eq!(memory.get("six").unwrap().body, int(6));
    }

    #[test]
    fn test_text_results_are_flattened() {
        let mut memory = Memory::default();
        memory
            .assign("name", &[], Expression::StringLiteral("Ada".to_string()))
            .unwrap();
        memory
            .assign(
                "greeting",
                &[],
                Expression::List(vec![
                    Expression::StringLiteral("hi ".to_string()),
                    Expression::variable("name"),
                ]),
            )
            .unwrap();

        memory.forget("name").unwrap();
        assert_eq!(
            memory.get("greeting").unwrap().body,
            Expression::StringLiteral("hi Ada".to_string())
        );
    }

    #[test]
    fn test_forget_unknown_name() {
        let mut memory = Memory::default();
        assert_eq!(memory.forget("ghost"), None);
    }

    #[test]
    fn test_substitute_respects_shadowing() {
        let forgotten = Entry {
            name: "n".to_string(),
            params: vec![],
            body: int(7),
            deps: BTreeSet::new(),
            fade: 1,
            has_value: true,
        };
        let expression = Expression::List(vec![
            Expression::variable("n"),
            Expression::for_loop(
                "n",
                Expression::variable("n"),
                Expression::variable("n"),
            ),
        ]);
        assert_eq!(
            substitute(&expression, "n", &forgotten),
            Expression::List(vec![
                int(7),
                Expression::for_loop("n", int(7), Expression::variable("n")),
            ])
        );
    }

    #[test]
    fn test_substitute_renames_capturing_iterator() {
        let forgotten = Entry {
            name: "a".to_string(),
            params: vec![],
            body: plus(Expression::variable("n"), int(1)),
            deps: ["n".to_string()].into_iter().collect(),
            fade: 1,
            has_value: false,
        };
        let expression = Expression::for_loop(
            "n",
            Expression::range(int(1), int(3), None),
            Expression::variable("a"),
        );
        assert_eq!(
            substitute(&expression, "a", &forgotten),
            Expression::for_loop(
                "n2",
                Expression::range(int(1), int(3), None),
                plus(Expression::variable("n"), int(1)),
            )
        );
    }

    #[test]
    fn test_inlined_call_keeps_argument_free() {
        // f of x = for k in 1 to 2, x plus k
        let forgotten = Entry {
            name: "f".to_string(),
            params: vec!["x".to_string()],
            body: Expression::for_loop(
                "k",
                Expression::range(int(1), int(2), None),
                plus(Expression::variable("x"), Expression::variable("k")),
            ),
            deps: BTreeSet::new(),
            fade: 1,
            has_value: false,
        };
        let expression = Expression::call("f", Expression::variable("k"));
        assert_eq!(
            substitute(&expression, "f", &forgotten),
            Expression::for_loop(
                "k2",
                Expression::range(int(1), int(2), None),
                plus(Expression::variable("k"), Expression::variable("k2")),
            )
        );
    }

    #[test]
    fn test_forget_renames_capturing_parameter() {
        let mut memory = Memory::default();
        memory.assign("n", &[], int(5)).unwrap();
        memory
            .assign("a", &[], plus(Expression::variable("n"), int(1)))
            .unwrap();
        memory
            .assign(
                "f",
                &["n".to_string()],
                Expression::multiplicative(
                    MultiplicativeOperator::Multiply,
                    Expression::variable("a"),
                    Expression::variable("n"),
                ),
            )
            .unwrap();

        memory.forget("a").unwrap();
        let f = memory.get("f").unwrap();
        assert_eq!(f.params, vec!["n2".to_string()]);
        assert_eq!(
            f.body,
            Expression::multiplicative(
                MultiplicativeOperator::Multiply,
                plus(Expression::variable("n"), int(1)),
                Expression::variable("n2"),
            )
        );
        assert_eq!(f.deps.iter().collect::<Vec<_>>(), vec!["n"]);
    }
}
