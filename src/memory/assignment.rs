use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::ast::Expression;
use crate::eval::{dependencies, EvalError, EvalResult, Evaluator};

use super::{Entry, Memory};

impl Memory {
    /// Commits `name` as `expression`.
    ///
    /// The expression is folded first. Every name it still refers to must be
    /// remembered already (or be one of `params`), and the new dependencies
    /// must not lead back to `name`. Either failure leaves the memory as it
    /// was. On success the entry replaces any previous one with a fresh fade.
    #[tracing::instrument(level = "debug", skip(self, expression))]
    pub fn assign(
        &mut self,
        name: &str,
        params: &[String],
        expression: Expression,
    ) -> EvalResult<Entry> {
        let name = name.to_lowercase();
        let params: Vec<String> = params.iter().map(|p| p.to_lowercase()).collect();

        let body = Evaluator::new(&*self).fold(&expression);

        if let Expression::ForLoop { range, .. } = &body {
            if let Expression::VariableName(range_name) = range.as_ref() {
                if !self.contains(range_name) && !params.contains(range_name) {
                    return Err(EvalError::UnknownName(range_name.clone()));
                }
            }
        }

        let referenced: Vec<String> = dependencies(&body)
            .into_iter()
            .filter(|dep| !params.contains(dep))
            .collect();
        if let Some(missing) = referenced.iter().find(|dep| !self.contains(dep)) {
            debug!(name = %name, missing = %missing, "unknown dependency");
            return Err(EvalError::UnknownName(missing.clone()));
        }

        let deps: BTreeSet<String> = referenced.into_iter().collect();
        if self.would_cycle(&name, &deps, &mut HashSet::new()) {
            debug!(name = %name, "circular definition rejected");
            return Err(EvalError::CircularDependency(name));
        }

        let entry = Entry {
            has_value: deps.is_empty() && params.is_empty() && body.is_concrete(),
            name,
            params,
            body,
            deps,
            fade: 1,
        };
        debug!(name = %entry.name, has_value = entry.has_value, "committed");
        self.insert(entry.clone());
        Ok(entry)
    }
}
