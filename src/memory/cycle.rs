use std::collections::{BTreeSet, HashSet};

use super::Memory;

impl Memory {
    /// Whether committing `name` with dependencies `deps` would close a
    /// cycle.
    ///
    /// Depth-first over the stored dependencies of every remembered name
    /// reachable from `deps`; `visited` keeps shared subgraphs from being
    /// walked twice.
    pub fn would_cycle(
        &self,
        name: &str,
        deps: &BTreeSet<String>,
        visited: &mut HashSet<String>,
    ) -> bool {
        for dep in deps {
            if dep == name {
                return true;
            }
            if !visited.insert(dep.clone()) {
                continue;
            }
            if let Some(entry) = self.get(dep) {
                if self.would_cycle(name, &entry.deps, visited) {
                    return true;
                }
            }
        }
        false
    }
}
