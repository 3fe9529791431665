//! # Memory
//!
//! The store of remembered names. Each [`Entry`] keeps the expression a name
//! was defined with, the other names it depends on, and a fade counter that
//! grows every command the entry is not used in.
//!
//! * [`Memory::assign`] validates and commits a definition.
//! * [`Memory::would_cycle`] guards commits against dependency cycles.
//! * [`Memory::tick`] and [`Memory::forget`] age entries out, first inlining
//!   an expiring entry into every entry that still depends on it.
//!
//! Keys are lowercase; every public lookup lowercases its argument.

mod assignment;
mod cycle;
mod eviction;

pub use eviction::substitute;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::ast::Expression;
use crate::config::SessionConfig;
use crate::eval::Environment;
use crate::formatter::config::FormatterConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    /// Declared parameters; only the first is bound when called.
    pub params: Vec<String>,
    pub body: Expression,
    /// Remembered names the body refers to, parameters and iterators excluded.
    pub deps: BTreeSet<String>,
    /// Commands since the entry was last committed, starting at one.
    pub fade: u32,
    /// The body is a concrete value rather than a formula.
    pub has_value: bool,
}

#[derive(Debug, Clone)]
pub struct Memory {
    entries: BTreeMap<String, Entry>,
    fade_limit: u32,
    formatter: FormatterConfig,
}

impl Default for Memory {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}

impl Memory {
    pub fn new(fade_limit: u32, formatter: FormatterConfig) -> Self {
        Self {
            entries: BTreeMap::new(),
            fade_limit,
            formatter,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.fade_limit, config.formatter.clone())
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_lowercase())
    }

    /// Remembered names in lexical order.
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fade_limit(&self) -> u32 {
        self.fade_limit
    }

    fn insert(&mut self, entry: Entry) {
        self.entries.insert(entry.name.clone(), entry);
    }
}

impl Environment for Memory {
    fn definition(&self, name: &str) -> Option<(&[String], &Expression)> {
        self.get(name)
            .map(|entry| (entry.params.as_slice(), &entry.body))
    }

    fn formatter_config(&self) -> FormatterConfig {
        self.formatter.clone()
    }
}
